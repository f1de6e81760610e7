//! The built-in level layout
//!
//! One fixed level: the player starts on the far left and walks right to the
//! flag, passing a friend on most platforms along the way.

use super::state::{Dialogue, Enemy, Flag, MovingPlatform, Npc, NpcLook, Platform, World};
use crate::consts::*;

/// Static platforms as (x, y, width, height)
const PLATFORMS: [(f32, f32, f32, f32); 17] = [
    (0.0, 500.0, 300.0, 40.0),
    (400.0, 400.0, 200.0, 40.0),
    (700.0, 300.0, 200.0, 40.0),
    (1000.0, 400.0, 300.0, 40.0),
    (1400.0, 500.0, 200.0, 40.0),
    (1700.0, 400.0, 250.0, 40.0),
    (2000.0, 300.0, 200.0, 40.0),
    (2300.0, 400.0, 300.0, 40.0),
    (2700.0, 500.0, 400.0, 40.0),
    (3000.0, 400.0, 300.0, 40.0),
    (3400.0, 300.0, 250.0, 40.0),
    (3800.0, 400.0, 200.0, 40.0),
    (4200.0, 500.0, 300.0, 40.0),
    (4600.0, 400.0, 250.0, 40.0),
    (5000.0, 300.0, 200.0, 40.0),
    (5400.0, 400.0, 300.0, 40.0),
    (5800.0, 500.0, 400.0, 40.0),
];

/// Moving platforms as (x, y, width, height, range)
const MOVING_PLATFORMS: [(f32, f32, f32, f32, f32); 8] = [
    (350.0, 200.0, 100.0, 20.0, 150.0),
    (900.0, 250.0, 100.0, 20.0, 100.0),
    (1600.0, 200.0, 100.0, 20.0, 120.0),
    (2200.0, 200.0, 100.0, 20.0, 150.0),
    (3200.0, 200.0, 100.0, 20.0, 120.0),
    (4000.0, 200.0, 100.0, 20.0, 150.0),
    (4800.0, 200.0, 100.0, 20.0, 120.0),
    (5600.0, 200.0, 100.0, 20.0, 150.0),
];

/// Enemies as (start x, y, patrol range)
const ENEMIES: [(f32, f32, f32); 8] = [
    (500.0, 360.0, 150.0),
    (1100.0, 360.0, 200.0),
    (1800.0, 360.0, 150.0),
    (2400.0, 360.0, 200.0),
    (3300.0, 360.0, 150.0),
    (4100.0, 360.0, 200.0),
    (4900.0, 360.0, 150.0),
    (5500.0, 360.0, 200.0),
];

fn npcs() -> Vec<Npc> {
    vec![
        Npc::new(200.0, 440.0, "杏子", Dialogue::new("快来闻我的臭拖鞋!"), 0xFF69B4)
            .with_look(NpcLook::SplitHair),
        Npc::new(800.0, 240.0, "闫辰祥", Dialogue::new("变!快给我变!"), 0x4169E1),
        Npc::new(
            1500.0,
            440.0,
            "峰哥",
            Dialogue::new("小吉!快来让我撸一下小吉!"),
            0x8B4513,
        )
        .floating(),
        Npc::new(
            2200.0,
            340.0,
            "姚越凡",
            Dialogue::new("(正在和不行讨论游戏)我觉得这个体验是比较符合玩家直觉的!")
                .with_highlight(&["玩家直觉"])
                .with_emoji("😊"),
            0xFFD700,
        ),
        Npc::new(
            2900.0,
            440.0,
            "不行",
            Dialogue::new("策划案一定要写的让人能读懂才行啊啊啊啊!!!")
                .shaking()
                .with_emoji("❗"),
            0x32CD32,
        )
        .with_look(NpcLook::Overalls),
        Npc::new(
            3600.0,
            240.0,
            "泽哥",
            Dialogue::new("啊,这个需求不是很简单吗,我明天做一个demo给你").with_emoji("😎"),
            0x9370DB,
        ),
        Npc::new(
            4300.0,
            440.0,
            "海鸥",
            Dialogue::new("没错,我们这个游戏一定要发神经!(压了压鸭舌帽)").with_emoji("😐"),
            0x20B2AA,
        )
        .with_look(NpcLook::PeakedCap),
        Npc::new(5000.0, 240.0, "李泊凡", Dialogue::new("这么说好像也没错!").with_emoji("😮"), 0xFF7F50),
        Npc::new(
            5700.0,
            440.0,
            "杨泽雄",
            Dialogue::new("小吉,没事的,我不是鬼,不用害怕!不要迷信哥,哥只是个传说").with_emoji("😈"),
            0x483D8B,
        ),
    ]
}

/// Build the level in its starting configuration
pub fn build() -> World {
    let world = World {
        platforms: PLATFORMS
            .iter()
            .map(|&(x, y, w, h)| Platform::new(x, y, w, h))
            .collect(),
        moving_platforms: MOVING_PLATFORMS
            .iter()
            .map(|&(x, y, w, h, range)| MovingPlatform::new(x, y, w, h, range))
            .collect(),
        enemies: ENEMIES
            .iter()
            .map(|&(x, y, range)| Enemy::new(x, y, range))
            .collect(),
        npcs: npcs(),
        flag: Flag::new(LEVEL_WIDTH - 100.0, VIEWPORT_HEIGHT - 240.0),
        level_width: LEVEL_WIDTH,
        viewport_width: VIEWPORT_WIDTH,
        viewport_height: VIEWPORT_HEIGHT,
    };

    log::debug!(
        "Built level: {} platforms, {} moving, {} enemies, {} npcs",
        world.platforms.len(),
        world.moving_platforms.len(),
        world.enemies.len(),
        world.npcs.len()
    );

    world
}
