//! Game state and core simulation types
//!
//! Entities are plain data with an `Aabb` plus their own update rule. The
//! `GameState` owns all of them; only `tick` and `reset` mutate it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::aabb::Aabb;
use super::level;
use crate::consts::*;
use crate::unit_wave;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Running,
    /// Player reached the flag (terminal until reset)
    Won,
    /// Player fell or touched an enemy (terminal until reset)
    Dead,
}

impl GamePhase {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, GamePhase::Running)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            GamePhase::Running => "Running",
            GamePhase::Won => "Won",
            GamePhase::Dead => "Dead",
        }
    }
}

/// Why the run ended in `Dead`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathCause {
    /// Dropped below the death height
    Fell,
    /// Touched a patrolling enemy
    Enemy,
}

/// Things that happened during a tick, for audio and UI collaborators
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Jump impulse applied
    Jumped,
    /// Player touched ground after being airborne
    Landed,
    /// Player entered an NPC's dialogue box (index into `World::npcs`)
    DialogueOpened { npc: usize },
    /// Player left an NPC's dialogue box
    DialogueClosed { npc: usize },
    Died { cause: DeathCause },
    Won,
    /// Level restarted from the spawn point
    Reset,
}

/// Patrol direction of an enemy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1 for left, +1 for right
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Facing::Left => -1.0,
            Facing::Right => 1.0,
        }
    }
}

/// The player-controlled character
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub bounds: Aabb,
    /// Velocity in pixels per tick
    pub vel: Vec2,
    /// Whether a platform was under the player during the last resolution
    pub on_ground: bool,
}

impl Player {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            bounds: Aabb::new(x, y, PLAYER_SIZE, PLAYER_SIZE),
            vel: Vec2::ZERO,
            on_ground: false,
        }
    }

    /// Fresh player at the level start
    pub fn spawn() -> Self {
        Self::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y)
    }
}

/// A patrolling enemy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub bounds: Aabb,
    /// Pixels per tick
    pub speed: f32,
    /// Left end of the patrol
    pub start_x: f32,
    /// Patrol length to the right of `start_x`
    pub range: f32,
    pub facing: Facing,
}

impl Enemy {
    pub fn new(x: f32, y: f32, range: f32) -> Self {
        assert!(range > 0.0, "enemy patrol range must be positive");
        Self {
            bounds: Aabb::new(x, y, ENEMY_SIZE, ENEMY_SIZE),
            speed: ENEMY_SPEED,
            start_x: x,
            range,
            facing: Facing::Right,
        }
    }

    /// Advance one step and turn around at either end of the patrol.
    ///
    /// The turn happens once the enemy has reached an end, not before the
    /// step, so a speed that does not divide the range carries the enemy
    /// slightly past the end before it heads back.
    pub fn patrol(&mut self) {
        self.bounds.pos.x += self.speed * self.facing.sign();

        let x = self.bounds.x();
        if x >= self.start_x + self.range {
            self.facing = Facing::Left;
        } else if x <= self.start_x {
            self.facing = Facing::Right;
        }
    }
}

/// A static platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Platform {
    pub bounds: Aabb,
}

impl Platform {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            bounds: Aabb::new(x, y, width, height),
        }
    }
}

/// A platform sliding back and forth horizontally
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovingPlatform {
    pub bounds: Aabb,
    /// Left end of the travel
    pub origin_x: f32,
    /// Travel distance to the right of `origin_x`
    pub range: f32,
}

impl MovingPlatform {
    pub fn new(x: f32, y: f32, width: f32, height: f32, range: f32) -> Self {
        assert!(range >= 0.0, "moving platform range must not be negative");
        Self {
            bounds: Aabb::new(x, y, width, height),
            origin_x: x,
            range,
        }
    }

    /// Position the platform for the given simulated time.
    ///
    /// The phase is shifted so the platform sits at `origin_x` at time zero;
    /// x always stays within `[origin_x, origin_x + range]`.
    pub fn update(&mut self, time_secs: f32) {
        let phase = time_secs * MOVING_PLATFORM_SPEED - std::f32::consts::FRAC_PI_2;
        self.bounds.pos.x = self.origin_x + unit_wave(phase) * self.range;
    }
}

/// Optional emphasis for an NPC line
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogueStyle {
    /// Substrings drawn in a highlight color
    #[serde(default)]
    pub highlight: Vec<String>,
    /// Bubble jitters while shown
    #[serde(default)]
    pub shake: bool,
}

/// What an NPC says when the player walks up to them
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dialogue {
    pub text: String,
    pub emoji: Option<String>,
    #[serde(default)]
    pub style: DialogueStyle,
}

impl Dialogue {
    pub fn new(text: &str) -> Self {
        Self {
            text: text.to_string(),
            emoji: None,
            style: DialogueStyle::default(),
        }
    }

    pub fn with_emoji(mut self, emoji: &str) -> Self {
        self.emoji = Some(emoji.to_string());
        self
    }

    pub fn with_highlight(mut self, words: &[&str]) -> Self {
        self.style.highlight = words.iter().map(|w| w.to_string()).collect();
        self
    }

    pub fn shaking(mut self) -> Self {
        self.style.shake = true;
        self
    }

    /// Text as shown in the bubble, emoji appended after a space
    pub fn display_text(&self) -> String {
        match &self.emoji {
            Some(emoji) => format!("{} {}", self.text, emoji),
            None => self.text.clone(),
        }
    }
}

/// Visual variant of an NPC sprite
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NpcLook {
    #[default]
    Plain,
    SplitHair,
    Overalls,
    PeakedCap,
}

/// A friendly character. Never blocks or harms the player.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Npc {
    /// Drawn box at the resting position (float offset not applied)
    pub bounds: Aabb,
    pub name: String,
    pub dialogue: Dialogue,
    /// Body color (0xRRGGBB)
    pub color: u32,
    pub look: NpcLook,
    pub floating: bool,
    /// Current vertical bob, zero unless floating
    pub float_offset: f32,
    /// Player is inside the dialogue trigger box this tick
    #[serde(skip)]
    pub show_dialogue: bool,
}

impl Npc {
    pub fn new(x: f32, y: f32, name: &str, dialogue: Dialogue, color: u32) -> Self {
        Self {
            bounds: Aabb::new(x, y, NPC_SIZE, NPC_SIZE),
            name: name.to_string(),
            dialogue,
            color,
            look: NpcLook::Plain,
            floating: false,
            float_offset: 0.0,
            show_dialogue: false,
        }
    }

    pub fn with_look(mut self, look: NpcLook) -> Self {
        self.look = look;
        self
    }

    pub fn floating(mut self) -> Self {
        self.floating = true;
        self
    }

    /// Fixed-size box that opens the dialogue bubble, independent of the
    /// drawn size and of the float offset
    pub fn trigger_bounds(&self) -> Aabb {
        Aabb::new(
            self.bounds.x(),
            self.bounds.y(),
            NPC_TRIGGER_WIDTH,
            NPC_TRIGGER_HEIGHT,
        )
    }

    /// Drawn box including the float offset
    pub fn display_bounds(&self) -> Aabb {
        self.bounds.translated(Vec2::new(0.0, self.float_offset))
    }

    /// Recompute the cosmetic bob for the given simulated time
    pub fn update_float(&mut self, time_secs: f32) {
        self.float_offset = if self.floating {
            (time_secs * NPC_FLOAT_SPEED).sin() * NPC_FLOAT_AMPLITUDE
        } else {
            0.0
        };
    }
}

/// The goal marker
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flag {
    pub bounds: Aabb,
}

impl Flag {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            bounds: Aabb::new(x, y, FLAG_WIDTH, FLAG_HEIGHT),
        }
    }
}

/// Everything in the level except the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub platforms: Vec<Platform>,
    pub moving_platforms: Vec<MovingPlatform>,
    pub enemies: Vec<Enemy>,
    pub npcs: Vec<Npc>,
    pub flag: Flag,
    pub level_width: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl World {
    /// Lowest y the player may reach before dying
    pub fn death_height(&self) -> f32 {
        self.viewport_height + 200.0
    }

    /// Largest camera offset (the right edge of the level fills the view)
    pub fn max_camera_offset(&self) -> f32 {
        (self.level_width - self.viewport_width).max(0.0)
    }

    /// Static and moving platform boxes, static ones first
    pub fn platform_bounds(&self) -> impl Iterator<Item = &Aabb> {
        self.platforms
            .iter()
            .map(|p| &p.bounds)
            .chain(self.moving_platforms.iter().map(|p| &p.bounds))
    }
}

/// Horizontal scroll position of the view
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Camera {
    pub offset: f32,
}

impl Camera {
    /// Scroll to keep the player a third of the way into the view.
    ///
    /// The camera only ever follows to the right: while the player is left
    /// of the threshold the previous offset is kept.
    pub fn follow(&mut self, player_x: f32, world: &World) {
        let threshold = world.viewport_width / 3.0;
        if player_x > threshold {
            self.offset = (player_x - threshold).min(world.max_camera_offset());
        }
    }
}

/// Complete game state (deterministic, serializable)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub world: World,
    pub player: Player,
    pub camera: Camera,
    pub phase: GamePhase,
    /// Simulation tick counter (drives all periodic motion)
    pub time_ticks: u64,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Start of the built-in level
    pub fn new() -> Self {
        Self::with_world(level::build())
    }

    /// Start of an arbitrary world (used by tests)
    pub fn with_world(world: World) -> Self {
        Self {
            world,
            player: Player::spawn(),
            camera: Camera::default(),
            phase: GamePhase::Running,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    /// Put the player back at the spawn point and resume play.
    ///
    /// Enemies, platforms and the tick counter carry on where they were.
    pub fn reset(&mut self) {
        log::info!("Level reset (was {})", self.phase.as_str());
        self.player = Player::spawn();
        self.camera = Camera::default();
        self.phase = GamePhase::Running;
        for npc in &mut self.world.npcs {
            npc.show_dialogue = false;
        }
        self.events.push(GameEvent::Reset);
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Simulated seconds since the level was built
    pub fn time_secs(&self) -> f32 {
        crate::ticks_to_secs(self.time_ticks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enemy_turns_at_right_end() {
        let mut enemy = Enemy::new(500.0, 360.0, 150.0);
        for _ in 0..75 {
            enemy.patrol();
            assert!(enemy.bounds.x() <= 650.0);
        }
        assert_eq!(enemy.bounds.x(), 650.0);
        assert_eq!(enemy.facing, Facing::Left);

        enemy.patrol();
        assert_eq!(enemy.bounds.x(), 648.0);
    }

    #[test]
    fn test_enemy_turns_at_left_end() {
        let mut enemy = Enemy::new(500.0, 360.0, 150.0);
        // Out to the right end and all the way back
        for _ in 0..150 {
            enemy.patrol();
        }
        assert_eq!(enemy.bounds.x(), 500.0);
        assert_eq!(enemy.facing, Facing::Right);
    }

    #[test]
    fn test_enemy_fast_speed_overshoots() {
        let mut enemy = Enemy::new(0.0, 0.0, 10.0);
        enemy.speed = 4.0;
        for _ in 0..3 {
            enemy.patrol();
        }
        // 12 > 10: turned, but not clamped back
        assert_eq!(enemy.bounds.x(), 12.0);
        assert_eq!(enemy.facing, Facing::Left);
    }

    #[test]
    fn test_moving_platform_bounded() {
        let mut platform = MovingPlatform::new(350.0, 200.0, 100.0, 20.0, 150.0);
        platform.update(0.0);
        assert!((platform.bounds.x() - 350.0).abs() < 1e-3);

        for tick in 0..2000u64 {
            platform.update(crate::ticks_to_secs(tick));
            let x = platform.bounds.x();
            assert!((350.0 - 1e-3..=500.0 + 1e-3).contains(&x), "x={x}");
            assert_eq!(platform.bounds.width(), 100.0);
        }
    }

    #[test]
    fn test_moving_platform_deterministic() {
        let mut a = MovingPlatform::new(900.0, 250.0, 100.0, 20.0, 100.0);
        let mut b = a.clone();
        a.update(3.25);
        b.update(3.25);
        assert_eq!(a.bounds, b.bounds);
    }

    #[test]
    fn test_npc_float() {
        let mut npc = Npc::new(1500.0, 440.0, "floater", Dialogue::new("hi"), 0x8B4513).floating();
        npc.update_float(0.0);
        assert_eq!(npc.float_offset, 0.0);

        npc.update_float(std::f32::consts::FRAC_PI_4);
        // sin(pi/2) * amplitude
        assert!((npc.float_offset - NPC_FLOAT_AMPLITUDE).abs() < 1e-3);
        assert!((npc.display_bounds().y() - (440.0 + NPC_FLOAT_AMPLITUDE)).abs() < 1e-3);
        // Trigger box ignores the bob
        assert_eq!(npc.trigger_bounds().y(), 440.0);
        assert_eq!(npc.trigger_bounds().height(), NPC_TRIGGER_HEIGHT);
    }

    #[test]
    fn test_grounded_npc_never_floats() {
        let mut npc = Npc::new(200.0, 440.0, "still", Dialogue::new("hi"), 0xFF69B4);
        npc.update_float(1.0);
        assert_eq!(npc.float_offset, 0.0);
    }

    #[test]
    fn test_dialogue_display_text() {
        assert_eq!(Dialogue::new("hello").display_text(), "hello");
        assert_eq!(
            Dialogue::new("hello").with_emoji("😊").display_text(),
            "hello 😊"
        );
    }

    #[test]
    fn test_camera_one_way() {
        let world = level::build();
        let mut camera = Camera::default();

        camera.follow(1000.0, &world);
        let ahead = camera.offset;
        assert!((ahead - (1000.0 - VIEWPORT_WIDTH / 3.0)).abs() < 1e-3);

        // Walking back past the threshold keeps the old offset
        camera.follow(100.0, &world);
        assert_eq!(camera.offset, ahead);

        camera.follow(LEVEL_WIDTH, &world);
        assert_eq!(camera.offset, LEVEL_WIDTH - VIEWPORT_WIDTH);
    }

    #[test]
    fn test_reset_restores_spawn() {
        let mut state = GameState::new();
        state.player.bounds.pos = Vec2::new(3000.0, 100.0);
        state.player.vel = Vec2::new(5.0, -3.0);
        state.camera.offset = 2700.0;
        state.phase = GamePhase::Dead;

        state.reset();
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.bounds.pos, Vec2::new(PLAYER_SPAWN_X, PLAYER_SPAWN_Y));
        assert_eq!(state.player.vel, Vec2::ZERO);
        assert_eq!(state.camera.offset, 0.0);
        assert_eq!(state.drain_events(), vec![GameEvent::Reset]);
        assert!(state.events.is_empty());
    }
}
