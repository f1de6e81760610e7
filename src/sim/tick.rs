//! Fixed timestep simulation tick
//!
//! Core game loop that advances the level by one frame. Processing order:
//!   1. Horizontal input / friction
//!   2. Gravity and position integration
//!   3. Fall check (ends the tick)
//!   4. Moving platforms, enemies, NPC bob and dialogue proximity
//!   5. Ground resolution against all platforms
//!   6. Enemy contact, then flag contact
//!   7. Jump (only from a grounded tick)
//!   8. Level bounds clamp and camera follow

use super::aabb::Aabb;
use super::collision::{first_overlap, overlaps, resolve_ground};
use super::state::{DeathCause, GameEvent, GamePhase, GameState, World};
use crate::consts::*;

/// Held keys for a single tick (deterministic snapshot)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    /// Up arrow (jumps)
    pub up: bool,
    /// Jump button (space)
    pub jump: bool,
    /// Demo mode - the autopilot plays the level
    pub autopilot: bool,
}

impl TickInput {
    #[inline]
    pub fn wants_jump(&self) -> bool {
        self.up || self.jump
    }
}

/// Advance the game state by one tick and return the resulting phase.
///
/// Terminal phases are sticky: once `Won` or `Dead`, ticks do nothing until
/// `GameState::reset`.
pub fn tick(state: &mut GameState, input: &TickInput) -> GamePhase {
    if state.phase.is_terminal() {
        return state.phase;
    }

    let input = if input.autopilot {
        autopilot(state)
    } else {
        input.clone()
    };
    let input = &input;

    state.time_ticks += 1;
    let time_secs = state.time_secs();

    // --- PLAYER MOTION ---
    let player = &mut state.player;
    if input.left {
        player.vel.x = -MOVE_SPEED;
    }
    // Right is applied after left, so holding both moves right
    if input.right {
        player.vel.x = MOVE_SPEED;
    }
    if !input.left && !input.right {
        player.vel.x *= FRICTION;
    }

    player.vel.y += GRAVITY;
    player.bounds.pos += player.vel;

    if player.bounds.y() > state.world.death_height() {
        die(state, DeathCause::Fell);
        return state.phase;
    }

    // --- MOVING BODIES ---
    for platform in &mut state.world.moving_platforms {
        platform.update(time_secs);
    }
    for enemy in &mut state.world.enemies {
        enemy.patrol();
    }
    update_npcs(state, time_secs);

    // --- GROUND ---
    let was_on_ground = state.player.on_ground;
    let contact = resolve_ground(
        &mut state.player.bounds,
        &mut state.player.vel.y,
        state.world.platform_bounds(),
    );
    state.player.on_ground = contact.on_ground;
    if contact.on_ground && !was_on_ground {
        log::debug!(
            "Landed at x={:.1} on surface y={:.1}",
            state.player.bounds.x(),
            contact.surface_y
        );
        state.events.push(GameEvent::Landed);
    }

    // --- HAZARDS AND GOAL ---
    let enemy_hit = first_overlap(
        &state.player.bounds,
        state.world.enemies.iter().map(|e| &e.bounds),
    );
    if let Some(index) = enemy_hit {
        log::debug!("Touched enemy {index}");
        die(state, DeathCause::Enemy);
    } else if overlaps(&state.player.bounds, &state.world.flag.bounds) {
        win(state);
    }

    // --- JUMP ---
    if state.phase == GamePhase::Running && input.wants_jump() && state.player.on_ground {
        state.player.vel.y = JUMP_FORCE;
        state.events.push(GameEvent::Jumped);
    }

    // --- BOUNDS AND CAMERA ---
    let max_x = state.world.level_width - state.player.bounds.width();
    state.player.bounds.pos.x = state.player.bounds.x().clamp(0.0, max_x);
    state.camera.follow(state.player.bounds.x(), &state.world);

    log::trace!(
        "tick {} pos=({:.1}, {:.1}) vel=({:.2}, {:.2}) camera={:.1}",
        state.time_ticks,
        state.player.bounds.x(),
        state.player.bounds.y(),
        state.player.vel.x,
        state.player.vel.y,
        state.camera.offset
    );

    state.phase
}

/// Bob floating NPCs and refresh which dialogue bubbles are open
fn update_npcs(state: &mut GameState, time_secs: f32) {
    let player = state.player.bounds;
    for (index, npc) in state.world.npcs.iter_mut().enumerate() {
        npc.update_float(time_secs);

        let near = overlaps(&player, &npc.trigger_bounds());
        if near != npc.show_dialogue {
            if near {
                log::debug!("Dialogue opened: {}", npc.name);
                state.events.push(GameEvent::DialogueOpened { npc: index });
            } else {
                state.events.push(GameEvent::DialogueClosed { npc: index });
            }
        }
        npc.show_dialogue = near;
    }
}

fn die(state: &mut GameState, cause: DeathCause) {
    log::info!(
        "Player died ({:?}) at x={:.1} after {} ticks",
        cause,
        state.player.bounds.x(),
        state.time_ticks
    );
    state.phase = GamePhase::Dead;
    state.events.push(GameEvent::Died { cause });
}

fn win(state: &mut GameState) {
    log::info!("Flag reached after {} ticks", state.time_ticks);
    state.phase = GamePhase::Won;
    state.events.push(GameEvent::Won);
}

/// How far ahead of the player the autopilot looks for trouble
const AUTOPILOT_LOOKAHEAD: f32 = 40.0;
/// Distance at which an approaching enemy triggers a jump
const AUTOPILOT_ENEMY_RANGE: f32 = 60.0;

/// Demo AI: run right, jump over gaps and enemies
fn autopilot(state: &GameState) -> TickInput {
    let player = &state.player.bounds;
    let world = &state.world;

    let enemy_ahead = world.enemies.iter().any(|enemy| {
        let gap = enemy.bounds.left() - player.right();
        gap > 0.0 && gap < AUTOPILOT_ENEMY_RANGE && (enemy.bounds.bottom() - player.bottom()).abs() < 40.0
    });

    let probe_x = player.right() + AUTOPILOT_LOOKAHEAD;
    let gap_ahead = !has_ground_below(world, probe_x, player.bottom());

    TickInput {
        right: true,
        jump: enemy_ahead || gap_ahead,
        ..Default::default()
    }
}

/// Whether any platform lies under `x` at or below `feet_y`
fn has_ground_below(world: &World, x: f32, feet_y: f32) -> bool {
    world
        .platform_bounds()
        .any(|p: &Aabb| p.spans_x(x) && p.top() >= feet_y - 1.0)
}
