//! Xiaoji's Adventure - a side-scrolling platformer
//!
//! Core modules:
//! - `sim`: Deterministic simulation (physics, collisions, game state)
//! - `driver`: Fixed-timestep frame scheduler feeding input into the sim
//! - `settings`: Presentation and driver preferences

pub mod driver;
pub mod settings;
pub mod sim;

pub use driver::{FrameDriver, Key};
pub use settings::Settings;

/// Game configuration constants
///
/// These are fixed for the single hard-coded level; none of them are exposed
/// as user settings.
pub mod consts {
    /// Fixed simulation timestep (one tick per 60 Hz display frame)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest frame delta the driver will accept (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Viewport dimensions
    pub const VIEWPORT_WIDTH: f32 = 800.0;
    pub const VIEWPORT_HEIGHT: f32 = 600.0;

    /// Total scrollable level width
    pub const LEVEL_WIDTH: f32 = 6000.0;
    /// Falling below this y is fatal
    pub const DEATH_HEIGHT: f32 = VIEWPORT_HEIGHT + 200.0;

    /// Player physics (pixels per tick)
    pub const GRAVITY: f32 = 0.5;
    pub const JUMP_FORCE: f32 = -12.0;
    pub const MOVE_SPEED: f32 = 5.0;
    /// Horizontal velocity decay when no direction is held
    pub const FRICTION: f32 = 0.8;

    /// Player defaults
    pub const PLAYER_SPAWN_X: f32 = 100.0;
    pub const PLAYER_SPAWN_Y: f32 = 300.0;
    pub const PLAYER_SIZE: f32 = 30.0;

    /// Enemy defaults (slightly larger than the player)
    pub const ENEMY_SIZE: f32 = 35.0;
    pub const ENEMY_SPEED: f32 = 2.0;

    /// NPC drawn size
    pub const NPC_SIZE: f32 = 50.0;
    /// Dialogue trigger box, anchored at the NPC's resting position
    pub const NPC_TRIGGER_WIDTH: f32 = 50.0;
    pub const NPC_TRIGGER_HEIGHT: f32 = 60.0;
    /// Floating NPC bob (radians per second, pixels)
    pub const NPC_FLOAT_SPEED: f32 = 2.0;
    pub const NPC_FLOAT_AMPLITUDE: f32 = 10.0;
    /// Shaking dialogue bubble (radians per second, pixels)
    pub const DIALOGUE_SHAKE_SPEED: f32 = 20.0;
    pub const DIALOGUE_SHAKE_AMPLITUDE: f32 = 2.0;

    /// Moving platform oscillation (radians per second)
    pub const MOVING_PLATFORM_SPEED: f32 = 1.2;

    /// Goal flag dimensions
    pub const FLAG_WIDTH: f32 = 30.0;
    pub const FLAG_HEIGHT: f32 = 140.0;
}

/// Simulated seconds elapsed after `ticks` fixed steps
#[inline]
pub fn ticks_to_secs(ticks: u64) -> f32 {
    ticks as f32 * consts::SIM_DT
}

/// Sine oscillation remapped from [-1, 1] to [0, 1]
#[inline]
pub fn unit_wave(phase: f32) -> f32 {
    (phase.sin() + 1.0) * 0.5
}
