//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only, time derived from the tick counter
//! - Stable iteration order (level order)
//! - No rendering, audio or platform dependencies

pub mod aabb;
pub mod collision;
pub mod level;
pub mod state;
pub mod tick;
pub mod view;

pub use aabb::Aabb;
pub use collision::{GroundContact, first_overlap, overlaps, resolve_ground};
pub use state::{
    Camera, DeathCause, Dialogue, DialogueStyle, Enemy, Facing, Flag, GameEvent, GamePhase,
    GameState, MovingPlatform, Npc, NpcLook, Platform, Player, World,
};
pub use tick::{TickInput, tick};
pub use view::{NpcView, RenderView};
