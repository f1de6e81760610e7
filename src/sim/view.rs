//! Read-only snapshot of the simulation for renderers
//!
//! Captured after a tick. Nothing here feeds back into the simulation.

use serde::Serialize;

use super::aabb::Aabb;
use super::state::{GamePhase, GameState, NpcLook};
use crate::consts::{DIALOGUE_SHAKE_AMPLITUDE, DIALOGUE_SHAKE_SPEED};

/// Everything a renderer needs to draw one NPC
#[derive(Debug, Clone, Serialize)]
pub struct NpcView {
    pub name: String,
    /// Drawn box including the float offset
    pub bounds: Aabb,
    pub float_offset: f32,
    pub color: u32,
    pub look: NpcLook,
    pub show_dialogue: bool,
    /// Bubble text with the emoji appended
    pub dialogue_text: String,
    pub highlight: Vec<String>,
    /// Horizontal jitter of the bubble, zero unless the line shakes
    pub shake_offset: f32,
}

/// Snapshot of a whole frame
#[derive(Debug, Clone, Serialize)]
pub struct RenderView {
    pub phase: GamePhase,
    pub camera_offset: f32,
    pub viewport_width: f32,
    pub player: Aabb,
    pub platforms: Vec<Aabb>,
    pub moving_platforms: Vec<Aabb>,
    pub enemies: Vec<Aabb>,
    pub npcs: Vec<NpcView>,
    pub flag: Aabb,
}

impl RenderView {
    /// Capture the current frame. `reduced_motion` turns off bubble shake.
    pub fn capture(state: &GameState, reduced_motion: bool) -> Self {
        let time_secs = state.time_secs();
        let world = &state.world;

        let npcs = world
            .npcs
            .iter()
            .map(|npc| {
                let shake_offset = if npc.dialogue.style.shake && !reduced_motion {
                    (time_secs * DIALOGUE_SHAKE_SPEED).sin() * DIALOGUE_SHAKE_AMPLITUDE
                } else {
                    0.0
                };
                NpcView {
                    name: npc.name.clone(),
                    bounds: npc.display_bounds(),
                    float_offset: npc.float_offset,
                    color: npc.color,
                    look: npc.look,
                    show_dialogue: npc.show_dialogue,
                    dialogue_text: npc.dialogue.display_text(),
                    highlight: npc.dialogue.style.highlight.clone(),
                    shake_offset,
                }
            })
            .collect();

        Self {
            phase: state.phase,
            camera_offset: state.camera.offset,
            viewport_width: world.viewport_width,
            player: state.player.bounds,
            platforms: world.platforms.iter().map(|p| p.bounds).collect(),
            moving_platforms: world.moving_platforms.iter().map(|p| p.bounds).collect(),
            enemies: world.enemies.iter().map(|e| e.bounds).collect(),
            npcs,
            flag: world.flag.bounds,
        }
    }

    /// Whether a world-space box intersects the camera window horizontally
    pub fn visible(&self, bounds: &Aabb) -> bool {
        bounds.right() > self.camera_offset
            && bounds.left() < self.camera_offset + self.viewport_width
    }

    /// Convert a world x coordinate to screen space
    pub fn to_screen_x(&self, world_x: f32) -> f32 {
        world_x - self.camera_offset
    }

    /// NPCs whose bubbles are currently open
    pub fn open_dialogues(&self) -> impl Iterator<Item = &NpcView> {
        self.npcs.iter().filter(|npc| npc.show_dialogue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, tick};

    #[test]
    fn test_capture_initial_level() {
        let state = GameState::new();
        let view = RenderView::capture(&state, false);
        assert_eq!(view.phase, GamePhase::Running);
        assert_eq!(view.camera_offset, 0.0);
        assert_eq!(view.platforms.len(), 17);
        assert_eq!(view.npcs.len(), 9);
        assert_eq!(view.player, state.player.bounds);
        assert_eq!(view.open_dialogues().count(), 0);
    }

    #[test]
    fn test_visibility_culling() {
        let view = RenderView::capture(&GameState::new(), false);
        // First platform on screen, flag at the far end is not
        assert!(view.visible(&view.platforms[0]));
        assert!(!view.visible(&view.flag));
        assert_eq!(view.to_screen_x(150.0), 150.0);
    }

    #[test]
    fn test_dialogue_text_and_highlight() {
        let view = RenderView::capture(&GameState::new(), false);
        let npc = view
            .npcs
            .iter()
            .find(|n| !n.highlight.is_empty())
            .expect("level has a highlighted line");
        assert_eq!(npc.highlight, vec!["玩家直觉".to_string()]);
        assert!(npc.dialogue_text.ends_with(" 😊"));
    }

    #[test]
    fn test_shake_respects_reduced_motion() {
        let mut state = GameState::new();
        for _ in 0..5 {
            tick(&mut state, &TickInput::default());
        }
        let shaking = |view: &RenderView| {
            view.npcs
                .iter()
                .find(|n| n.name == "不行")
                .map(|n| n.shake_offset)
                .expect("shaking npc present")
        };
        assert_ne!(shaking(&RenderView::capture(&state, false)), 0.0);
        assert_eq!(shaking(&RenderView::capture(&state, true)), 0.0);
    }

    #[test]
    fn test_view_serializes() {
        let view = RenderView::capture(&GameState::new(), false);
        let json = serde_json::to_string(&view).expect("view serializes");
        assert!(json.contains("\"camera_offset\":0.0"));
    }
}
