//! Frame scheduler
//!
//! Owns the game state and runs whole simulation ticks from variable display
//! frame deltas. Key state changes between ticks; every tick sees the keys as
//! they were when it started.

use crate::consts::*;
use crate::sim::{GameEvent, GamePhase, GameState, RenderView, TickInput, tick};

/// Keys the game listens to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Left,
    Right,
    Up,
    Space,
}

/// What happened during one display frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    /// Simulation ticks run this frame
    pub ticks: u32,
    pub phase: GamePhase,
    pub events: Vec<GameEvent>,
}

/// Game instance holding all state
pub struct FrameDriver {
    state: GameState,
    accumulator: f32,
    input: TickInput,
    // FPS tracking
    frame_times: [f64; 60],
    frame_index: usize,
    fps: u32,
    last_phase: GamePhase,
}

impl Default for FrameDriver {
    fn default() -> Self {
        Self::new(GameState::new())
    }
}

impl FrameDriver {
    pub fn new(state: GameState) -> Self {
        let last_phase = state.phase;
        Self {
            state,
            accumulator: 0.0,
            input: TickInput::default(),
            frame_times: [0.0; 60],
            frame_index: 0,
            fps: 0,
            last_phase,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn fps(&self) -> u32 {
        self.fps
    }

    /// Held keys as the next tick will see them
    pub fn input(&self) -> &TickInput {
        &self.input
    }

    pub fn press(&mut self, key: Key) {
        self.set_key(key, true);
    }

    pub fn release(&mut self, key: Key) {
        self.set_key(key, false);
    }

    fn set_key(&mut self, key: Key, down: bool) {
        match key {
            Key::Left => self.input.left = down,
            Key::Right => self.input.right = down,
            Key::Up => self.input.up = down,
            Key::Space => self.input.jump = down,
        }
    }

    /// Replace the whole key snapshot at once
    pub fn set_input(&mut self, left: bool, right: bool, up: bool, jump: bool) {
        self.input.left = left;
        self.input.right = right;
        self.input.up = up;
        self.input.jump = jump;
    }

    pub fn set_autopilot(&mut self, enabled: bool) {
        self.input.autopilot = enabled;
    }

    /// Restart the level. Safe at any point between frames.
    pub fn reset(&mut self) {
        self.state.reset();
        self.accumulator = 0.0;
        self.last_phase = self.state.phase;
    }

    /// Run simulation ticks for a display frame of `dt` seconds ending at
    /// `time` (seconds, monotonic)
    pub fn update(&mut self, dt: f32, time: f64) -> FrameReport {
        let dt = dt.clamp(0.0, MAX_FRAME_DT);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            tick(&mut self.state, &self.input);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }

        self.track_fps(time);

        let phase = self.state.phase;
        if phase != self.last_phase {
            log::info!("Phase {} -> {}", self.last_phase.as_str(), phase.as_str());
            self.last_phase = phase;
        }

        let events = self.state.drain_events();
        for event in &events {
            log::debug!("event: {event:?}");
        }

        FrameReport {
            ticks: substeps,
            phase,
            events,
        }
    }

    fn track_fps(&mut self, time: f64) {
        self.frame_times[self.frame_index] = time;
        self.frame_index = (self.frame_index + 1) % self.frame_times.len();

        // Oldest sample is the one about to be overwritten
        let oldest_time = self.frame_times[self.frame_index];
        if oldest_time > 0.0 {
            let elapsed = time - oldest_time;
            if elapsed > 0.0 {
                self.fps = ((self.frame_times.len() - 1) as f64 / elapsed).round() as u32;
            }
        }
    }

    /// Snapshot for the renderer
    pub fn view(&self, reduced_motion: bool) -> RenderView {
        RenderView::capture(&self.state, reduced_motion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FRAME: f32 = 1.0 / 60.0;

    #[test]
    fn test_one_tick_per_frame() {
        let mut driver = FrameDriver::default();
        let mut total = 0;
        for frame in 1..=120 {
            total += driver.update(FRAME, frame as f64 * FRAME as f64).ticks;
        }
        // Float accumulation may defer at most one tick
        assert!((119..=120).contains(&total), "ran {total} ticks");
        assert_eq!(driver.state().time_ticks, total as u64);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut driver = FrameDriver::default();
        let report = driver.update(5.0, 5.0);
        assert!(report.ticks <= MAX_SUBSTEPS);
        assert!(report.ticks >= 5);
    }

    #[test]
    fn test_keys_feed_ticks() {
        let mut driver = FrameDriver::default();
        // Let the player land on the first platform
        for frame in 1..=60 {
            driver.update(FRAME, frame as f64 * FRAME as f64);
        }
        let start_x = driver.state().player.bounds.x();

        driver.press(Key::Right);
        for frame in 61..=70 {
            driver.update(FRAME, frame as f64 * FRAME as f64);
        }
        assert!(driver.state().player.bounds.x() > start_x);

        driver.release(Key::Right);
        assert!(!driver.input().right);
    }

    #[test]
    fn test_space_and_up_map_to_jump() {
        let mut driver = FrameDriver::default();
        driver.press(Key::Space);
        driver.press(Key::Up);
        assert!(driver.input().jump);
        assert!(driver.input().up);
        driver.set_input(false, false, false, false);
        assert!(!driver.input().wants_jump());
    }

    #[test]
    fn test_reset_between_frames() {
        let mut driver = FrameDriver::default();
        driver.press(Key::Right);
        for frame in 1..=30 {
            driver.update(FRAME, frame as f64 * FRAME as f64);
        }
        driver.reset();
        assert_eq!(driver.phase(), GamePhase::Running);
        assert_eq!(driver.state().player.bounds.x(), PLAYER_SPAWN_X);
        assert_eq!(driver.state().camera.offset, 0.0);

        let report = driver.update(0.0, 31.0 * FRAME as f64);
        assert_eq!(report.events, vec![GameEvent::Reset]);
    }

    #[test]
    fn test_fps_estimate() {
        let mut driver = FrameDriver::default();
        for frame in 1..=120 {
            driver.update(FRAME, frame as f64 / 60.0);
        }
        assert_eq!(driver.fps(), 60);
    }
}
