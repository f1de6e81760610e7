//! Driver and presentation preferences
//!
//! Nothing here changes the physics. Read from a JSON file when one is given
//! on the command line; every field falls back to its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Accessibility ===
    /// Reduced motion (no dialogue bubble shake)
    pub reduced_motion: bool,

    // === HUD ===
    /// Log the measured frame rate
    pub show_fps: bool,

    // === Headless driver ===
    /// Let the autopilot play instead of scripted/random input
    pub autopilot: bool,
    /// Number of display frames to run
    pub frames: u32,
    /// Display frame interval in seconds
    pub frame_interval: f32,
    /// Mash random keys with this seed instead of using the autopilot
    pub random_input_seed: Option<u64>,
    /// Restart automatically after dying or winning
    pub auto_reset: bool,
    /// Dump the final render view as JSON
    pub dump_view: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            reduced_motion: false,
            show_fps: false,
            autopilot: true,
            frames: 60 * 120,
            frame_interval: 1.0 / 60.0,
            random_input_seed: None,
            auto_reset: false,
            dump_view: false,
        }
    }
}

impl Settings {
    /// Parse settings from JSON text
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Load settings from a file, falling back to defaults if it cannot be
    /// read or parsed
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings in {}: {e}", path.display());
                    Self::default()
                }
            },
            Err(e) => {
                log::warn!("Could not read {}: {e}", path.display());
                Self::default()
            }
        }
    }

    /// Frame interval clamped to something the driver can use
    pub fn effective_frame_interval(&self) -> f32 {
        if self.frame_interval.is_finite() && self.frame_interval > 0.0 {
            self.frame_interval
        } else {
            Self::default().frame_interval
        }
    }
}
