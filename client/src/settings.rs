//! User settings loaded from a RON file next to the working directory.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

pub const SETTINGS_PATH: &str = "settings.ron";

#[derive(Resource, Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Radians of look rotation per pixel of mouse motion
    pub mouse_sensitivity: f32,
    pub invert_y: bool,
    pub fov_degrees: f32,
    pub window_width: u32,
    pub window_height: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            mouse_sensitivity: sim::MOUSE_SENSITIVITY,
            invert_y: false,
            fov_degrees: 70.0,
            window_width: 1280,
            window_height: 720,
        }
    }
}

impl Settings {
    /// Load from [`SETTINGS_PATH`]. A missing file is the normal first-run
    /// case; a malformed one logs and degrades to defaults, never aborts.
    pub fn load_or_default() -> Self {
        match std::fs::read_to_string(SETTINGS_PATH) {
            Ok(text) => match ron::from_str(&text) {
                Ok(settings) => settings,
                Err(err) => {
                    warn!("Failed to parse {SETTINGS_PATH}: {err}; using defaults");
                    Self::default()
                }
            },
            Err(_) => Self::default(),
        }
    }
}
