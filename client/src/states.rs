//! Game state machine

use bevy::prelude::*;

/// The simulation advances only while the pointer is captured (`Roaming`).
/// `Paused` doubles as the pre-capture start screen and the escape menu;
/// re-capturing resumes from the exact prior kinematic state.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GameState {
    #[default]
    Paused,
    Roaming,
}
