//! View capture boundary (pointer lock).
//!
//! Clicking the scene locks the cursor and flips the state machine to
//! `Roaming`; Escape releases it back to `Paused`. Simulation systems are
//! scheduled under `run_if(in_state(GameState::Roaming))`, so while the view
//! is released nothing touches the kinematic state and re-engaging resumes
//! exactly where it left off.

use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};
use sim::Metrics;

use crate::states::GameState;

pub struct CapturePlugin;

impl Plugin for CapturePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(OnEnter(GameState::Roaming), engage_capture);
        app.add_systems(OnEnter(GameState::Paused), release_capture);
        app.add_systems(
            Update,
            request_capture_on_click.run_if(in_state(GameState::Paused)),
        );
        app.add_systems(
            Update,
            release_on_escape.run_if(in_state(GameState::Roaming)),
        );
    }
}

/// Lock and hide the cursor; publish the capture flag.
fn engage_capture(
    windows: Query<Entity, With<PrimaryWindow>>,
    mut cursor_opts: Query<&mut CursorOptions>,
    mut metrics: ResMut<Metrics>,
) {
    let Ok(window_entity) = windows.single() else {
        return;
    };
    if let Ok(mut cursor) = cursor_opts.get_mut(window_entity) {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    }
    metrics.captured = true;
    info!("View captured, simulation running");
}

/// Release the cursor; publish the capture flag.
fn release_capture(
    windows: Query<Entity, With<PrimaryWindow>>,
    mut cursor_opts: Query<&mut CursorOptions>,
    mut metrics: ResMut<Metrics>,
) {
    let Ok(window_entity) = windows.single() else {
        return;
    };
    if let Ok(mut cursor) = cursor_opts.get_mut(window_entity) {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    }
    metrics.captured = false;
    info!("View released, simulation paused");
}

/// Clicking the scene re-captures; clicks on menu buttons are left to the
/// buttons themselves.
fn request_capture_on_click(
    mouse_button: Res<ButtonInput<MouseButton>>,
    buttons: Query<&Interaction, With<Button>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if !mouse_button.just_pressed(MouseButton::Left) {
        return;
    }
    if buttons.iter().any(|i| *i != Interaction::None) {
        return;
    }
    next_state.set(GameState::Roaming);
}

fn release_on_escape(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        next_state.set(GameState::Paused);
    }
}
