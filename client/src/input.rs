//! Player input handling
//!
//! Samples keyboard and mouse into an [`InputState`] resource once per frame.
//! The movement controller consumes the flag snapshot; the camera and the
//! controller both read the yaw/pitch look orientation.

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;
use sim::InputSnapshot;
use std::f32::consts::FRAC_PI_2;

use crate::settings::Settings;

/// Client-side input state
#[derive(Resource, Default)]
pub struct InputState {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Hold Shift to sprint
    pub run: bool,
    /// Jump request (spacebar)
    pub jump: bool,
    /// Hold Ctrl (or C) to crouch
    pub crouch: bool,
    /// Mouse-controlled yaw
    pub yaw: f32,
    /// Mouse-controlled pitch
    pub pitch: f32,
}

impl InputState {
    /// The frame's control flags, as the movement controller consumes them.
    pub fn snapshot(&self) -> InputSnapshot {
        InputSnapshot {
            forward: self.forward,
            backward: self.backward,
            left: self.left,
            right: self.right,
            run: self.run,
            jump: self.jump,
            crouch: self.crouch,
        }
    }

    /// Camera look orientation derived from yaw/pitch.
    pub fn look_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }
}

/// Handle keyboard input for movement
pub fn handle_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    mut input_state: ResMut<InputState>,
) {
    input_state.forward = keyboard.pressed(KeyCode::KeyW);
    input_state.backward = keyboard.pressed(KeyCode::KeyS);
    input_state.left = keyboard.pressed(KeyCode::KeyA);
    input_state.right = keyboard.pressed(KeyCode::KeyD);
    input_state.run =
        keyboard.pressed(KeyCode::ShiftLeft) || keyboard.pressed(KeyCode::ShiftRight);
    input_state.jump = keyboard.pressed(KeyCode::Space);
    input_state.crouch =
        keyboard.pressed(KeyCode::ControlLeft) || keyboard.pressed(KeyCode::KeyC);
}

/// Handle mouse input for looking around
pub fn handle_mouse_input(
    mut mouse_motion: MessageReader<MouseMotion>,
    settings: Res<Settings>,
    mut input_state: ResMut<InputState>,
) {
    let mut delta = Vec2::ZERO;
    for motion in mouse_motion.read() {
        delta += motion.delta;
    }

    if delta != Vec2::ZERO {
        let pitch_sign = if settings.invert_y { 1.0 } else { -1.0 };
        input_state.yaw -= delta.x * settings.mouse_sensitivity;
        input_state.pitch += delta.y * settings.mouse_sensitivity * pitch_sign;
        // Stop just short of straight up/down; the controller degenerates the
        // movement basis to zero at the poles anyway.
        input_state.pitch = input_state.pitch.clamp(-FRAC_PI_2 + 0.01, FRAC_PI_2 - 0.01);
    }
}
