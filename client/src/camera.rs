//! First-person camera synchronization.

use bevy::prelude::*;
use sim::{LocalPlayer, PlayerKinematics};

use crate::input::InputState;

/// Write the resolved eye position and look orientation into the camera
/// transform. Runs right after the tick; the controller already damps
/// vertical motion, so the transform is applied directly rather than
/// smoothed a second time.
pub fn sync_camera(
    input_state: Res<InputState>,
    players: Query<&PlayerKinematics, With<LocalPlayer>>,
    mut cameras: Query<&mut Transform, With<Camera3d>>,
) {
    let Ok(kin) = players.single() else {
        return;
    };
    let Ok(mut camera_transform) = cameras.single_mut() else {
        return;
    };

    camera_transform.translation = kin.position;
    camera_transform.rotation = input_state.look_quat();
}
