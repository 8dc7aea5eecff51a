//! Local player spawning and the per-frame simulation tick.

use bevy::prelude::*;
use sim::{step_player, LocalPlayer, Metrics, PlayerKinematics, WorldTerrain};

use crate::input::InputState;

/// Spawn the local player at the fixed spawn point, eye resolved against the
/// terrain height field.
pub fn spawn_player(mut commands: Commands, terrain: Res<WorldTerrain>) {
    let kin = PlayerKinematics::at_spawn(&terrain.generator);
    info!("Player spawned at {:?}", kin.position);
    commands.spawn((LocalPlayer, kin));
}

/// Advance the movement controller one frame and overwrite the metrics
/// snapshot. Scheduled only while the view is captured, so pausing freezes
/// the kinematic state exactly as-is.
pub fn tick_player(
    time: Res<Time>,
    input_state: Res<InputState>,
    terrain: Res<WorldTerrain>,
    mut metrics: ResMut<Metrics>,
    mut players: Query<&mut PlayerKinematics, With<LocalPlayer>>,
) {
    let Ok(mut kin) = players.single_mut() else {
        return;
    };

    let snapshot = input_state.snapshot();
    let look = input_state.look_quat();
    step_player(
        &snapshot,
        look,
        &terrain.generator,
        &mut kin,
        time.delta_secs(),
    );

    let captured = metrics.captured;
    *metrics = kin.metrics(&terrain.generator, captured);
}
