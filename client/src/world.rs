//! World setup: root entity, lighting, and the first-person camera.

use bevy::light::{light_consts::lux, CascadeShadowConfigBuilder};
use bevy::prelude::*;
use sim::WorldTerrain;

use crate::settings::Settings;

/// Root entity for all terrain chunks and props
#[derive(Component)]
pub struct WorldRoot;

/// Spawn the world root, a fixed late-morning sun, ambient light, and the
/// first-person camera.
pub fn spawn_world(mut commands: Commands, settings: Res<Settings>, terrain: Res<WorldTerrain>) {
    // Parent of terrain chunks / props. Needs the full spatial bundle or
    // Bevy emits B0004 warnings for the children.
    commands.spawn((
        WorldRoot,
        Transform::default(),
        GlobalTransform::default(),
        Visibility::default(),
        InheritedVisibility::default(),
    ));

    commands.spawn((
        DirectionalLight {
            illuminance: lux::FULL_DAYLIGHT,
            shadows_enabled: true,
            color: Color::srgb(1.0, 0.97, 0.9),
            ..default()
        },
        // Three cheaper cascades instead of the default four out to 150m.
        CascadeShadowConfigBuilder {
            num_cascades: 3,
            maximum_distance: 160.0,
            first_cascade_far_bound: 16.0,
            ..default()
        }
        .build(),
        Transform::from_rotation(Quat::from_euler(EulerRot::XYZ, -0.9, 0.5, 0.0)),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::srgb(0.75, 0.8, 0.9),
        brightness: 120.0,
        affects_lightmapped_meshes: true,
    });
    commands.insert_resource(ClearColor(Color::srgb(0.58, 0.70, 0.86)));

    // Parked at the spawn eye point until the first captured frame.
    let spawn = terrain.spawn_position();
    commands.spawn((
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: settings.fov_degrees.to_radians(),
            ..default()
        }),
        Transform::from_translation(spawn),
    ));
}
