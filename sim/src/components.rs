//! Core simulation state: player kinematics, the per-frame input snapshot,
//! and the published HUD metrics.

use bevy::prelude::*;

use crate::player::{EYE_HEIGHT, SPAWN_XZ};
use crate::terrain::TerrainGenerator;

/// Marker for the local player entity
#[derive(Component)]
pub struct LocalPlayer;

/// One frame's worth of control flags, sampled by the client input layer and
/// read-only to the movement controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub run: bool,
    pub jump: bool,
    pub crouch: bool,
}

/// The avatar's kinematic state. `position` is the eye point.
///
/// There is exactly one writer: [`crate::movement::step_player`], invoked once
/// per rendered frame while the view is captured. Nothing else mutates this.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct PlayerKinematics {
    pub position: Vec3,
    pub velocity: Vec3,
    /// Sprint resource, always within `[0, 100]`.
    pub stamina: f32,
    /// Recomputed every update, never carried stale across frames.
    pub grounded: bool,
    /// Seconds until another jump may start. Decreases by `dt` each frame;
    /// only the `<= 0` gate matters, so it is never clamped at zero.
    pub jump_cooldown: f32,
}

impl PlayerKinematics {
    pub const STAMINA_MAX: f32 = 100.0;

    /// Fresh state at the fixed spawn point, eye resting on the terrain.
    pub fn at_spawn(terrain: &TerrainGenerator) -> Self {
        let [x, z] = SPAWN_XZ;
        let y = terrain.get_height(x, z) + EYE_HEIGHT;
        Self {
            position: Vec3::new(x, y, z),
            velocity: Vec3::ZERO,
            stamina: Self::STAMINA_MAX,
            grounded: true,
            jump_cooldown: 0.0,
        }
    }

    /// Horizontal speed magnitude (the HUD's "speed").
    pub fn horizontal_speed(&self) -> f32 {
        Vec2::new(self.velocity.x, self.velocity.z).length()
    }

    /// Derive the per-frame metrics snapshot. Altitude is height above the
    /// ground directly underfoot, not height above sea level.
    pub fn metrics(&self, terrain: &TerrainGenerator, captured: bool) -> Metrics {
        let ground = terrain.get_height(self.position.x, self.position.z);
        Metrics {
            speed: self.horizontal_speed(),
            altitude: self.position.y - ground,
            stamina: self.stamina,
            captured,
        }
    }
}

/// Per-frame HUD snapshot. Overwritten wholesale by the tick system each
/// frame; HUD systems only ever read the latest complete value.
#[derive(Resource, Clone, Copy, Debug, Default, PartialEq)]
pub struct Metrics {
    pub speed: f32,
    pub altitude: f32,
    pub stamina: f32,
    pub captured: bool,
}
