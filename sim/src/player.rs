//! Player tuning constants

/// Base walk speed (units per second)
pub const WALK_SPEED: f32 = 9.5;

/// Eye height above the ground while standing
pub const EYE_HEIGHT: f32 = 1.72;

/// Eye height above the ground while crouched
pub const EYE_HEIGHT_CROUCHED: f32 = 1.05;

/// Mouse sensitivity for look (radians per pixel of motion)
pub const MOUSE_SENSITIVITY: f32 = 0.003;

/// Planar spawn coordinates; the spawn height is resolved against the terrain
pub const SPAWN_XZ: [f32; 2] = [0.0, 24.0];
