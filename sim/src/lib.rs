//! Simulation core: player kinematics, movement controller, and the
//! procedural terrain height field.
//!
//! Everything in here is headless and deterministic so the movement
//! controller can be tested without a window or renderer. The client crate
//! drives it once per rendered frame.

pub mod components;
pub mod movement;
pub mod player;
pub mod terrain;

pub use components::{InputSnapshot, LocalPlayer, Metrics, PlayerKinematics};
pub use movement::step_player;
pub use player::{EYE_HEIGHT, EYE_HEIGHT_CROUCHED, MOUSE_SENSITIVITY, SPAWN_XZ, WALK_SPEED};
pub use terrain::{
    clamp_to_arena, ChunkCoord, TerrainGenerator, WorldTerrain, ARENA_HALF_SIZE, ARENA_MARGIN,
    CHUNK_SIZE, VIEW_DISTANCE, WORLD_SEED,
};
