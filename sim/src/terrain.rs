//! Procedural highland terrain.
//!
//! A deterministic Perlin height field: same seed, same heights, every call.
//! The movement controller relies on this for stable grounding, the client
//! meshes it in chunks, and prop placement samples it for slope filtering.
//!
//! Scale: 1 unit = 1 meter. The playable area is a square arena; movement
//! clamps a few meters short of the edge.

use bevy::prelude::*;
use noise::{NoiseFn, Perlin};

use crate::player::{EYE_HEIGHT, SPAWN_XZ};

/// World generation seed - same seed = same world
pub const WORLD_SEED: u32 = 7;

/// Chunk size in world units (meters)
pub const CHUNK_SIZE: f32 = 48.0;
/// Number of vertices per chunk side
pub const CHUNK_RESOLUTION: usize = 25;
/// Spacing between vertices
pub const VERTEX_SPACING: f32 = CHUNK_SIZE / (CHUNK_RESOLUTION - 1) as f32;

/// Half-extent of the square playable arena
pub const ARENA_HALF_SIZE: f32 = 192.0;
/// The movement clamp stops this far inside the arena edge
pub const ARENA_MARGIN: f32 = 3.0;

/// View distance in chunks around the player
pub const VIEW_DISTANCE: i32 = 4;

/// Clamp a position's planar coordinates into the walkable arena.
/// The vertical component passes through untouched.
pub fn clamp_to_arena(pos: Vec3) -> Vec3 {
    let bound = ARENA_HALF_SIZE - ARENA_MARGIN;
    Vec3::new(
        pos.x.clamp(-bound, bound),
        pos.y,
        pos.z.clamp(-bound, bound),
    )
}

/// Chunk coordinate (integer grid position)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Component)]
pub struct ChunkCoord {
    pub x: i32,
    pub z: i32,
}

impl ChunkCoord {
    pub fn new(x: i32, z: i32) -> Self {
        Self { x, z }
    }

    /// Convert world position to chunk coordinate
    pub fn from_world_pos(pos: Vec3) -> Self {
        Self {
            x: (pos.x / CHUNK_SIZE).floor() as i32,
            z: (pos.z / CHUNK_SIZE).floor() as i32,
        }
    }

    /// Get the world position of the chunk's corner (min x, min z)
    pub fn world_pos(&self) -> Vec3 {
        Vec3::new(self.x as f32 * CHUNK_SIZE, 0.0, self.z as f32 * CHUNK_SIZE)
    }

    /// Get chunks in a radius around this chunk
    pub fn chunks_in_radius(&self, radius: i32) -> Vec<ChunkCoord> {
        let mut chunks = Vec::new();
        for dx in -radius..=radius {
            for dz in -radius..=radius {
                chunks.push(ChunkCoord::new(self.x + dx, self.z + dz));
            }
        }
        chunks
    }

    /// Whether any part of this chunk lies inside the arena.
    pub fn in_arena(&self) -> bool {
        let n = (ARENA_HALF_SIZE / CHUNK_SIZE) as i32;
        self.x >= -n && self.x < n && self.z >= -n && self.z < n
    }
}

/// Terrain generator using layered Perlin noise
pub struct TerrainGenerator {
    swell_noise: Perlin,
    ridge_noise: Perlin,
    knoll_noise: Perlin,
    detail_noise: Perlin,
    #[allow(dead_code)]
    seed: u32,
}

impl TerrainGenerator {
    pub fn new(seed: u32) -> Self {
        Self {
            swell_noise: Perlin::new(seed),
            ridge_noise: Perlin::new(seed.wrapping_add(1000)),
            knoll_noise: Perlin::new(seed.wrapping_add(2000)),
            detail_noise: Perlin::new(seed.wrapping_add(3000)),
            seed,
        }
    }

    /// Get terrain height at a world position.
    ///
    /// Pure and deterministic: queried every frame by the movement controller
    /// and again by chunk meshing, so the two always agree.
    pub fn get_height(&self, x: f32, z: f32) -> f32 {
        // Broad rolling swell across the whole arena.
        let swell_scale = 0.006;
        let swell = self
            .swell_noise
            .get([x as f64 * swell_scale, z as f64 * swell_scale]) as f32;
        let swell_height = swell * 7.0;

        // Long ridge lines: sharp crests at the noise zero-crossings,
        // stretched along x by anisotropic sampling.
        let ridges = self
            .ridge_noise
            .get([x as f64 * 0.007, z as f64 * 0.018]) as f32;
        let ridge_shape = (1.0 - ridges.abs()).powf(2.0);
        // Ridges fade out in the low swells so valley floors stay open.
        let ridge_mask = (swell * 0.5 + 0.5).clamp(0.0, 1.0);
        let ridge_height = ridge_shape * ridge_mask * 9.0;

        // Occasional round knolls.
        let knolls = self
            .knoll_noise
            .get([x as f64 * 0.025, z as f64 * 0.025]) as f32;
        let knoll_height = knolls.max(0.0).powi(2) * 5.0;

        // Fine surface detail.
        let detail = self
            .detail_noise
            .get([x as f64 * 0.08, z as f64 * 0.08]) as f32
            * 0.4;

        8.0 + swell_height + ridge_height + knoll_height + detail
    }

    /// Get the terrain normal at a world position via central differences.
    pub fn get_normal(&self, x: f32, z: f32) -> Vec3 {
        let sample_dist = 0.5;

        let h_left = self.get_height(x - sample_dist, z);
        let h_right = self.get_height(x + sample_dist, z);
        let h_back = self.get_height(x, z - sample_dist);
        let h_front = self.get_height(x, z + sample_dist);

        let dx = (h_right - h_left) / (2.0 * sample_dist);
        let dz = (h_front - h_back) / (2.0 * sample_dist);

        Vec3::new(-dx, 1.0, -dz).normalize()
    }

    /// Generate vertex data for a chunk
    pub fn generate_chunk_vertices(&self, coord: ChunkCoord) -> ChunkMeshData {
        let origin = coord.world_pos();
        let mut positions = Vec::with_capacity(CHUNK_RESOLUTION * CHUNK_RESOLUTION);
        let mut normals = Vec::with_capacity(CHUNK_RESOLUTION * CHUNK_RESOLUTION);
        let mut uvs = Vec::with_capacity(CHUNK_RESOLUTION * CHUNK_RESOLUTION);
        let mut colors = Vec::with_capacity(CHUNK_RESOLUTION * CHUNK_RESOLUTION);
        let mut indices = Vec::new();

        for zi in 0..CHUNK_RESOLUTION {
            for xi in 0..CHUNK_RESOLUTION {
                let local_x = xi as f32 * VERTEX_SPACING;
                let local_z = zi as f32 * VERTEX_SPACING;
                let world_x = origin.x + local_x;
                let world_z = origin.z + local_z;

                let height = self.get_height(world_x, world_z);
                let normal = self.get_normal(world_x, world_z);

                positions.push([local_x, height, local_z]);
                normals.push([normal.x, normal.y, normal.z]);
                uvs.push([local_x / CHUNK_SIZE, local_z / CHUNK_SIZE]);
                colors.push(vertex_color(height, normal.y));
            }
        }

        for zi in 0..(CHUNK_RESOLUTION - 1) {
            for xi in 0..(CHUNK_RESOLUTION - 1) {
                let top_left = (zi * CHUNK_RESOLUTION + xi) as u32;
                let top_right = top_left + 1;
                let bottom_left = top_left + CHUNK_RESOLUTION as u32;
                let bottom_right = bottom_left + 1;

                indices.push(top_left);
                indices.push(bottom_left);
                indices.push(top_right);

                indices.push(top_right);
                indices.push(bottom_left);
                indices.push(bottom_right);
            }
        }

        ChunkMeshData {
            positions,
            normals,
            uvs,
            colors,
            indices,
        }
    }
}

/// Grass on the flats, exposed rock on steep faces, a paler tint up high.
fn vertex_color(height: f32, normal_y: f32) -> [f32; 4] {
    let grass = Vec3::new(0.30, 0.46, 0.24);
    let rock = Vec3::new(0.42, 0.40, 0.38);

    // Slope blend: fully rock below normal.y ~0.78, fully grass above ~0.92.
    let t = ((0.92 - normal_y) / 0.14).clamp(0.0, 1.0);
    let base = grass.lerp(rock, t);

    // Subtle brightening toward the crests.
    let lift = 0.9 + (height / 30.0).clamp(0.0, 1.0) * 0.2;

    [
        (base.x * lift).min(1.0),
        (base.y * lift).min(1.0),
        (base.z * lift).min(1.0),
        1.0,
    ]
}

/// Generated mesh data for a terrain chunk
pub struct ChunkMeshData {
    pub positions: Vec<[f32; 3]>,
    pub normals: Vec<[f32; 3]>,
    pub uvs: Vec<[f32; 2]>,
    pub colors: Vec<[f32; 4]>,
    pub indices: Vec<u32>,
}

/// Resource holding the terrain generator
#[derive(Resource)]
pub struct WorldTerrain {
    pub generator: TerrainGenerator,
}

impl Default for WorldTerrain {
    fn default() -> Self {
        Self {
            generator: TerrainGenerator::new(WORLD_SEED),
        }
    }
}

impl WorldTerrain {
    pub fn get_height(&self, x: f32, z: f32) -> f32 {
        self.generator.get_height(x, z)
    }

    /// The fixed spawn point with its eye height resolved against the field.
    pub fn spawn_position(&self) -> Vec3 {
        let [x, z] = SPAWN_XZ;
        Vec3::new(x, self.get_height(x, z) + EYE_HEIGHT, z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_heights() {
        let a = TerrainGenerator::new(WORLD_SEED);
        let b = TerrainGenerator::new(WORLD_SEED);
        for &(x, z) in &[(0.0, 0.0), (17.3, -88.1), (-150.0, 150.0), (3.25, 4.75)] {
            assert_eq!(a.get_height(x, z), b.get_height(x, z));
        }
    }

    #[test]
    fn different_seeds_differ() {
        let a = TerrainGenerator::new(WORLD_SEED);
        let b = TerrainGenerator::new(WORLD_SEED + 1);
        let spread: f32 = [(1.0, 2.0), (40.0, -9.0), (-63.5, 88.0)]
            .iter()
            .map(|&(x, z)| (a.get_height(x, z) - b.get_height(x, z)).abs())
            .sum();
        assert!(spread > 1e-3);
    }

    #[test]
    fn chunk_mesh_shape() {
        let terrain = TerrainGenerator::new(WORLD_SEED);
        let data = terrain.generate_chunk_vertices(ChunkCoord::new(-1, 2));

        let verts = CHUNK_RESOLUTION * CHUNK_RESOLUTION;
        assert_eq!(data.positions.len(), verts);
        assert_eq!(data.normals.len(), verts);
        assert_eq!(data.uvs.len(), verts);
        assert_eq!(data.colors.len(), verts);
        assert_eq!(data.indices.len(), (CHUNK_RESOLUTION - 1).pow(2) * 6);
        assert!(data.indices.iter().all(|&i| (i as usize) < verts));
    }

    #[test]
    fn normals_are_unit_length() {
        let terrain = TerrainGenerator::new(WORLD_SEED);
        let data = terrain.generate_chunk_vertices(ChunkCoord::new(0, 0));
        for n in &data.normals {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-3);
        }
    }

    #[test]
    fn arena_clamp() {
        let bound = ARENA_HALF_SIZE - ARENA_MARGIN;
        let clamped = clamp_to_arena(Vec3::new(1000.0, 5.0, -1000.0));
        assert_eq!(clamped, Vec3::new(bound, 5.0, -bound));

        let inside = Vec3::new(12.0, 3.0, -40.0);
        assert_eq!(clamp_to_arena(inside), inside);
    }

    #[test]
    fn chunk_coord_round_trip() {
        let coord = ChunkCoord::from_world_pos(Vec3::new(-0.1, 0.0, CHUNK_SIZE + 1.0));
        assert_eq!(coord, ChunkCoord::new(-1, 1));
        assert_eq!(coord.world_pos(), Vec3::new(-CHUNK_SIZE, 0.0, CHUNK_SIZE));

        assert!(ChunkCoord::new(0, 0).in_arena());
        assert!(ChunkCoord::new(-4, 3).in_arena());
        assert!(!ChunkCoord::new(4, 0).in_arena());
        assert!(!ChunkCoord::new(0, -5).in_arena());
    }

    #[test]
    fn spawn_rests_on_the_terrain() {
        let terrain = WorldTerrain::default();
        let spawn = terrain.spawn_position();
        let ground = terrain.get_height(spawn.x, spawn.z);
        assert!((spawn.y - ground - EYE_HEIGHT).abs() < 1e-5);
        assert_eq!(clamp_to_arena(spawn), spawn);
    }
}
