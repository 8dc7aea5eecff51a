//! Client-side terrain rendering
//!
//! Streams chunk meshes in and out around the player, bounded to the arena.
//! Runs in both states so the world is visible behind the start overlay.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, VertexAttributeValues};
use bevy::prelude::*;
use bevy::render::render_resource::PrimitiveTopology;
use std::collections::HashSet;

use sim::{ChunkCoord, LocalPlayer, PlayerKinematics, WorldTerrain, VIEW_DISTANCE};

use crate::world::WorldRoot;

/// Marker component for terrain chunk entities
#[derive(Component)]
pub struct TerrainChunk {
    pub coord: ChunkCoord,
}

/// Resource tracking which chunks are currently loaded
#[derive(Resource, Default)]
pub struct LoadedChunks {
    pub chunks: HashSet<ChunkCoord>,
}

/// Plugin for terrain rendering
pub struct TerrainPlugin;

impl Plugin for TerrainPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadedChunks>();
        app.init_resource::<WorldTerrain>();
        app.add_systems(
            Update,
            (update_terrain_chunks, spawn_terrain_chunks).chain(),
        );
    }
}

/// Chunks that should currently exist: view radius around the player,
/// restricted to the arena.
fn desired_chunks(player_pos: Vec3) -> HashSet<ChunkCoord> {
    ChunkCoord::from_world_pos(player_pos)
        .chunks_in_radius(VIEW_DISTANCE)
        .into_iter()
        .filter(|coord| coord.in_arena())
        .collect()
}

/// Unload chunks that are out of view range
fn update_terrain_chunks(
    player_query: Query<&PlayerKinematics, With<LocalPlayer>>,
    mut loaded_chunks: ResMut<LoadedChunks>,
    chunk_query: Query<(Entity, &TerrainChunk)>,
    mut commands: Commands,
) {
    let Ok(kin) = player_query.single() else {
        return;
    };

    let desired = desired_chunks(kin.position);
    let chunks_to_unload: Vec<ChunkCoord> = loaded_chunks
        .chunks
        .difference(&desired)
        .cloned()
        .collect();

    for coord in chunks_to_unload {
        for (entity, chunk) in chunk_query.iter() {
            if chunk.coord == coord {
                commands.entity(entity).despawn();
                loaded_chunks.chunks.remove(&coord);
                break;
            }
        }
    }
}

/// Spawn terrain chunks that should be loaded but aren't yet
fn spawn_terrain_chunks(
    player_query: Query<&PlayerKinematics, With<LocalPlayer>>,
    mut loaded_chunks: ResMut<LoadedChunks>,
    terrain: Res<WorldTerrain>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    world_root_query: Query<Entity, With<WorldRoot>>,
    mut commands: Commands,
) {
    let Ok(kin) = player_query.single() else {
        return;
    };
    let Ok(world_root) = world_root_query.single() else {
        return;
    };

    // Limit per frame to avoid stutter
    let mut chunks_spawned = 0;
    let max_chunks_per_frame = 2;

    for coord in desired_chunks(kin.position).iter() {
        if chunks_spawned >= max_chunks_per_frame {
            break;
        }
        if loaded_chunks.chunks.contains(coord) {
            continue;
        }

        let mesh_data = terrain.generator.generate_chunk_vertices(*coord);
        let chunk_pos = coord.world_pos();

        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        );
        mesh.insert_attribute(
            Mesh::ATTRIBUTE_POSITION,
            VertexAttributeValues::Float32x3(mesh_data.positions),
        );
        mesh.insert_attribute(
            Mesh::ATTRIBUTE_NORMAL,
            VertexAttributeValues::Float32x3(mesh_data.normals),
        );
        mesh.insert_attribute(
            Mesh::ATTRIBUTE_UV_0,
            VertexAttributeValues::Float32x2(mesh_data.uvs),
        );
        mesh.insert_attribute(
            Mesh::ATTRIBUTE_COLOR,
            VertexAttributeValues::Float32x4(mesh_data.colors),
        );
        mesh.insert_indices(Indices::U32(mesh_data.indices));

        // Vertex colors carry the grass/rock blend; the material stays white.
        let material = materials.add(StandardMaterial {
            base_color: Color::WHITE,
            perceptual_roughness: 0.95,
            metallic: 0.0,
            ..default()
        });

        let chunk_entity = commands
            .spawn((
                Mesh3d(meshes.add(mesh)),
                MeshMaterial3d(material),
                Transform::from_translation(chunk_pos),
                TerrainChunk { coord: *coord },
            ))
            .id();

        commands.entity(world_root).add_child(chunk_entity);
        loaded_chunks.chunks.insert(*coord);
        chunks_spawned += 1;
    }
}
