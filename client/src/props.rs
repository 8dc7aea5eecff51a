//! Environmental props - boulders, pines, and grass tufts.
//!
//! Placement is deterministic: each chunk seeds its own RNG from the world
//! seed and its coordinate, so a chunk that streams back in regrows exactly
//! the same scatter. All meshes are generated primitives; nothing is loaded
//! from disk.

use bevy::prelude::*;
use noise::{NoiseFn, Perlin};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sim::{ChunkCoord, WorldTerrain, ARENA_HALF_SIZE, CHUNK_SIZE, WORLD_SEED};

use crate::terrain::LoadedChunks;
use crate::world::WorldRoot;

/// Marker for prop entities, tagged with the owning chunk for cleanup
#[derive(Component)]
pub struct EnvironmentProp {
    pub chunk: ChunkCoord,
}

/// Tracks which chunks have had props spawned
#[derive(Resource, Default)]
pub struct LoadedPropChunks {
    pub chunks: std::collections::HashSet<ChunkCoord>,
}

/// Shared handles for the procedural prop meshes and materials
#[derive(Resource)]
pub struct PropAssets {
    pub boulder_mesh: Handle<Mesh>,
    pub trunk_mesh: Handle<Mesh>,
    pub canopy_mesh: Handle<Mesh>,
    pub tuft_mesh: Handle<Mesh>,
    pub rock_material: Handle<StandardMaterial>,
    pub bark_material: Handle<StandardMaterial>,
    pub foliage_material: Handle<StandardMaterial>,
    pub grass_material: Handle<StandardMaterial>,
}

/// Plugin for environmental props
pub struct PropsPlugin;

impl Plugin for PropsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadedPropChunks>();
        app.add_systems(Startup, setup_prop_assets);
        app.add_systems(Update, (spawn_chunk_props, cleanup_chunk_props));
    }
}

/// Build the primitive meshes and materials once at startup
fn setup_prop_assets(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let boulder_mesh = meshes.add(Sphere::new(1.0));
    let trunk_mesh = meshes.add(Cylinder::new(0.18, 2.4));
    let canopy_mesh = meshes.add(Cone {
        radius: 1.6,
        height: 4.2,
    });
    let tuft_mesh = meshes.add(Sphere::new(0.35));

    let rock_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.45, 0.43, 0.41),
        perceptual_roughness: 1.0,
        ..default()
    });
    let bark_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.32, 0.24, 0.16),
        perceptual_roughness: 0.95,
        ..default()
    });
    let foliage_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.16, 0.34, 0.18),
        perceptual_roughness: 0.9,
        ..default()
    });
    let grass_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.34, 0.48, 0.22),
        perceptual_roughness: 0.95,
        ..default()
    });

    commands.insert_resource(PropAssets {
        boulder_mesh,
        trunk_mesh,
        canopy_mesh,
        tuft_mesh,
        rock_material,
        bark_material,
        foliage_material,
        grass_material,
    });

    info!("Generated procedural prop meshes");
}

/// Deterministic RNG seed for a chunk's scatter
fn chunk_seed(coord: ChunkCoord) -> u64 {
    let x = coord.x as u32 as u64;
    let z = coord.z as u32 as u64;
    (WORLD_SEED as u64) ^ (x << 32) ^ z.wrapping_mul(0x9e37_79b9)
}

/// Spawn props for terrain chunks that just streamed in
fn spawn_chunk_props(
    mut commands: Commands,
    terrain: Res<WorldTerrain>,
    prop_assets: Option<Res<PropAssets>>,
    loaded_chunks: Res<LoadedChunks>,
    mut loaded_prop_chunks: ResMut<LoadedPropChunks>,
    world_root_query: Query<Entity, With<WorldRoot>>,
) {
    let Some(assets) = prop_assets else { return };
    let Ok(world_root) = world_root_query.single() else {
        return;
    };

    // Density noise gives woods and clearings instead of uniform scatter.
    let density_noise = Perlin::new(WORLD_SEED.wrapping_add(5000));

    for coord in loaded_chunks.chunks.iter() {
        if loaded_prop_chunks.chunks.contains(coord) {
            continue;
        }
        loaded_prop_chunks.chunks.insert(*coord);

        let origin = coord.world_pos();
        let mut rng = StdRng::seed_from_u64(chunk_seed(*coord));

        for _ in 0..48 {
            let local_x = rng.gen_range(0.0..CHUNK_SIZE);
            let local_z = rng.gen_range(0.0..CHUNK_SIZE);
            let world_x = origin.x + local_x;
            let world_z = origin.z + local_z;

            // Keep clutter out of the boundary strip.
            let edge = ARENA_HALF_SIZE - 2.0;
            if world_x.abs() > edge || world_z.abs() > edge {
                continue;
            }

            let height = terrain.get_height(world_x, world_z);
            let normal = terrain.generator.get_normal(world_x, world_z);
            let density = density_noise
                .get([world_x as f64 * 0.015, world_z as f64 * 0.015])
                as f32;
            let roll: f32 = rng.gen();

            let base = Vec3::new(world_x, height, world_z);
            if normal.y < 0.82 {
                // Steep ground: occasional boulders, nothing rooted.
                if roll < 0.25 {
                    spawn_boulder(&mut commands, &assets, world_root, *coord, base, &mut rng);
                }
            } else if density > 0.15 && roll < 0.45 {
                spawn_pine(&mut commands, &assets, world_root, *coord, base, &mut rng);
            } else if roll < 0.4 {
                spawn_tuft(&mut commands, &assets, world_root, *coord, base, &mut rng);
            }
        }
    }
}

fn spawn_boulder(
    commands: &mut Commands,
    assets: &PropAssets,
    world_root: Entity,
    chunk: ChunkCoord,
    base: Vec3,
    rng: &mut StdRng,
) {
    let scale = Vec3::new(
        rng.gen_range(0.6..1.8),
        rng.gen_range(0.4..1.2),
        rng.gen_range(0.6..1.8),
    );
    let entity = commands
        .spawn((
            EnvironmentProp { chunk },
            Mesh3d(assets.boulder_mesh.clone()),
            MeshMaterial3d(assets.rock_material.clone()),
            // Sunk slightly so irregular ground never shows the underside.
            Transform::from_translation(base - Vec3::Y * 0.2)
                .with_rotation(Quat::from_rotation_y(rng.gen_range(0.0..std::f32::consts::TAU)))
                .with_scale(scale),
        ))
        .id();
    commands.entity(world_root).add_child(entity);
}

fn spawn_pine(
    commands: &mut Commands,
    assets: &PropAssets,
    world_root: Entity,
    chunk: ChunkCoord,
    base: Vec3,
    rng: &mut StdRng,
) {
    let scale = rng.gen_range(0.8..1.5);
    let root = commands
        .spawn((
            EnvironmentProp { chunk },
            Transform::from_translation(base)
                .with_rotation(Quat::from_rotation_y(rng.gen_range(0.0..std::f32::consts::TAU)))
                .with_scale(Vec3::splat(scale)),
            GlobalTransform::default(),
            Visibility::default(),
            InheritedVisibility::default(),
        ))
        .id();

    let trunk = commands
        .spawn((
            Mesh3d(assets.trunk_mesh.clone()),
            MeshMaterial3d(assets.bark_material.clone()),
            Transform::from_xyz(0.0, 1.2, 0.0),
        ))
        .id();
    let canopy = commands
        .spawn((
            Mesh3d(assets.canopy_mesh.clone()),
            MeshMaterial3d(assets.foliage_material.clone()),
            Transform::from_xyz(0.0, 4.2, 0.0),
        ))
        .id();

    commands.entity(root).add_child(trunk);
    commands.entity(root).add_child(canopy);
    commands.entity(world_root).add_child(root);
}

fn spawn_tuft(
    commands: &mut Commands,
    assets: &PropAssets,
    world_root: Entity,
    chunk: ChunkCoord,
    base: Vec3,
    rng: &mut StdRng,
) {
    let scale = Vec3::new(
        rng.gen_range(0.7..1.4),
        rng.gen_range(0.3..0.6),
        rng.gen_range(0.7..1.4),
    );
    let entity = commands
        .spawn((
            EnvironmentProp { chunk },
            Mesh3d(assets.tuft_mesh.clone()),
            MeshMaterial3d(assets.grass_material.clone()),
            Transform::from_translation(base).with_scale(scale),
        ))
        .id();
    commands.entity(world_root).add_child(entity);
}

/// Despawn props whose chunk streamed out
fn cleanup_chunk_props(
    mut commands: Commands,
    loaded_chunks: Res<LoadedChunks>,
    mut loaded_prop_chunks: ResMut<LoadedPropChunks>,
    props: Query<(Entity, &EnvironmentProp)>,
) {
    let stale: Vec<ChunkCoord> = loaded_prop_chunks
        .chunks
        .iter()
        .filter(|coord| !loaded_chunks.chunks.contains(coord))
        .cloned()
        .collect();
    if stale.is_empty() {
        return;
    }

    for (entity, prop) in props.iter() {
        if stale.contains(&prop.chunk) {
            commands.entity(entity).despawn();
        }
    }
    for coord in stale {
        loaded_prop_chunks.chunks.remove(&coord);
    }
}
