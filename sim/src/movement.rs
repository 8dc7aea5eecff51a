//! First-person movement controller.
//!
//! Integrates player velocity under input and gravity, resolves collision
//! against the terrain height field, and runs the stamina/sprint and jump
//! mechanics. One call per rendered frame while the view is captured; the
//! caller skips the call entirely while the pointer is not locked, so pausing
//! freezes the state exactly as-is.

use bevy::prelude::*;

use crate::components::{InputSnapshot, PlayerKinematics};
use crate::player::{EYE_HEIGHT, EYE_HEIGHT_CROUCHED, WALK_SPEED};
use crate::terrain::{clamp_to_arena, TerrainGenerator};

/// Gravity in m/s^2 (subtracted from vertical velocity).
pub const GRAVITY: f32 = 32.0;

/// Sprint speed multiplier.
pub const SPRINT_FACTOR: f32 = 1.75;

/// Crouch speed multiplier.
pub const CROUCH_FACTOR: f32 = 0.45;

/// Sprinting requires stamina strictly above this.
pub const SPRINT_MIN_STAMINA: f32 = 5.0;

/// Stamina drained per second while sprinting and moving.
pub const STAMINA_DRAIN: f32 = 32.0;

/// Stamina regenerated per second otherwise.
pub const STAMINA_REGEN: f32 = 20.0;

/// Exponential approach rate toward the target velocity with movement intent.
pub const ACCEL_RATE: f32 = 8.0;

/// Approach rate while braking to rest.
pub const BRAKE_RATE: f32 = 5.5;

/// Upward launch speed on jump, m/s.
pub const JUMP_VELOCITY: f32 = 12.5;

/// Seconds between jumps.
pub const JUMP_COOLDOWN: f32 = 0.35;

/// Rate at which the eye height is damped onto the ground target.
pub const GROUND_DAMP_RATE: f32 = 18.0;

/// Upper bound on a single integration step. Long frame gaps (tab switches,
/// debugger stalls) are clamped here instead of destabilizing the integrator.
pub const MAX_STEP_DT: f32 = 0.05;

/// Desired-direction vectors shorter than this (squared) count as no intent.
const MOVE_EPSILON_SQ: f32 = 1e-3;

/// Normalization guard for a near-vertical look direction.
const DIR_EPSILON_SQ: f32 = 1e-6;

/// Advance the player one frame.
///
/// - Derives the movement basis from the look orientation (vertical component
///   flattened out)
/// - Damps horizontal velocity toward the input-gated target speed
/// - Runs the stamina drain/regen machine and the jump cooldown
/// - Applies gravity, integrates, clamps to the arena, and resolves the eye
///   height against the terrain underfoot
///
/// `dt <= 0` leaves the state bit-for-bit unchanged.
pub fn step_player(
    input: &InputSnapshot,
    look: Quat,
    terrain: &TerrainGenerator,
    kin: &mut PlayerKinematics,
    dt: f32,
) {
    if dt <= 0.0 {
        return;
    }
    let dt = dt.min(MAX_STEP_DT);

    kin.jump_cooldown -= dt;

    // --- Movement basis from the look orientation ---
    // Forward is the flattened look direction; looking straight up or down
    // degenerates to zero rather than normalizing a near-zero vector.
    let mut forward = look * Vec3::NEG_Z;
    forward.y = 0.0;
    forward = if forward.length_squared() > DIR_EPSILON_SQ {
        forward.normalize()
    } else {
        Vec3::ZERO
    };
    let side = Vec3::Y.cross(forward);
    let side = if side.length_squared() > DIR_EPSILON_SQ {
        side.normalize()
    } else {
        Vec3::ZERO
    };

    // --- Desired horizontal direction ---
    let mut move_dir = Vec3::ZERO;
    if input.forward {
        move_dir += forward;
    }
    if input.backward {
        move_dir -= forward;
    }
    if input.left {
        move_dir += side;
    }
    if input.right {
        move_dir -= side;
    }

    let has_intent = move_dir.length_squared() > MOVE_EPSILON_SQ;
    if has_intent {
        move_dir = move_dir.normalize();
    } else {
        move_dir = Vec3::ZERO;
    }

    // --- Speed model ---
    let sprinting = input.run && kin.stamina > SPRINT_MIN_STAMINA && !input.crouch;
    let mut speed = WALK_SPEED;
    if input.crouch {
        speed *= CROUCH_FACTOR;
    }
    if sprinting {
        speed *= SPRINT_FACTOR;
    }
    let target = move_dir * speed;

    // --- Horizontal integration ---
    // Frame-rate-independent exponential approach toward the target:
    // v' = target + (v - target) * exp(-rate * dt)
    let rate = if has_intent { ACCEL_RATE } else { BRAKE_RATE };
    let decay = (-rate * dt).exp();
    kin.velocity.x = target.x + (kin.velocity.x - target.x) * decay;
    kin.velocity.z = target.z + (kin.velocity.z - target.z) * decay;

    // --- Stamina ---
    if sprinting && has_intent {
        kin.stamina = (kin.stamina - STAMINA_DRAIN * dt).max(0.0);
    } else {
        kin.stamina = (kin.stamina + STAMINA_REGEN * dt).min(PlayerKinematics::STAMINA_MAX);
    }

    // --- Jump ---
    if input.jump && kin.grounded && kin.jump_cooldown <= 0.0 {
        kin.velocity.y = JUMP_VELOCITY;
        kin.grounded = false;
        kin.jump_cooldown = JUMP_COOLDOWN;
    }

    // --- Gravity ---
    kin.velocity.y -= GRAVITY * dt;

    // --- Integrate & arena bounds ---
    kin.position += kin.velocity * dt;
    // Hard stop at the boundary: position is clamped, velocity is left
    // pushing into the wall (no bounce, no reflection).
    kin.position = clamp_to_arena(kin.position);

    // --- Ground resolution ---
    let eye = if input.crouch {
        EYE_HEIGHT_CROUCHED
    } else {
        EYE_HEIGHT
    };
    let target_y = terrain.get_height(kin.position.x, kin.position.z) + eye;
    if kin.position.y <= target_y {
        kin.position.y = target_y + (kin.position.y - target_y) * (-GROUND_DAMP_RATE * dt).exp();
        kin.velocity.y = 0.0;
        kin.grounded = true;
    } else {
        kin.grounded = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::SPAWN_XZ;
    use crate::terrain::{ARENA_HALF_SIZE, ARENA_MARGIN, WORLD_SEED};

    const DT: f32 = 0.016;

    fn terrain() -> TerrainGenerator {
        TerrainGenerator::new(WORLD_SEED)
    }

    fn spawned() -> (TerrainGenerator, PlayerKinematics) {
        let terrain = terrain();
        let kin = PlayerKinematics::at_spawn(&terrain);
        (terrain, kin)
    }

    fn forward_input() -> InputSnapshot {
        InputSnapshot {
            forward: true,
            ..Default::default()
        }
    }

    #[test]
    fn zero_dt_is_a_noop() {
        let (terrain, mut kin) = spawned();
        kin.velocity = Vec3::new(3.0, -1.0, 2.0);
        kin.stamina = 42.5;
        kin.jump_cooldown = 0.2;
        let before = kin.clone();

        step_player(&forward_input(), Quat::IDENTITY, &terrain, &mut kin, 0.0);
        assert_eq!(kin, before);

        step_player(&forward_input(), Quat::IDENTITY, &terrain, &mut kin, -1.0);
        assert_eq!(kin, before);
    }

    #[test]
    fn walk_speed_after_one_frame() {
        // Scenario A: from rest, one forward frame reaches
        // 9.5 * (1 - exp(-8 * dt)) along the flattened look direction only.
        let (terrain, mut kin) = spawned();
        step_player(&forward_input(), Quat::IDENTITY, &terrain, &mut kin, DT);

        let expected = WALK_SPEED * (1.0 - (-ACCEL_RATE * DT).exp());
        assert!((kin.horizontal_speed() - expected).abs() < 1e-4);
        // Identity look faces -Z, so all of it is in z.
        assert!(kin.velocity.x.abs() < 1e-6);
        assert!((kin.velocity.z + expected).abs() < 1e-4);
    }

    #[test]
    fn look_yaw_steers_the_motion() {
        let (terrain, mut kin) = spawned();
        // Facing +X (yaw of -90 degrees).
        let look = Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2);
        step_player(&forward_input(), look, &terrain, &mut kin, DT);

        assert!(kin.velocity.x > 0.0);
        assert!(kin.velocity.z.abs() < 1e-4);
    }

    #[test]
    fn pitch_does_not_leak_into_speed() {
        // Looking 60 degrees down must not slow horizontal movement: the
        // forward vector is flattened and renormalized.
        let (terrain, mut kin) = spawned();
        let look = Quat::from_euler(EulerRot::YXZ, 0.0, -1.0, 0.0);
        step_player(&forward_input(), look, &terrain, &mut kin, DT);

        let expected = WALK_SPEED * (1.0 - (-ACCEL_RATE * DT).exp());
        assert!((kin.horizontal_speed() - expected).abs() < 1e-3);
    }

    #[test]
    fn vertical_look_degenerates_to_no_motion() {
        let (terrain, mut kin) = spawned();
        let look = Quat::from_euler(EulerRot::YXZ, 0.3, -std::f32::consts::FRAC_PI_2, 0.0);
        step_player(&forward_input(), look, &terrain, &mut kin, DT);

        assert!(kin.position.is_finite());
        assert!(kin.velocity.is_finite());
        assert!(kin.horizontal_speed() < 1e-3);
    }

    #[test]
    fn sprint_multiplier_gating() {
        let run_forward = InputSnapshot {
            forward: true,
            run: true,
            ..Default::default()
        };
        let expected_factor = |factor: f32| factor * WALK_SPEED * (1.0 - (-ACCEL_RATE * DT).exp());

        // Eligible: run + stamina above threshold + not crouched.
        let (terrain, mut kin) = spawned();
        step_player(&run_forward, Quat::IDENTITY, &terrain, &mut kin, DT);
        assert!((kin.horizontal_speed() - expected_factor(SPRINT_FACTOR)).abs() < 1e-3);

        // Stamina at the threshold (not strictly above): plain walk speed.
        let (terrain, mut kin) = spawned();
        kin.stamina = SPRINT_MIN_STAMINA;
        step_player(&run_forward, Quat::IDENTITY, &terrain, &mut kin, DT);
        assert!((kin.horizontal_speed() - expected_factor(1.0)).abs() < 1e-3);

        // Crouching cancels sprint; only the crouch factor applies.
        let (terrain, mut kin) = spawned();
        let crouch_run = InputSnapshot {
            crouch: true,
            ..run_forward
        };
        step_player(&crouch_run, Quat::IDENTITY, &terrain, &mut kin, DT);
        assert!((kin.horizontal_speed() - expected_factor(CROUCH_FACTOR)).abs() < 1e-3);
    }

    #[test]
    fn sprint_drains_to_four_over_three_seconds() {
        // Scenario B: 60 steps of 0.05s = 3.0s of sprinting from full stamina.
        // The final eligible frame starts at 5.6 and drains through the gate.
        let (terrain, mut kin) = spawned();
        let input = InputSnapshot {
            forward: true,
            run: true,
            ..Default::default()
        };
        for _ in 0..60 {
            step_player(&input, Quat::IDENTITY, &terrain, &mut kin, 0.05);
        }
        assert!((kin.stamina - 4.0).abs() < 1e-3);

        // Next frame the gate fails and stamina regenerates instead.
        step_player(&input, Quat::IDENTITY, &terrain, &mut kin, 0.05);
        assert!((kin.stamina - 5.0).abs() < 1e-3);
    }

    #[test]
    fn stamina_stays_in_bounds() {
        let (terrain, mut kin) = spawned();
        let sprint = InputSnapshot {
            forward: true,
            run: true,
            ..Default::default()
        };
        let rest = InputSnapshot::default();
        for i in 0..1200 {
            // Long sprint bursts with short rests; crosses both rails.
            let input = if i % 300 < 260 { sprint } else { rest };
            step_player(&input, Quat::IDENTITY, &terrain, &mut kin, 0.05);
            assert!(kin.stamina >= 0.0 && kin.stamina <= PlayerKinematics::STAMINA_MAX);
        }
    }

    #[test]
    fn jump_requires_ground_and_cooldown() {
        let (terrain, mut kin) = spawned();
        let jump = InputSnapshot {
            jump: true,
            ..Default::default()
        };

        step_player(&jump, Quat::IDENTITY, &terrain, &mut kin, DT);
        assert!(!kin.grounded);
        assert!((kin.jump_cooldown - JUMP_COOLDOWN).abs() < 1e-6);
        // Launch velocity minus one frame of gravity.
        assert!((kin.velocity.y - (JUMP_VELOCITY - GRAVITY * DT)).abs() < 1e-4);

        // Airborne: holding jump does nothing.
        let vy = kin.velocity.y;
        step_player(&jump, Quat::IDENTITY, &terrain, &mut kin, DT);
        assert!(kin.velocity.y < vy);

        // Grounded but still cooling down: no relaunch.
        let (terrain, mut kin) = spawned();
        kin.jump_cooldown = 0.2;
        step_player(&jump, Quat::IDENTITY, &terrain, &mut kin, DT);
        assert!(kin.grounded);
        assert_eq!(kin.velocity.y, 0.0);
        assert!((kin.jump_cooldown - (0.2 - DT)).abs() < 1e-6);
    }

    #[test]
    fn gravity_applies_on_the_clamped_step() {
        // Scenario C: airborne with vy = 0 and a pathological dt of 1s; the
        // step clamps to 0.05s, so gravity contributes -32 * 0.05.
        let (terrain, mut kin) = spawned();
        kin.position.y += 50.0;
        kin.grounded = false;
        step_player(&InputSnapshot::default(), Quat::IDENTITY, &terrain, &mut kin, 1.0);

        assert!((kin.velocity.y + GRAVITY * MAX_STEP_DT).abs() < 1e-4);
        assert!(!kin.grounded);
    }

    #[test]
    fn landing_zeroes_vertical_velocity() {
        let (terrain, mut kin) = spawned();
        kin.position.y += 0.01;
        kin.velocity.y = -6.0;
        kin.grounded = false;
        step_player(&InputSnapshot::default(), Quat::IDENTITY, &terrain, &mut kin, DT);

        assert!(kin.grounded);
        assert_eq!(kin.velocity.y, 0.0);
        // Damped toward the eye target from below, not snapped past it.
        let target = terrain.get_height(kin.position.x, kin.position.z) + EYE_HEIGHT;
        assert!(kin.position.y <= target + 1e-5);
    }

    #[test]
    fn crouch_lowers_the_eye_target() {
        let (terrain, mut kin) = spawned();
        let crouch = InputSnapshot {
            crouch: true,
            ..Default::default()
        };
        // Settle for a while; the eye converges near the crouched target.
        for _ in 0..120 {
            step_player(&crouch, Quat::IDENTITY, &terrain, &mut kin, DT);
        }
        let ground = terrain.get_height(kin.position.x, kin.position.z);
        let above = kin.position.y - ground;
        assert!(above < EYE_HEIGHT_CROUCHED + 0.01);
        assert!(above > EYE_HEIGHT_CROUCHED - 0.2);
    }

    #[test]
    fn boundary_clamp_keeps_velocity() {
        // Scenario D: pressed against the +x wall and still pushing into it.
        // Position lands exactly on the clamp bound; velocity is not zeroed
        // or reflected (intentional, see DESIGN.md).
        let bound = ARENA_HALF_SIZE - ARENA_MARGIN;
        let (terrain, mut kin) = spawned();
        kin.position.x = bound;
        kin.velocity.x = 20.0;
        step_player(&InputSnapshot::default(), Quat::IDENTITY, &terrain, &mut kin, DT);

        assert_eq!(kin.position.x, bound);
        assert!(kin.velocity.x > 0.0);
    }

    #[test]
    fn position_stays_inside_the_arena() {
        let (terrain, mut kin) = spawned();
        let input = InputSnapshot {
            forward: true,
            run: true,
            ..Default::default()
        };
        // Run at the wall for well over the time needed to reach it.
        let look = Quat::from_rotation_y(-std::f32::consts::FRAC_PI_2);
        for _ in 0..2400 {
            step_player(&input, look, &terrain, &mut kin, 0.05);
            let bound = ARENA_HALF_SIZE - ARENA_MARGIN;
            assert!(kin.position.x >= -bound && kin.position.x <= bound);
            assert!(kin.position.z >= -bound && kin.position.z <= bound);
        }
        assert_eq!(kin.position.x, ARENA_HALF_SIZE - ARENA_MARGIN);
    }

    #[test]
    fn braking_decays_toward_rest() {
        let (terrain, mut kin) = spawned();
        kin.velocity.x = 8.0;
        step_player(&InputSnapshot::default(), Quat::IDENTITY, &terrain, &mut kin, DT);

        let expected = 8.0 * (-BRAKE_RATE * DT).exp();
        assert!((kin.velocity.x - expected).abs() < 1e-4);
    }

    #[test]
    fn diagonal_input_is_renormalized() {
        let (terrain, mut kin) = spawned();
        let diagonal = InputSnapshot {
            forward: true,
            left: true,
            ..Default::default()
        };
        step_player(&diagonal, Quat::IDENTITY, &terrain, &mut kin, DT);

        let expected = WALK_SPEED * (1.0 - (-ACCEL_RATE * DT).exp());
        assert!((kin.horizontal_speed() - expected).abs() < 1e-3);
    }

    #[test]
    fn opposed_inputs_cancel_to_no_intent() {
        let (terrain, mut kin) = spawned();
        kin.velocity.x = 4.0;
        let opposed = InputSnapshot {
            forward: true,
            backward: true,
            ..Default::default()
        };
        step_player(&opposed, Quat::IDENTITY, &terrain, &mut kin, DT);

        // Cancelled flags brake exactly like no input at all.
        let expected = 4.0 * (-BRAKE_RATE * DT).exp();
        assert!((kin.velocity.x - expected).abs() < 1e-4);
    }

    #[test]
    fn metrics_mirror_the_kinematics() {
        let (terrain, mut kin) = spawned();
        kin.velocity = Vec3::new(3.0, -7.0, 4.0);
        kin.stamina = 61.0;
        let metrics = kin.metrics(&terrain, true);

        assert!((metrics.speed - 5.0).abs() < 1e-5);
        assert_eq!(metrics.stamina, 61.0);
        assert!(metrics.captured);
        let ground = terrain.get_height(SPAWN_XZ[0], SPAWN_XZ[1]);
        assert!((metrics.altitude - (kin.position.y - ground)).abs() < 1e-5);
    }
}
