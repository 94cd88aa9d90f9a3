use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::HashSet;

use bevy::prelude::{KeyCode, Quat, Transform, Vec2, Vec3};
use skyhop::input::{InputManager, KeyBindings};
use skyhop::physics::{step_body, Collider, RigidBody};
use skyhop::player::{apply_movement, CameraBasis, OrbitCamera, Player};
use skyhop::settings::{ControlsSettings, PlayerSettings};

/// Randomized orbit-camera deltas (deterministic LCG) to approximate variable mouse input
fn bench_orbit_camera_random(c: &mut Criterion) {
    let controls = ControlsSettings::default();
    c.bench_function("orbit_camera_random", |b| {
        b.iter(|| {
            let mut orbit = OrbitCamera::default();
            let mut state: u32 = 0x1234_5678;
            for _ in 0..1_000usize {
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                let dx = (((state >> 16) & 0x7fff) as f32 / 32767.0) * 200.0 - 100.0;
                state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
                let dy = (((state >> 16) & 0x7fff) as f32 / 32767.0) * 200.0 - 100.0;
                orbit.apply_delta(black_box(Vec2::new(dx, dy)), &controls);
            }
            black_box((orbit.yaw, orbit.pitch));
        })
    });
}

/// Poll a cycling set of held keys through the input manager.
fn bench_input_poll(c: &mut Criterion) {
    let bindings = KeyBindings::default();
    let frames: Vec<HashSet<KeyCode>> = vec![
        HashSet::new(),
        [KeyCode::KeyW].into(),
        [KeyCode::KeyW, KeyCode::KeyD, KeyCode::Space].into(),
        [KeyCode::KeyA, KeyCode::ShiftLeft].into(),
    ];
    c.bench_function("input_poll", |b| {
        b.iter(|| {
            let mut manager = InputManager::default();
            let mut jumps = 0u32;
            for i in 0..4_000usize {
                let state = manager.poll(&frames[i % frames.len()], &bindings);
                jumps += u32::from(state.jump_pressed);
            }
            black_box(jumps);
        })
    });
}

/// Run the movement policy, a jump and body integration for many frames.
fn bench_player_movement_sim(c: &mut Criterion) {
    let tuning = PlayerSettings::default();
    let camera = CameraBasis { forward: Vec3::new(0.3, -0.4, -0.86), right: Vec3::new(0.94, 0.0, 0.33) };
    let floor = Collider::cuboid(100.0, 1.0, 100.0).bounds(Vec3::new(0.0, -0.5, 0.0));
    let shape = Collider::cuboid(1.0, 2.0, 1.0);

    c.bench_function("player_movement_many_steps", |b| {
        b.iter(|| {
            let mut tf = Transform::from_xyz(0.0, 1.0, 0.0);
            let mut body = RigidBody::default().upright();
            let mut player = Player { grounded: true, ..Default::default() };
            let mut rotation = Quat::IDENTITY;
            let dt = 1.0f32 / 60.0f32;

            for i in 0..5_000usize {
                let input = if i % 300 < 200 { Vec2::new(1.0, 1.0) } else { Vec2::ZERO };
                if i % 120 == 0 {
                    player.try_jump(&mut body, tuning.jump_force);
                }
                apply_movement(player.grounded, &mut body, &mut rotation, input, Some(camera), dt, &tuning);
                step_body(&mut tf, &mut body, dt);
                if let Some(push) = shape.bounds(tf.translation).push_out(&floor) {
                    tf.translation += push;
                    body.stop_along(push);
                    player.land();
                }
            }

            black_box((tf, body, player.jump_count));
        })
    });
}

criterion_group! {
    name = benches;
    config = Criterion::default().sample_size(200);
    targets =
        bench_orbit_camera_random,
        bench_input_poll,
        bench_player_movement_sim
}
criterion_main!(benches);
