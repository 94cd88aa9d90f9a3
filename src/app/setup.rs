//! Startup system that builds the playground scene.
//!
//! Spawns a ground slab and a few floating platforms (all tagged `"Ground"`),
//! the player body, the orbit camera, lights and a ring of coins. Coin and
//! player tuning come from the loaded `Settings`.
use bevy::prelude::*;
use skyhop::coin::Coin;
use skyhop::physics::{Collider, RigidBody, Sensor, Tag};
use skyhop::player::{OrbitCamera, Player, PlayerCamera};
use skyhop::settings::Settings;
use std::f32::consts::TAU;

use crate::app::player::PlayerFillLight;

const PLAYER_SIZE: Vec3 = Vec3::new(1.0, 2.0, 1.0);
const COIN_RING_RADIUS: f32 = 9.0;
const COIN_COUNT: usize = 12;

/// Platforms as `(center, size)`.
const PLATFORMS: [(Vec3, Vec3); 4] = [
    (Vec3::new(0.0, -0.5, 0.0), Vec3::new(60.0, 1.0, 60.0)),
    (Vec3::new(6.0, 1.5, -6.0), Vec3::new(4.0, 1.0, 4.0)),
    (Vec3::new(-7.0, 3.0, -3.0), Vec3::new(3.0, 1.0, 3.0)),
    (Vec3::new(0.0, 4.5, -12.0), Vec3::new(5.0, 1.0, 3.0)),
];

/// Spawn the playground.
///
/// # Arguments
/// - `commands`: used to spawn every scene entity.
/// - `meshes`: mesh storage for platform, player and coin meshes.
/// - `materials`: standard materials for the same.
/// - `settings`: coin value and spin speed.
#[allow(clippy::needless_pass_by_value)]
pub fn setup(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    settings: Res<Settings>,
) {
    let ground_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.35, 0.55, 0.3),
        perceptual_roughness: 0.9,
        ..default()
    });
    for (center, size) in PLATFORMS {
        commands.spawn((
            PbrBundle {
                mesh: meshes.add(Cuboid::from_size(size)),
                material: ground_material.clone(),
                transform: Transform::from_translation(center),
                ..default()
            },
            Collider::cuboid(size.x, size.y, size.z),
            Tag::ground(),
        ));
    }

    commands.spawn((
        PbrBundle {
            mesh: meshes.add(Capsule3d::new(PLAYER_SIZE.x * 0.5, PLAYER_SIZE.y - PLAYER_SIZE.x)),
            material: materials.add(StandardMaterial {
                base_color: Color::srgb(0.2, 0.4, 0.9),
                ..default()
            }),
            transform: Transform::from_xyz(0.0, 3.0, 0.0),
            ..default()
        },
        Player::default(),
        RigidBody::default().upright(),
        Collider::cuboid(PLAYER_SIZE.x, PLAYER_SIZE.y, PLAYER_SIZE.z),
        Tag::player(),
    ));

    let orbit = OrbitCamera::default();
    commands.spawn((
        Camera3dBundle {
            transform: orbit.transform_around(Vec3::new(0.0, 3.0, 0.0)),
            ..default()
        },
        orbit,
        PlayerCamera,
    ));

    let coin_mesh = meshes.add(Cylinder::new(0.4, 0.08));
    let coin_material = materials.add(StandardMaterial {
        base_color: Color::srgb(1.0, 0.84, 0.0),
        metallic: 0.9,
        perceptual_roughness: 0.25,
        ..default()
    });
    #[allow(clippy::cast_precision_loss)]
    for i in 0..COIN_COUNT {
        let angle = TAU * i as f32 / COIN_COUNT as f32;
        let position = Vec3::new(angle.cos() * COIN_RING_RADIUS, 1.0, angle.sin() * COIN_RING_RADIUS);
        commands.spawn((
            PbrBundle {
                mesh: coin_mesh.clone(),
                material: coin_material.clone(),
                // stand the disc on its edge so the local Z spin reads as a flip
                transform: Transform::from_translation(position)
                    .with_rotation(Quat::from_rotation_x(std::f32::consts::FRAC_PI_2)),
                ..default()
            },
            Coin::new(settings.coins.value, settings.coins.rotation_speed),
            Collider::sphere(0.5),
            Sensor,
        ));
    }

    commands.spawn(DirectionalLightBundle {
        directional_light: DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: true,
            ..default()
        },
        transform: Transform::from_xyz(10.0, 20.0, 10.0).looking_at(Vec3::ZERO, Vec3::Y),
        ..default()
    });

    commands.spawn((
        PointLightBundle {
            point_light: PointLight {
                intensity: 4000.0,
                range: 20.0,
                color: Color::srgb(0.9, 0.92, 1.0),
                shadows_enabled: false,
                ..default()
            },
            transform: Transform::from_xyz(0.0, 6.0, 0.0),
            ..default()
        },
        PlayerFillLight,
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
    });

    info!("spawned playground with {COIN_COUNT} coins worth {} each", settings.coins.value);
}
