//! Player movement: camera-relative direction, ground/air velocity policy and facing.
//!
//! Grounded input sets horizontal velocity outright; airborne input eases toward
//! the same target at `air_acceleration`. With no input the player bleeds off
//! horizontal speed on the ground and keeps its momentum in the air.
//!
//! The ground deceleration is `lerp(v, 0, rate * dt)` per frame. It depends on
//! frame rate (many small steps do not equal one large step) and is kept that
//! way so existing tuning values behave the same.

use crate::input::MoveInput;
use crate::physics::{PhysicsBody, RigidBody};
use crate::player::{Player, PlayerCamera};
use crate::settings::{PlayerSettings, Settings};
use bevy::prelude::*;

/// Inputs with a squared length below this count as "no input".
pub const INPUT_DEADZONE_SQ: f32 = 0.01;
/// Blend factor per second used when turning to face the movement direction.
pub const TURN_RATE: f32 = 10.0;

/// Horizontal basis of the camera the input is relative to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraBasis {
    pub forward: Vec3,
    pub right: Vec3,
}

impl CameraBasis {
    #[must_use]
    pub fn from_transform(tf: &GlobalTransform) -> Self {
        Self { forward: *tf.forward(), right: *tf.right() }
    }
}

fn flatten(v: Vec3) -> Vec3 {
    Vec3::new(v.x, 0.0, v.z).normalize_or_zero()
}

/// World-space movement direction for `input`.
///
/// Unit length, or zero when the input (or the combined camera-relative
/// vector) is zero.
#[must_use]
pub fn move_direction(input: Vec2, camera: Option<CameraBasis>) -> Vec3 {
    let raw = match camera {
        Some(basis) => flatten(basis.right) * input.x + flatten(basis.forward) * input.y,
        None => Vec3::new(input.x, 0.0, input.y),
    };
    raw.normalize_or_zero()
}

/// Rotation whose forward axis faces `direction` on the horizontal plane.
fn facing(direction: Vec3) -> Quat {
    Transform::IDENTITY.looking_to(direction, Vec3::Y).rotation
}

fn turn_toward(rotation: &mut Quat, direction: Vec3, dt: f32) {
    if direction == Vec3::ZERO {
        return;
    }
    *rotation = rotation.slerp(facing(direction), (dt * TURN_RATE).clamp(0.0, 1.0));
}

/// Apply one frame of movement policy.
///
/// # Arguments
/// * `grounded` - current contact state
/// * `body` - physics body whose velocity is updated
/// * `rotation` - body orientation, turned toward the movement direction
/// * `input` - latest raw movement vector
/// * `camera` - optional camera basis; world axes are used without one
/// * `dt` - frame time in seconds
/// * `tuning` - speed and acceleration settings
pub fn apply_movement(
    grounded: bool,
    body: &mut impl PhysicsBody,
    rotation: &mut Quat,
    input: Vec2,
    camera: Option<CameraBasis>,
    dt: f32,
    tuning: &PlayerSettings,
) {
    let direction = move_direction(input, camera);
    let has_input = input.length_squared() >= INPUT_DEADZONE_SQ;
    let v = body.velocity();

    match (grounded, has_input) {
        (true, false) => {
            let t = (tuning.ground_deceleration * dt).clamp(0.0, 1.0);
            let horizontal = Vec3::new(v.x, 0.0, v.z).lerp(Vec3::ZERO, t);
            body.set_velocity(Vec3::new(horizontal.x, v.y, horizontal.z));
        }
        (true, true) => {
            body.set_velocity(Vec3::new(direction.x * tuning.speed, v.y, direction.z * tuning.speed));
            turn_toward(rotation, direction, dt);
        }
        (false, true) => {
            let target = Vec3::new(direction.x * tuning.speed, v.y, direction.z * tuning.speed);
            let t = (tuning.air_acceleration * dt).clamp(0.0, 1.0);
            body.set_velocity(v.lerp(target, t));
            turn_toward(rotation, direction, dt);
        }
        (false, false) => {}
    }
}

/// Apply the latest `MoveInput` of this frame to every player.
///
/// Does nothing on frames with no move notification.
#[allow(clippy::needless_pass_by_value)]
pub fn player_move(
    mut moves: EventReader<MoveInput>,
    time: Res<Time>,
    settings: Res<Settings>,
    camera: Query<&GlobalTransform, With<PlayerCamera>>,
    mut players: Query<(&Player, &mut RigidBody, &mut Transform)>,
) {
    let Some(MoveInput(input)) = moves.read().last().copied() else { return };
    let basis = camera.get_single().ok().map(CameraBasis::from_transform);
    let dt = time.delta_seconds();

    for (player, mut body, mut tf) in &mut players {
        apply_movement(player.grounded, &mut *body, &mut tf.rotation, input, basis, dt, &settings.player);
    }
}
