//! Minimal rigid-body provider: velocity integration and impulses.
//!
//! Bevy ships no physics solver, so the game carries just enough of one to
//! drive the character controller: bodies with a velocity that gravity pulls
//! on, impulses, and an upright lock. Gameplay code talks to bodies through
//! the [`PhysicsBody`] trait only. Contact and trigger detection lives in
//! [`collision`].
pub mod collision;

use bevy::math::EulerRot;
use bevy::prelude::*;

pub use collision::*;

/// Downward acceleration applied to every dynamic body, in units/s².
pub const GRAVITY: f32 = -9.81;

/// Operations the gameplay code needs from a physics body.
pub trait PhysicsBody {
    /// Current linear velocity in world units per second.
    fn velocity(&self) -> Vec3;
    fn set_velocity(&mut self, velocity: Vec3);
    /// Apply an instantaneous change in momentum.
    fn apply_impulse(&mut self, impulse: Vec3);
    /// Freeze rotation about the two horizontal axes so the body stays upright.
    fn lock_upright(&mut self);
    fn is_upright_locked(&self) -> bool;
}

/// Dynamic body integrated by [`integrate_bodies`].
#[derive(Component, Debug, Clone, PartialEq)]
pub struct RigidBody {
    pub velocity: Vec3,
    inverse_mass: f32,
    upright: bool,
}

impl RigidBody {
    /// Create a body with the given mass. A non-positive or non-finite mass
    /// makes the body immovable by impulses.
    #[must_use]
    pub fn new(mass: f32) -> Self {
        let inverse_mass = if mass.is_finite() && mass > 0.0 { mass.recip() } else { 0.0 };
        Self { velocity: Vec3::ZERO, inverse_mass, upright: false }
    }

    #[must_use]
    pub fn upright(mut self) -> Self {
        self.upright = true;
        self
    }

    /// Cancel the velocity component pointing into a surface we were pushed out of.
    pub fn stop_along(&mut self, push: Vec3) {
        let Some(normal) = push.try_normalize() else { return };
        let into = self.velocity.dot(normal);
        if into < 0.0 {
            self.velocity -= normal * into;
        }
    }
}

impl Default for RigidBody {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl PhysicsBody for RigidBody {
    fn velocity(&self) -> Vec3 {
        self.velocity
    }

    fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    fn apply_impulse(&mut self, impulse: Vec3) {
        self.velocity += impulse * self.inverse_mass;
    }

    fn lock_upright(&mut self) {
        self.upright = true;
    }

    fn is_upright_locked(&self) -> bool {
        self.upright
    }
}

/// Strip pitch and roll from `rotation`, keeping only yaw.
#[must_use]
pub fn upright_rotation(rotation: Quat) -> Quat {
    let (yaw, _, _) = rotation.to_euler(EulerRot::YXZ);
    Quat::from_rotation_y(yaw)
}

/// Advance one body by `dt` seconds: gravity, then translation.
pub fn step_body(tf: &mut Transform, body: &mut RigidBody, dt: f32) {
    body.velocity.y += GRAVITY * dt;
    tf.translation += body.velocity * dt;
    if body.upright {
        tf.rotation = upright_rotation(tf.rotation);
    }
}

/// Integrate every dynamic body for this frame.
#[allow(clippy::needless_pass_by_value)]
pub fn integrate_bodies(time: Res<Time>, mut bodies: Query<(&mut Transform, &mut RigidBody)>) {
    let dt = time.delta_seconds();
    if dt <= 0.0 {
        return;
    }
    for (mut tf, mut body) in &mut bodies {
        step_body(&mut tf, &mut body, dt);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn impulse_scales_with_inverse_mass() {
        let mut heavy = RigidBody::new(2.0);
        heavy.apply_impulse(Vec3::new(0.0, 4.0, 0.0));
        assert_eq!(heavy.velocity(), Vec3::new(0.0, 2.0, 0.0));

        let mut fixed = RigidBody::new(0.0);
        fixed.apply_impulse(Vec3::X * 100.0);
        assert_eq!(fixed.velocity(), Vec3::ZERO);
    }

    #[test]
    fn gravity_accelerates_downward() {
        let mut tf = Transform::from_xyz(0.0, 10.0, 0.0);
        let mut body = RigidBody::default();
        step_body(&mut tf, &mut body, 0.5);
        assert!((body.velocity.y - GRAVITY * 0.5).abs() < 1e-6);
        assert!(tf.translation.y < 10.0);
    }

    #[test]
    fn upright_lock_removes_tilt() {
        let mut tf = Transform::from_rotation(Quat::from_euler(EulerRot::YXZ, 1.0, 0.4, -0.3));
        let mut body = RigidBody::default().upright();
        assert!(body.is_upright_locked());
        step_body(&mut tf, &mut body, 0.01);
        let (yaw, pitch, roll) = tf.rotation.to_euler(EulerRot::YXZ);
        assert!((yaw - 1.0).abs() < 1e-4);
        assert!(pitch.abs() < 1e-5);
        assert!(roll.abs() < 1e-5);
    }

    #[test]
    fn stop_along_only_cancels_inward_motion() {
        let mut body = RigidBody::default();
        body.velocity = Vec3::new(3.0, -5.0, 0.0);
        body.stop_along(Vec3::new(0.0, 0.2, 0.0));
        assert_eq!(body.velocity, Vec3::new(3.0, 0.0, 0.0));

        body.velocity = Vec3::new(0.0, 4.0, 0.0);
        body.stop_along(Vec3::new(0.0, 0.2, 0.0));
        assert_eq!(body.velocity, Vec3::new(0.0, 4.0, 0.0));
    }
}
