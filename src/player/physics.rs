//! Player physics: jumping, dashing, dash cooldown and ground detection.
//!
//! Jumps and dashes are impulses on the player's body, gated by `jump_count`
//! and the dash cooldown timer. Ground state follows collision notifications
//! against colliders tagged `"Ground"`.

use crate::input::{DashPressed, JumpPressed};
use crate::physics::{CollisionEnded, CollisionStarted, PhysicsBody, RigidBody, Tag, GROUND_TAG};
use crate::player::{Player, MAX_JUMPS};
use crate::settings::Settings;
use bevy::prelude::*;
use std::time::Duration;

impl Player {
    /// Jump if any jumps remain before landing.
    ///
    /// Vertical velocity is zeroed before the impulse so every jump reaches the
    /// same height regardless of how fast the player was falling.
    ///
    /// # Returns
    /// Whether the jump fired. At the cap nothing changes.
    pub fn try_jump(&mut self, body: &mut impl PhysicsBody, jump_force: f32) -> bool {
        if self.jump_count >= MAX_JUMPS {
            return false;
        }
        let v = body.velocity();
        body.set_velocity(Vec3::new(v.x, 0.0, v.z));
        body.apply_impulse(Vec3::Y * jump_force);
        self.jump_count += 1;
        true
    }

    /// Dash along `forward` unless the cooldown is running.
    ///
    /// # Returns
    /// Whether the dash fired. On cooldown nothing changes.
    pub fn try_dash(&mut self, body: &mut impl PhysicsBody, forward: Vec3, dash_force: f32, cooldown: Duration) -> bool {
        if !self.can_dash() {
            return false;
        }
        body.apply_impulse(forward.normalize_or_zero() * dash_force);
        if !cooldown.is_zero() {
            self.dash_cooldown = Some(Timer::new(cooldown, TimerMode::Once));
        }
        true
    }

    /// Advance the dash cooldown by `delta`, re-enabling dash once it expires.
    pub fn tick_dash_cooldown(&mut self, delta: Duration) {
        let finished = self
            .dash_cooldown
            .as_mut()
            .is_some_and(|timer| timer.tick(delta).finished());
        if finished {
            self.dash_cooldown = None;
        }
    }

    /// Ground contact began.
    pub fn land(&mut self) {
        self.grounded = true;
        self.jump_count = 0;
    }

    /// Ground contact ended. Jump count is left alone.
    pub fn leave_ground(&mut self) {
        self.grounded = false;
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn player_jump(
    mut jumps: EventReader<JumpPressed>,
    settings: Res<Settings>,
    mut players: Query<(&mut Player, &mut RigidBody)>,
) {
    for _ in jumps.read() {
        for (mut player, mut body) in &mut players {
            if player.try_jump(&mut *body, settings.player.jump_force) {
                debug!("jump {}/{}", player.jump_count, MAX_JUMPS);
            }
        }
    }
}

#[allow(clippy::needless_pass_by_value)]
pub fn player_dash(
    mut dashes: EventReader<DashPressed>,
    settings: Res<Settings>,
    mut players: Query<(&mut Player, &mut RigidBody, &Transform)>,
) {
    let cooldown = settings.player.dash_cooldown_duration();
    for _ in dashes.read() {
        for (mut player, mut body, tf) in &mut players {
            if player.try_dash(&mut *body, *tf.forward(), settings.player.dash_force, cooldown) {
                debug!("dash, cooldown {:.2}s", cooldown.as_secs_f32());
            }
        }
    }
}

/// Tick dash cooldowns with wall-clock time so pausing the game does not stall them.
#[allow(clippy::needless_pass_by_value)]
pub fn tick_dash_cooldown(time: Res<Time<Real>>, mut players: Query<&mut Player>) {
    let delta = time.delta();
    for mut player in &mut players {
        player.tick_dash_cooldown(delta);
    }
}

/// Update contact state from collisions with `"Ground"` colliders.
///
/// Exits are applied before enters so stepping from one ground collider onto
/// another in the same frame leaves the player grounded.
#[allow(clippy::needless_pass_by_value)]
pub fn track_ground_contact(
    mut started: EventReader<CollisionStarted>,
    mut ended: EventReader<CollisionEnded>,
    tags: Query<&Tag>,
    mut players: Query<&mut Player>,
) {
    let is_ground = |e: Entity| tags.get(e).is_ok_and(|t| t.is(GROUND_TAG));

    for ev in ended.read() {
        if is_ground(ev.other)
            && let Ok(mut player) = players.get_mut(ev.body)
        {
            player.leave_ground();
        }
    }
    for ev in started.read() {
        if is_ground(ev.other)
            && let Ok(mut player) = players.get_mut(ev.body)
        {
            player.land();
        }
    }
}
