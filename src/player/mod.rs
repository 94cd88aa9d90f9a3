//! Player components and systems (camera, movement, jump/dash/ground state).
//!
//! The module provides the `Player` component and convenience re-exports for
//! the player-related systems.
//!
//! # Example:
//!
//! ```ignore
//! // spawn the player body
//! commands.spawn((
//!     PbrBundle::default(),
//!     Player::default(),
//!     RigidBody::default().upright(),
//!     Collider::cuboid(1.0, 2.0, 1.0),
//!     Tag::player(),
//! ));
//! // register systems
//! app.add_systems(Update, (player_jump, player_dash, player_move).chain());
//! ```
pub mod camera;
pub mod movement;
pub mod physics;

use crate::error::ConfigError;
use crate::physics::{PhysicsBody, RigidBody};
use bevy::app::AppExit;
use bevy::prelude::*;

pub use camera::*;
pub use movement::*;
pub use physics::*;

/// One ground jump plus one mid-air jump.
pub const MAX_JUMPS: u8 = 2;

/// Contact state derived from ground collision notifications.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactState {
    Grounded,
    Airborne,
}

/// Component tracking controller state. Velocity lives on the physics body.
#[derive(Component, Debug, Default)]
pub struct Player {
    /// Whether the player is currently touching a `"Ground"` collider.
    pub grounded: bool,
    /// Jumps spent since the last landing, `0..=MAX_JUMPS`.
    pub jump_count: u8,
    /// Running dash cooldown; `None` means dash is available.
    pub dash_cooldown: Option<Timer>,
}

impl Player {
    #[must_use]
    pub fn state(&self) -> ContactState {
        if self.grounded { ContactState::Grounded } else { ContactState::Airborne }
    }

    #[must_use]
    pub fn can_dash(&self) -> bool {
        self.dash_cooldown.is_none()
    }

    /// Seconds until dash is available again (zero when ready).
    #[must_use]
    pub fn dash_cooldown_remaining(&self) -> f32 {
        self.dash_cooldown.as_ref().map_or(0.0, Timer::remaining_secs)
    }
}

/// Check the scene holds a player with a physics body, then lock every
/// player body upright.
///
/// # Errors
/// `ConfigError::MissingCollaborator` when no player exists or a player has no body.
#[allow(clippy::needless_pass_by_value)]
pub fn verify_player(
    mut bodies: Query<&mut RigidBody, With<Player>>,
    players: Query<(), With<Player>>,
    bodiless: Query<(), (With<Player>, Without<RigidBody>)>,
) -> Result<(), ConfigError> {
    if players.is_empty() {
        return Err(ConfigError::MissingCollaborator("player entity"));
    }
    if !bodiless.is_empty() {
        return Err(ConfigError::MissingCollaborator("player rigid body"));
    }
    for mut body in &mut bodies {
        body.lock_upright();
    }
    Ok(())
}

/// Pipe target: log a startup wiring error and shut the app down.
pub fn exit_on_config_error(In(result): In<Result<(), ConfigError>>, mut exit: EventWriter<AppExit>) {
    if let Err(e) = result {
        error!("{e}");
        exit.send(AppExit::error());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn verify_app() -> App {
        let mut app = App::new();
        app.add_event::<AppExit>()
            .add_systems(Update, verify_player.pipe(exit_on_config_error));
        app
    }

    fn exited_with_error(app: &mut App) -> bool {
        app.world_mut().resource_mut::<Events<AppExit>>().drain().any(|e| e.is_error())
    }

    #[test]
    fn fresh_player_is_airborne_with_dash_ready() {
        let p = Player::default();
        assert_eq!(p.state(), ContactState::Airborne);
        assert_eq!(p.jump_count, 0);
        assert!(p.can_dash());
        assert_eq!(p.dash_cooldown_remaining(), 0.0);
    }

    #[test]
    fn missing_player_fails_fast() {
        let mut app = verify_app();
        app.update();
        assert!(exited_with_error(&mut app));
    }

    #[test]
    fn player_without_body_fails_fast() {
        let mut app = verify_app();
        app.world_mut().spawn(Player::default());
        app.update();
        assert!(exited_with_error(&mut app));
    }

    #[test]
    fn wired_player_passes() {
        let mut app = verify_app();
        let p = app.world_mut().spawn((Player::default(), RigidBody::default())).id();
        app.update();
        assert!(!exited_with_error(&mut app));
        assert!(app.world().get::<RigidBody>(p).unwrap().is_upright_locked());
    }
}
