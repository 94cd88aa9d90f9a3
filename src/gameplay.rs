//! Gameplay plugin: events, resources and per-frame system ordering.
//!
//! Frame order: input → player actions and movement → physics integration →
//! contact detection → ground state and coin pickups. Everything in the chain
//! runs on Bevy's `Update` schedule, so each piece of shared state has one
//! writer at a time.

use crate::coin::{collect_coins, spin_coins, Scoreboard};
use crate::input::{poll_input, DashPressed, InputManager, JumpPressed, MoveInput};
use crate::physics::{
    detect_contacts, integrate_bodies, CollisionEnded, CollisionStarted, Contacts, TriggerEntered,
    TriggerExited,
};
use crate::player::{player_dash, player_jump, player_move, tick_dash_cooldown, track_ground_contact};
use crate::ui::update_score_display;
use bevy::prelude::*;

/// Ordered phases of a gameplay frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Poll the keyboard and emit move/jump/dash events.
    Input,
    /// Apply jump, dash and movement to the player body.
    Player,
    /// Integrate bodies and detect contacts.
    Physics,
    /// React to contacts: ground state, coin pickups, score display.
    Reactions,
}

/// Registers the character controller, coins and the built-in physics.
///
/// Expects a `Settings` resource and Bevy's input and time resources.
pub struct GameplayPlugin;

impl Plugin for GameplayPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<MoveInput>()
            .add_event::<JumpPressed>()
            .add_event::<DashPressed>()
            .add_event::<CollisionStarted>()
            .add_event::<CollisionEnded>()
            .add_event::<TriggerEntered>()
            .add_event::<TriggerExited>()
            .init_resource::<InputManager>()
            .init_resource::<Scoreboard>()
            .init_resource::<Contacts>();

        app.configure_sets(
            Update,
            (
                GameplaySet::Input,
                GameplaySet::Player,
                GameplaySet::Physics,
                GameplaySet::Reactions,
            )
                .chain(),
        );

        app.add_systems(Update, poll_input.in_set(GameplaySet::Input))
            .add_systems(
                Update,
                (player_jump, player_dash, player_move).chain().in_set(GameplaySet::Player),
            )
            .add_systems(
                Update,
                (integrate_bodies, detect_contacts).chain().in_set(GameplaySet::Physics),
            )
            .add_systems(
                Update,
                (track_ground_contact, collect_coins, update_score_display)
                    .chain()
                    .in_set(GameplaySet::Reactions),
            )
            .add_systems(Update, tick_dash_cooldown.before(GameplaySet::Player))
            .add_systems(Update, spin_coins);
    }
}
