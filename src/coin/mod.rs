//! Coin pickups: cosmetic spin, collection and the shared scoreboard.
//!
//! Every coin adds its value to a single [`Scoreboard`] resource when a
//! `"Player"`-tagged body enters its sensor, then despawns.

use crate::physics::{Tag, TriggerEntered, PLAYER_TAG};
use bevy::prelude::*;
use std::collections::HashSet;

/// A collectible coin.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Coin {
    /// Points added on pickup, at least 1.
    pub value: u32,
    /// Spin speed in degrees per second.
    pub rotation_speed: f32,
}

impl Coin {
    #[must_use]
    pub fn new(value: u32, rotation_speed: f32) -> Self {
        Self { value: value.max(1), rotation_speed }
    }
}

/// Running score shared by every coin. Only ever increases.
#[derive(Resource, Debug, Default)]
pub struct Scoreboard {
    score: u32,
}

impl Scoreboard {
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Add `value` and return the new score. Saturates instead of wrapping.
    pub fn add(&mut self, value: u32) -> u32 {
        self.score = self.score.saturating_add(value);
        self.score
    }
}

/// Spin every coin about its local Z axis.
#[allow(clippy::needless_pass_by_value)]
pub fn spin_coins(time: Res<Time>, mut coins: Query<(&mut Transform, &Coin)>) {
    let dt = time.delta_seconds();
    for (mut tf, coin) in &mut coins {
        tf.rotate_local_z((coin.rotation_speed * dt).to_radians());
    }
}

/// Collect coins entered by the player.
///
/// A coin is consumed at most once: duplicate notifications in the same frame
/// are skipped here, later ones find the coin already despawned.
#[allow(clippy::needless_pass_by_value)]
pub fn collect_coins(
    mut commands: Commands,
    mut triggers: EventReader<TriggerEntered>,
    coins: Query<&Coin>,
    tags: Query<&Tag>,
    mut scoreboard: ResMut<Scoreboard>,
    mut consumed: Local<HashSet<Entity>>,
) {
    consumed.clear();
    for ev in triggers.read() {
        if !tags.get(ev.other).is_ok_and(|t| t.is(PLAYER_TAG)) {
            continue;
        }
        let Ok(coin) = coins.get(ev.sensor) else { continue };
        if !consumed.insert(ev.sensor) {
            continue;
        }
        let score = scoreboard.add(coin.value);
        info!("coin collected (+{}), score {score}", coin.value);
        commands.entity(ev.sensor).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn pickup_app() -> App {
        let mut app = App::new();
        app.add_event::<TriggerEntered>()
            .init_resource::<Scoreboard>()
            .add_systems(Update, collect_coins);
        app
    }

    #[test]
    fn scoreboard_only_increases() {
        let mut board = Scoreboard::default();
        assert_eq!(board.score(), 0);
        assert_eq!(board.add(5), 5);
        assert_eq!(board.add(0), 5);
        board.add(u32::MAX);
        assert_eq!(board.score(), u32::MAX);
    }

    #[test]
    fn coin_value_is_at_least_one() {
        assert_eq!(Coin::new(0, 10.0).value, 1);
        assert_eq!(Coin::new(5, 10.0).value, 5);
    }

    #[test]
    fn coin_of_five_scores_five_and_despawns() {
        let mut app = pickup_app();
        let coin = app.world_mut().spawn(Coin::new(5, 100.0)).id();
        let player = app.world_mut().spawn(Tag::player()).id();

        app.world_mut().send_event(TriggerEntered { sensor: coin, other: player });
        app.update();
        assert_eq!(app.world().resource::<Scoreboard>().score(), 5);
        assert!(app.world().get_entity(coin).is_none());

        app.world_mut().send_event(TriggerEntered { sensor: coin, other: player });
        app.update();
        assert_eq!(app.world().resource::<Scoreboard>().score(), 5);
    }

    #[test]
    fn duplicate_notifications_in_one_frame_count_once() {
        let mut app = pickup_app();
        let coin = app.world_mut().spawn(Coin::new(3, 0.0)).id();
        let player = app.world_mut().spawn(Tag::player()).id();

        app.world_mut().send_event(TriggerEntered { sensor: coin, other: player });
        app.world_mut().send_event(TriggerEntered { sensor: coin, other: player });
        app.update();
        assert_eq!(app.world().resource::<Scoreboard>().score(), 3);
    }

    #[test]
    fn non_player_overlap_is_ignored() {
        let mut app = pickup_app();
        let coin = app.world_mut().spawn(Coin::new(2, 0.0)).id();
        let crate_box = app.world_mut().spawn(Tag::new("player")).id();
        let untagged = app.world_mut().spawn_empty().id();

        app.world_mut().send_event(TriggerEntered { sensor: coin, other: crate_box });
        app.world_mut().send_event(TriggerEntered { sensor: coin, other: untagged });
        app.update();
        assert_eq!(app.world().resource::<Scoreboard>().score(), 0);
        assert!(app.world().get_entity(coin).is_some());
    }

    #[test]
    fn coins_spin_by_speed_times_dt() {
        let mut app = App::new();
        app.init_resource::<Time>().add_systems(Update, spin_coins);
        let coin = app.world_mut().spawn((Transform::default(), Coin::new(1, 90.0))).id();
        app.world_mut().resource_mut::<Time>().advance_by(Duration::from_secs(1));
        app.update();

        let rot = app.world().get::<Transform>(coin).unwrap().rotation;
        let expected = Quat::from_rotation_z(90f32.to_radians());
        assert!(rot.angle_between(expected) < 1e-4);
    }
}
