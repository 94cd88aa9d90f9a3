//! Player-related presentation systems kept out of `main.rs`.
use bevy::prelude::*;
use skyhop::player::Player;

/// Marks the small point light that travels with the player.
#[derive(Component)]
pub struct PlayerFillLight;

/// Height above the player's origin the fill light hovers at.
const FILL_LIGHT_HEIGHT: f32 = 3.0;

/// Keep the `PlayerFillLight` above the player. No-op without a player.
#[allow(clippy::needless_pass_by_value)]
pub fn update_player_fill_light(
    players: Query<&Transform, (With<Player>, Without<PlayerFillLight>)>,
    mut lights: Query<&mut Transform, With<PlayerFillLight>>,
) {
    let Ok(player) = players.get_single() else { return };
    for mut t in &mut lights {
        t.translation = player.translation + Vec3::Y * FILL_LIGHT_HEIGHT;
    }
}
