//! User interface: score display and debug overlay.
//!
//! The score text is refreshed whenever the scoreboard changes; without a
//! `ScoreDisplay` entity that refresh is a no-op. The debug overlay (F1 by
//! default) shows controller state (contact, jumps, dash cooldown, velocity)
//! and FPS, updated at a fixed interval.

use crate::coin::Scoreboard;
use crate::physics::RigidBody;
use crate::player::{Player, MAX_JUMPS};
use crate::settings::Settings;
use bevy::diagnostic::{Diagnostic, DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;

/// Marker for the score text.
#[derive(Component, Debug, Default)]
pub struct ScoreDisplay;

/// Marker for the debug overlay text.
#[derive(Component, Debug, Default)]
pub struct DebugOverlayText;

/// State for the debug overlay visibility.
#[derive(Resource, Default)]
pub struct DebugOverlayState {
    /// Whether the overlay is currently visible.
    pub visible: bool,
}

#[derive(Resource)]
pub struct DebugOverlayTimer(pub Timer);

impl Default for DebugOverlayTimer {
    fn default() -> Self {
        Self(Timer::from_seconds(0.25, TimerMode::Repeating))
    }
}

#[must_use]
pub fn format_score(score: u32) -> String {
    format!("Score: {score}")
}

/// Spawn the score text in the top-left corner.
pub fn spawn_score_display(mut commands: Commands) {
    commands.spawn((
        TextBundle::from_section(
            format_score(0),
            TextStyle { font_size: 28.0, color: Color::WHITE, ..default() },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        }),
        ScoreDisplay,
    ));
}

/// Write the current score into every `ScoreDisplay` text.
#[allow(clippy::needless_pass_by_value)]
pub fn update_score_display(scoreboard: Res<Scoreboard>, mut texts: Query<&mut Text, With<ScoreDisplay>>) {
    if !scoreboard.is_changed() {
        return;
    }
    let value = format_score(scoreboard.score());
    for mut text in &mut texts {
        if let Some(section) = text.sections.first_mut() {
            section.value.clone_from(&value);
        }
    }
}

/// Spawn the (initially empty) debug overlay text below the score.
pub fn spawn_debug_overlay(mut commands: Commands) {
    commands.init_resource::<DebugOverlayState>();
    commands.init_resource::<DebugOverlayTimer>();
    commands.spawn((
        TextBundle::from_section(
            String::new(),
            TextStyle { font_size: 18.0, color: Color::srgb(0.85, 0.9, 1.0), ..default() },
        )
        .with_style(Style {
            position_type: PositionType::Absolute,
            top: Val::Px(48.0),
            left: Val::Px(12.0),
            ..default()
        }),
        DebugOverlayText,
    ));
}

/// Toggle the debug overlay visibility when the bound key is pressed.
#[allow(clippy::needless_pass_by_value)]
pub fn toggle_debug_overlay(
    mut state: ResMut<DebugOverlayState>,
    input: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
) {
    if input.just_pressed(settings.controls.key_for("toggle_debug", KeyCode::F1)) {
        state.visible = !state.visible;
    }
}

/// Human readable controller state for the overlay.
#[must_use]
pub fn describe_player(player: &Player, body: &RigidBody) -> String {
    let dash = if player.can_dash() {
        "ready".to_string()
    } else {
        format!("{:.1}s", player.dash_cooldown_remaining())
    };
    let v = body.velocity;
    format!(
        "{:?}  jumps {}/{}  dash {}\nvel {:.2} {:.2} {:.2}",
        player.state(),
        player.jump_count,
        MAX_JUMPS,
        dash,
        v.x,
        v.y,
        v.z
    )
}

#[derive(bevy::ecs::system::SystemParam)]
pub struct DebugOverlayCtx<'w, 's> {
    pub diagnostics: Option<Res<'w, DiagnosticsStore>>,
    pub state: Res<'w, DebugOverlayState>,
    pub time: Res<'w, Time>,
    pub timer: ResMut<'w, DebugOverlayTimer>,
    pub text: Query<'w, 's, &'static mut Text, With<DebugOverlayText>>,
    pub player: Query<'w, 's, (&'static Player, &'static RigidBody)>,
}

/// Refresh the overlay text once per timer interval.
pub fn update_debug_overlay(mut ctx: DebugOverlayCtx<'_, '_>) {
    if !ctx.timer.0.tick(ctx.time.delta()).just_finished() {
        return;
    }
    let Ok(mut text) = ctx.text.get_single_mut() else { return };
    let Some(section) = text.sections.first_mut() else { return };

    if !ctx.state.visible {
        section.value.clear();
        return;
    }

    let fps = ctx
        .diagnostics
        .as_ref()
        .and_then(|d| d.get(&FrameTimeDiagnosticsPlugin::FPS))
        .and_then(Diagnostic::smoothed)
        .unwrap_or(0.0);

    let player = ctx
        .player
        .get_single()
        .map_or_else(|_| "no player".to_string(), |(p, b)| describe_player(p, b));

    section.value = format!("FPS {fps:.0}\n{player}");
}
