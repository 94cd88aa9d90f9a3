//! Third-person orbit camera and cursor helpers.
//!
//! `orbit_camera_look` turns mouse motion into yaw/pitch on the `OrbitCamera`,
//! `follow_player` places the camera on its orbit around the player, and
//! `cursor_grab` toggles cursor lock. The camera's orientation is also the
//! basis player movement input is relative to.

use bevy::input::mouse::MouseMotion;
use bevy::math::EulerRot;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, PrimaryWindow};

use crate::player::Player;
use crate::settings::{ControlsSettings, Settings};

const CAMERA_MIN_PITCH_DEG: f32 = -80.0;
const CAMERA_MAX_PITCH_DEG: f32 = 10.0;
/// Height above the player's origin the camera aims at.
const LOOK_AT_HEIGHT: f32 = 1.0;

/// Marks the camera player input is relative to.
#[derive(Component, Debug, Default)]
pub struct PlayerCamera;

/// Orbit parameters around the followed player.
///
/// - `yaw`: horizontal angle around the Y axis (radians).
/// - `pitch`: vertical angle, clamped so the camera stays above the horizon-ish.
/// - `distance`: orbit radius in world units.
#[derive(Component, Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self { yaw: 0.0, pitch: -20f32.to_radians(), distance: 8.0 }
    }
}

impl OrbitCamera {
    /// Apply a raw mouse delta (updates yaw/pitch and clamps pitch).
    ///
    /// Public so benchmarks and systems share the same logic.
    pub fn apply_delta(&mut self, delta: Vec2, controls: &ControlsSettings) {
        let scale = controls.mouse_sensitivity / 1000.0;
        self.yaw -= delta.x * scale;
        self.pitch = (self.pitch - delta.y * scale)
            .clamp(CAMERA_MIN_PITCH_DEG.to_radians(), CAMERA_MAX_PITCH_DEG.to_radians());
    }

    #[must_use]
    pub fn rotation(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0)
    }

    /// Camera transform for an orbit around `target`.
    #[must_use]
    pub fn transform_around(&self, target: Vec3) -> Transform {
        let focus = target + Vec3::Y * LOOK_AT_HEIGHT;
        let rotation = self.rotation();
        Transform { translation: focus - rotation * Vec3::NEG_Z * self.distance, rotation, ..default() }
    }
}

/// Apply mouse-look to the orbit camera while the cursor is grabbed.
#[allow(clippy::needless_pass_by_value)]
pub fn orbit_camera_look(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut motion: EventReader<MouseMotion>,
    mut cameras: Query<&mut OrbitCamera>,
    settings: Res<Settings>,
) {
    let mut delta = Vec2::ZERO;
    for ev in motion.read() {
        let mut axis = ev.delta;
        if settings.controls.invert_x { axis.x = -axis.x; }
        if settings.controls.invert_y { axis.y = -axis.y; }
        delta += axis;
    }

    if delta == Vec2::ZERO {
        return;
    }

    let Ok(window) = windows.get_single() else { return };
    if window.cursor.visible {
        return;
    }

    for mut orbit in &mut cameras {
        orbit.apply_delta(delta, &settings.controls);
    }
}

/// Keep the orbit camera positioned around the player.
#[allow(clippy::needless_pass_by_value)]
pub fn follow_player(
    players: Query<&Transform, (With<Player>, Without<OrbitCamera>)>,
    mut cameras: Query<(&mut Transform, &OrbitCamera)>,
) {
    let Ok(target) = players.get_single() else { return };
    for (mut tf, orbit) in &mut cameras {
        *tf = orbit.transform_around(target.translation);
    }
}

/// Grab the cursor on left click, release it on the pause key.
#[allow(clippy::needless_pass_by_value)]
pub fn cursor_grab(
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mb: Res<ButtonInput<MouseButton>>,
    kb: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
) {
    let Ok(mut w) = windows.get_single_mut() else { return };
    if mb.just_pressed(MouseButton::Left) {
        w.cursor.grab_mode = CursorGrabMode::Locked;
        w.cursor.visible = false;
    }

    if kb.just_pressed(settings.controls.key_for("pause", KeyCode::Escape)) {
        w.cursor.grab_mode = CursorGrabMode::None;
        w.cursor.visible = true;
    }
}
