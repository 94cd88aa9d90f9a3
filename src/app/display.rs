//! Display-related systems: keeping the window's present mode in step with
//! `Settings.graphics.vsync` so vsync can be toggled by editing the settings file.
use bevy::prelude::*;
use bevy::window::{PresentMode, PrimaryWindow};
use skyhop::settings::Settings;

/// Apply `Settings.graphics.vsync` to the primary window when it changes.
///
/// # Arguments
/// - `settings`: current settings, source of the vsync preference.
/// - `windows`: the primary window whose present mode is updated.
/// - `last`: last applied value, to skip redundant writes.
pub fn sync_vsync_settings(
    settings: Res<Settings>,
    mut windows: Query<&mut Window, With<PrimaryWindow>>,
    mut last: Local<Option<bool>>,
) {
    let desired = settings.graphics.vsync;
    if *last == Some(desired) { return; }

    for mut w in &mut windows {
        w.present_mode = if desired { PresentMode::AutoVsync } else { PresentMode::AutoNoVsync };
    }
    info!("vsync {}", if desired { "on" } else { "off" });
    *last = Some(desired);
}
