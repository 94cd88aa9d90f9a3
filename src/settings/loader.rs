//! Settings loading and hot-reloading.
//!
//! Settings are loaded from RON files in the `data/settings` directory. If multiple
//! RON files are present, the first successfully parsed `Settings` will be used.
//! If no RON files are found or none parse, default settings are used. Loaded
//! settings are validated; a bad file at startup is fatal, a bad file during a
//! hot reload is logged and ignored.
use crate::error::ConfigError;
use crate::ron_loader::{load_ron_files, setup_ron_watcher};
use crate::settings::Settings;
use bevy::prelude::*;

/// Directory the binary reads settings from.
pub const SETTINGS_DIR: &str = "data/settings";

#[derive(Resource)]
pub struct SettingsWatcher {
    pub watcher: crate::ron::RonWatcher,
    pub dir: String,
}

/// Load and validate settings from `path` (directory).
///
/// # Errors
/// Returns the `ConfigError` from [`Settings::validate`] when the chosen file
/// holds out-of-range values.
///
/// # Example
/// ```no_run
/// let settings = skyhop::settings::loader::load_settings_from_dir("data/settings")
///     .expect("valid settings");
/// ```
pub fn load_settings_from_dir(path: &str) -> Result<Settings, ConfigError> {
    let items: Vec<Settings> = load_ron_files(path);
    let settings = items.into_iter().next().unwrap_or_else(Settings::defaults);
    settings.validate()?;
    Ok(settings)
}

/// Create a watcher for the settings directory (hot-reload).
///
/// # Errors
/// Propagates the `notify::Error` if the directory cannot be watched.
pub fn setup_settings_watcher(path: &str) -> Result<SettingsWatcher, notify::Error> {
    setup_ron_watcher(path).map(|watcher| SettingsWatcher { watcher, dir: path.to_string() })
}

/// Check for changes and reload the settings resource when files change.
///
/// Invalid reloads keep the current settings in place.
#[allow(clippy::needless_pass_by_value)]
pub fn check_settings_changes(watcher: Res<SettingsWatcher>, mut settings: ResMut<Settings>) {
    if !watcher.watcher.take_changed() {
        return;
    }
    match load_settings_from_dir(&watcher.dir) {
        Ok(fresh) => {
            info!("settings changed, reloaded from {}", watcher.dir);
            *settings = fresh;
        }
        Err(e) => error!("settings reload rejected, keeping previous values: {e}"),
    }
}

impl SettingsWatcher {
    #[must_use]
    pub fn stub() -> Self {
        SettingsWatcher { watcher: crate::ron::RonWatcher::stub(), dir: SETTINGS_DIR.to_string() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("skyhop-settings-{name}-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).expect("create scratch dir");
        dir
    }

    #[test]
    fn empty_directory_gives_defaults() {
        let dir = scratch_dir("empty");
        let s = load_settings_from_dir(dir.to_str().unwrap()).expect("defaults are valid");
        assert_eq!(s.player.speed, 10.0);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn invalid_file_is_an_error() {
        let dir = scratch_dir("invalid");
        std::fs::write(dir.join("settings.ron"), "(player: (speed: -3.0))").unwrap();
        let err = load_settings_from_dir(dir.to_str().unwrap()).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "player.speed", .. }));
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn hot_reload_keeps_old_settings_on_invalid_file() {
        let dir = scratch_dir("reload");
        std::fs::write(dir.join("settings.ron"), "(coins: (value: 0))").unwrap();

        let watcher = SettingsWatcher { watcher: crate::ron::RonWatcher::stub(), dir: dir.to_string_lossy().into_owned() };
        *watcher.watcher.changed.lock().unwrap() = true;

        let mut app = App::new();
        app.insert_resource(watcher);
        app.insert_resource(Settings::defaults());
        app.add_systems(Update, check_settings_changes);
        app.update();
        assert_eq!(app.world().resource::<Settings>().coins.value, 1);

        std::fs::write(dir.join("settings.ron"), "(coins: (value: 7))").unwrap();
        *app.world().resource::<SettingsWatcher>().watcher.changed.lock().unwrap() = true;
        app.update();
        assert_eq!(app.world().resource::<Settings>().coins.value, 7);
        let _ = std::fs::remove_dir_all(&dir);
    }
}
