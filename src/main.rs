use bevy::diagnostic::FrameTimeDiagnosticsPlugin;
use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin};
use skyhop::player::{cursor_grab, exit_on_config_error, follow_player, orbit_camera_look, verify_player};
use skyhop::settings::loader as settings_loader;
use skyhop::ui::{spawn_debug_overlay, spawn_score_display, toggle_debug_overlay, update_debug_overlay};
use skyhop::{GameplayPlugin, GameplaySet};

mod app;
use app::{setup, sync_vsync_settings, update_player_fill_light};

fn main() {
    let settings = match settings_loader::load_settings_from_dir(settings_loader::SETTINGS_DIR) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(1);
        }
    };
    let settings_watcher = settings_loader::setup_settings_watcher(settings_loader::SETTINGS_DIR)
        .unwrap_or_else(|_| settings_loader::SettingsWatcher::stub());

    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "skyhop".to_string(),
                position: WindowPosition::Centered(MonitorSelection::Primary),
                present_mode: if settings.graphics.vsync { PresentMode::AutoVsync } else { PresentMode::AutoNoVsync },
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin)
        .add_plugins(GameplayPlugin);

    app.insert_resource(ClearColor(Color::srgb(0.55, 0.75, 0.95)));
    app.insert_resource(settings);
    app.insert_resource(settings_watcher);

    app.add_systems(Startup, (setup, spawn_score_display, spawn_debug_overlay));
    app.add_systems(PostStartup, verify_player.pipe(exit_on_config_error));

    app.add_systems(Update, settings_loader::check_settings_changes.before(GameplaySet::Input));
    app.add_systems(Update, sync_vsync_settings);
    app.add_systems(Update, (orbit_camera_look, cursor_grab).before(GameplaySet::Input));
    app.add_systems(Update, (follow_player, update_player_fill_light).after(GameplaySet::Physics));
    app.add_systems(Update, (toggle_debug_overlay, update_debug_overlay).chain());

    app.run();
}
