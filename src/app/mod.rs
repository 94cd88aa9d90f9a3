pub mod display;
pub mod player;
pub mod setup;

pub use display::sync_vsync_settings;
pub use player::update_player_fill_light;
pub use setup::setup;
