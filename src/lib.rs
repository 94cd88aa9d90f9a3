pub mod coin;
pub mod error;
pub mod gameplay;
pub mod input;
pub mod physics;
pub mod player;
pub mod ron;
pub use crate::ron as ron_loader;
pub mod settings;
pub mod ui;

pub use gameplay::{GameplayPlugin, GameplaySet};
