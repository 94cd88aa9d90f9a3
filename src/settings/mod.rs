//! Settings, types and defaults.
//!
//! Settings are stored as a RON file under `data/settings/` and are hot-reloadable
//! using the RON watcher utilities (see `ron::setup_ron_watcher`). Every field has
//! a serde default so partial files are accepted; values are range-checked by
//! [`Settings::validate`] before they reach the gameplay systems.
use crate::error::{non_negative, ConfigError};
use bevy::prelude::{KeyCode, Resource};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Duration;

/// Player movement tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSettings {
    #[serde(default = "PlayerSettings::default_speed")]
    pub speed: f32, // Horizontal run speed in units per second.
    #[serde(default = "PlayerSettings::default_ground_deceleration")]
    pub ground_deceleration: f32, // Rate at which horizontal speed bleeds off on the ground with no input.
    #[serde(default = "PlayerSettings::default_air_acceleration")]
    pub air_acceleration: f32, // Rate at which air velocity approaches the input target (lower = floatier).
    #[serde(default = "PlayerSettings::default_jump_force")]
    pub jump_force: f32, // Upward impulse applied per jump.
    #[serde(default = "PlayerSettings::default_dash_force")]
    pub dash_force: f32, // Forward impulse applied per dash.
    #[serde(default = "PlayerSettings::default_dash_cooldown")]
    pub dash_cooldown: f32, // Seconds of real time before another dash is allowed.
}

impl PlayerSettings {
    fn default_speed() -> f32 { 10.0 }
    fn default_ground_deceleration() -> f32 { 10.0 }
    fn default_air_acceleration() -> f32 { 2.0 }
    fn default_jump_force() -> f32 { 5.0 }
    fn default_dash_force() -> f32 { 15.0 }
    fn default_dash_cooldown() -> f32 { 3.0 }

    /// Dash cooldown as a `Duration`. Invalid values collapse to zero.
    #[must_use]
    pub fn dash_cooldown_duration(&self) -> Duration {
        Duration::try_from_secs_f32(self.dash_cooldown).unwrap_or(Duration::ZERO)
    }

    /// Check every tuning value is finite and non-negative.
    ///
    /// # Errors
    /// Returns `ConfigError::Invalid` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("player.speed", self.speed)?;
        non_negative("player.ground_deceleration", self.ground_deceleration)?;
        non_negative("player.air_acceleration", self.air_acceleration)?;
        non_negative("player.jump_force", self.jump_force)?;
        non_negative("player.dash_force", self.dash_force)?;
        non_negative("player.dash_cooldown", self.dash_cooldown)
    }
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            speed: Self::default_speed(),
            ground_deceleration: Self::default_ground_deceleration(),
            air_acceleration: Self::default_air_acceleration(),
            jump_force: Self::default_jump_force(),
            dash_force: Self::default_dash_force(),
            dash_cooldown: Self::default_dash_cooldown(),
        }
    }
}

/// Coin pickup tuning, applied to every coin spawned in the scene.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoinSettings {
    #[serde(default = "CoinSettings::default_rotation_speed")]
    pub rotation_speed: f32, // Cosmetic spin in degrees per second.
    #[serde(default = "CoinSettings::default_value")]
    pub value: u32, // Points added to the scoreboard on pickup.
}

impl CoinSettings {
    fn default_rotation_speed() -> f32 { 100.0 }
    fn default_value() -> u32 { 1 }

    /// # Errors
    /// Returns `ConfigError::Invalid` for a zero value or a bad rotation speed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("coins.rotation_speed", self.rotation_speed)?;
        if self.value == 0 {
            return Err(ConfigError::Invalid {
                field: "coins.value",
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

impl Default for CoinSettings {
    fn default() -> Self {
        Self {
            rotation_speed: Self::default_rotation_speed(),
            value: Self::default_value(),
        }
    }
}

/// Controls / input settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ControlsSettings {
    #[serde(default)]
    pub invert_y: bool, // Invert mouse Y axis for the orbit camera
    #[serde(default)]
    pub invert_x: bool, // Invert mouse X axis for the orbit camera
    #[serde(default = "ControlsSettings::default_sensitivity")]
    pub mouse_sensitivity: f32, // Mouse sensitivity multiplier
    #[serde(default = "ControlsSettings::default_keybinds")]
    pub keybinds: HashMap<String, String>, // Map of action names to key identifiers (editable by user)
}

impl ControlsSettings {
    fn default_sensitivity() -> f32 { 1.0 }

    fn default_keybinds() -> HashMap<String, String> {
        [
            ("forward", "W"),
            ("back", "S"),
            ("left", "A"),
            ("right", "D"),
            ("jump", "Space"),
            ("dash", "LShift"),
            ("toggle_debug", "F1"),
            ("pause", "Escape"),
        ]
        .into_iter()
        .map(|(action, key)| (action.to_string(), key.to_string()))
        .collect()
    }

    /// Resolve the key bound to `action`, or `default` when unbound or unparseable.
    #[must_use]
    pub fn key_for(&self, action: &str, default: KeyCode) -> KeyCode {
        self.keybinds
            .get(action)
            .and_then(|s| Settings::keycode_from_str(s))
            .unwrap_or(default)
    }

    /// # Errors
    /// Returns `ConfigError::Invalid` when a bound key name is not recognised.
    pub fn validate(&self) -> Result<(), ConfigError> {
        non_negative("controls.mouse_sensitivity", self.mouse_sensitivity)?;
        let mut actions: Vec<_> = self.keybinds.iter().collect();
        actions.sort();
        for (action, key) in actions {
            if Settings::keycode_from_str(key).is_none() {
                return Err(ConfigError::Invalid {
                    field: "controls.keybinds",
                    reason: format!("unknown key `{key}` bound to `{action}`"),
                });
            }
        }
        Ok(())
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            invert_y: false,
            invert_x: false,
            mouse_sensitivity: Self::default_sensitivity(),
            keybinds: Self::default_keybinds(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphicsSettings {
    #[serde(default = "GraphicsSettings::default_vsync")]
    pub vsync: bool, // Enable vertical sync to cap FPS to the display refresh rate.
}

impl GraphicsSettings {
    fn default_vsync() -> bool { true }
}

impl Default for GraphicsSettings {
    fn default() -> Self {
        Self { vsync: Self::default_vsync() }
    }
}

/// Top-level Settings
#[derive(Resource, Clone, Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub player: PlayerSettings,
    #[serde(default)]
    pub coins: CoinSettings,
    #[serde(default)]
    pub controls: ControlsSettings,
    #[serde(default)]
    pub graphics: GraphicsSettings,
}

const LETTER_KEYS: [KeyCode; 26] = [
    KeyCode::KeyA, KeyCode::KeyB, KeyCode::KeyC, KeyCode::KeyD, KeyCode::KeyE,
    KeyCode::KeyF, KeyCode::KeyG, KeyCode::KeyH, KeyCode::KeyI, KeyCode::KeyJ,
    KeyCode::KeyK, KeyCode::KeyL, KeyCode::KeyM, KeyCode::KeyN, KeyCode::KeyO,
    KeyCode::KeyP, KeyCode::KeyQ, KeyCode::KeyR, KeyCode::KeyS, KeyCode::KeyT,
    KeyCode::KeyU, KeyCode::KeyV, KeyCode::KeyW, KeyCode::KeyX, KeyCode::KeyY,
    KeyCode::KeyZ,
];

const DIGIT_KEYS: [KeyCode; 10] = [
    KeyCode::Digit0, KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3, KeyCode::Digit4,
    KeyCode::Digit5, KeyCode::Digit6, KeyCode::Digit7, KeyCode::Digit8, KeyCode::Digit9,
];

const FUNCTION_KEYS: [KeyCode; 12] = [
    KeyCode::F1, KeyCode::F2, KeyCode::F3, KeyCode::F4, KeyCode::F5, KeyCode::F6,
    KeyCode::F7, KeyCode::F8, KeyCode::F9, KeyCode::F10, KeyCode::F11, KeyCode::F12,
];

impl Settings {
    #[must_use]
    pub fn defaults() -> Self { Settings::default() }

    /// Validate every section.
    ///
    /// # Errors
    /// Returns the first `ConfigError` found, checking player, coins, then controls.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.player.validate()?;
        self.coins.validate()?;
        self.controls.validate()
    }

    /// Convert a string key identifier (e.g., from `controls.keybinds`) into a `KeyCode`.
    ///
    /// Matching is case-insensitive. Single letters and digits map to their key,
    /// `F1`..`F12` to function keys, and a handful of named keys (arrows, modifiers,
    /// whitespace) are recognised by common aliases.
    ///
    /// # Returns
    /// `None` if the string does not match any known key.
    #[must_use]
    pub fn keycode_from_str(name: &str) -> Option<KeyCode> {
        let s = name.trim().to_ascii_uppercase();
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if c.is_ascii_uppercase() {
                return Some(LETTER_KEYS[(c as u8 - b'A') as usize]);
            }
            if c.is_ascii_digit() {
                return Some(DIGIT_KEYS[(c as u8 - b'0') as usize]);
            }
        }

        if let Some(n) = s.strip_prefix('F').and_then(|n| n.parse::<usize>().ok()) {
            return (1..=FUNCTION_KEYS.len()).contains(&n).then(|| FUNCTION_KEYS[n - 1]);
        }

        Some(match s.as_str() {
            "LEFT" | "ARROWLEFT" => KeyCode::ArrowLeft,
            "RIGHT" | "ARROWRIGHT" => KeyCode::ArrowRight,
            "UP" | "ARROWUP" => KeyCode::ArrowUp,
            "DOWN" | "ARROWDOWN" => KeyCode::ArrowDown,

            "ESC" | "ESCAPE" => KeyCode::Escape,
            "SPACE" => KeyCode::Space,
            "TAB" => KeyCode::Tab,
            "ENTER" | "RETURN" => KeyCode::Enter,
            "BACKSPACE" => KeyCode::Backspace,

            "LSHIFT" | "SHIFT" | "LEFTSHIFT" => KeyCode::ShiftLeft,
            "RSHIFT" | "RIGHTSHIFT" => KeyCode::ShiftRight,
            "LCTRL" | "CTRL" | "CONTROL" => KeyCode::ControlLeft,
            "RCTRL" => KeyCode::ControlRight,
            "LALT" | "ALT" => KeyCode::AltLeft,
            "RALT" => KeyCode::AltRight,

            _ => return None,
        })
    }
}

pub mod loader;
