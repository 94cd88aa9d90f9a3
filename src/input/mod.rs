//! Keyboard polling and dispatch of movement / action notifications.
//!
//! `InputManager` reads level state once per frame and turns it into a raw
//! movement vector plus edge-triggered jump and dash notifications. Edges are
//! tracked here rather than taken from the backend, so any source that can
//! answer "is this key held" is enough (see [`KeyboardState`]).
//!
//! Notifications go two ways: synchronously to listeners registered on the
//! manager, and as ECS events written by [`poll_input`] for gameplay systems.
//!
//! # Example:
//!
//! ```
//! use bevy::prelude::*;
//! use skyhop::input::{InputManager, KeyBindings};
//! use std::collections::HashSet;
//!
//! let mut manager = InputManager::default();
//! manager.on_jump(|| println!("jump!"));
//! let held: HashSet<KeyCode> = [KeyCode::Space, KeyCode::KeyW].into();
//! let state = manager.poll(&held, &KeyBindings::default());
//! assert!(state.jump_pressed);
//! assert_eq!(state.movement, Vec2::Y);
//! ```
use crate::settings::{ControlsSettings, Settings};
use bevy::prelude::*;
use std::collections::HashSet;

/// Level-state keyboard source.
pub trait KeyboardState {
    fn pressed(&self, key: KeyCode) -> bool;
}

impl KeyboardState for ButtonInput<KeyCode> {
    fn pressed(&self, key: KeyCode) -> bool {
        ButtonInput::pressed(self, key)
    }
}

impl KeyboardState for HashSet<KeyCode> {
    fn pressed(&self, key: KeyCode) -> bool {
        self.contains(&key)
    }
}

/// Keys driving the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyBindings {
    pub forward: KeyCode,
    pub back: KeyCode,
    pub left: KeyCode,
    pub right: KeyCode,
    pub jump: KeyCode,
    pub dash: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            forward: KeyCode::KeyW,
            back: KeyCode::KeyS,
            left: KeyCode::KeyA,
            right: KeyCode::KeyD,
            jump: KeyCode::Space,
            dash: KeyCode::ShiftLeft,
        }
    }
}

impl KeyBindings {
    /// Resolve bindings from `controls.keybinds`, falling back per action to the defaults.
    #[must_use]
    pub fn from_controls(controls: &ControlsSettings) -> Self {
        let d = Self::default();
        Self {
            forward: controls.key_for("forward", d.forward),
            back: controls.key_for("back", d.back),
            left: controls.key_for("left", d.left),
            right: controls.key_for("right", d.right),
            jump: controls.key_for("jump", d.jump),
            dash: controls.key_for("dash", d.dash),
        }
    }
}

/// One frame of input.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    /// Unnormalized sum of held directions: x is right(+)/left(-), y is forward(+)/back(-).
    pub movement: Vec2,
    pub jump_pressed: bool,
    pub dash_pressed: bool,
}

type MoveListener = Box<dyn FnMut(Vec2) + Send + Sync>;
type ActionListener = Box<dyn FnMut() + Send + Sync>;

/// Polls keyboard state and notifies listeners.
#[derive(Resource, Default)]
pub struct InputManager {
    jump_held: bool,
    dash_held: bool,
    move_listeners: Vec<MoveListener>,
    jump_listeners: Vec<ActionListener>,
    dash_listeners: Vec<ActionListener>,
}

impl InputManager {
    pub fn on_move(&mut self, listener: impl FnMut(Vec2) + Send + Sync + 'static) {
        self.move_listeners.push(Box::new(listener));
    }

    pub fn on_jump(&mut self, listener: impl FnMut() + Send + Sync + 'static) {
        self.jump_listeners.push(Box::new(listener));
    }

    pub fn on_dash(&mut self, listener: impl FnMut() + Send + Sync + 'static) {
        self.dash_listeners.push(Box::new(listener));
    }

    /// Read `keys` once and notify listeners.
    ///
    /// Jump and dash fire only on the poll where their key goes from released
    /// to held. Listeners run in registration order: jump, then dash, then move
    /// (move fires every poll, including with a zero vector).
    pub fn poll(&mut self, keys: &impl KeyboardState, bindings: &KeyBindings) -> InputState {
        let jump_held = keys.pressed(bindings.jump);
        let dash_held = keys.pressed(bindings.dash);
        let state = InputState {
            movement: movement_vector(keys, bindings),
            jump_pressed: jump_held && !self.jump_held,
            dash_pressed: dash_held && !self.dash_held,
        };
        self.jump_held = jump_held;
        self.dash_held = dash_held;

        if state.jump_pressed {
            self.jump_listeners.iter_mut().for_each(|l| l());
        }
        if state.dash_pressed {
            self.dash_listeners.iter_mut().for_each(|l| l());
        }
        self.move_listeners.iter_mut().for_each(|l| l(state.movement));

        state
    }
}

/// Sum of the unit directions of every held movement key.
#[must_use]
pub fn movement_vector(keys: &impl KeyboardState, bindings: &KeyBindings) -> Vec2 {
    [
        (bindings.left, Vec2::NEG_X),
        (bindings.right, Vec2::X),
        (bindings.forward, Vec2::Y),
        (bindings.back, Vec2::NEG_Y),
    ]
    .into_iter()
    .filter(|(key, _)| keys.pressed(*key))
    .map(|(_, dir)| dir)
    .sum()
}

/// Latest movement vector, sent every frame.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct MoveInput(pub Vec2);

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct JumpPressed;

#[derive(Event, Debug, Clone, Copy, Default)]
pub struct DashPressed;

/// Poll the keyboard and forward the result as events.
///
/// # Arguments
/// * `kb` - Bevy keyboard state
/// * `settings` - keybinds, re-resolved only when settings change
/// * `bindings` - cached bindings for this system
#[allow(clippy::needless_pass_by_value)]
pub fn poll_input(
    kb: Res<ButtonInput<KeyCode>>,
    settings: Res<Settings>,
    mut manager: ResMut<InputManager>,
    mut bindings: Local<Option<KeyBindings>>,
    mut moves: EventWriter<MoveInput>,
    mut jumps: EventWriter<JumpPressed>,
    mut dashes: EventWriter<DashPressed>,
) {
    if bindings.is_none() || settings.is_changed() {
        *bindings = Some(KeyBindings::from_controls(&settings.controls));
    }
    let Some(keys) = *bindings else { return };

    let state = manager.poll(&*kb, &keys);
    if state.jump_pressed {
        jumps.send(JumpPressed);
    }
    if state.dash_pressed {
        dashes.send(DashPressed);
    }
    moves.send(MoveInput(state.movement));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn held(keys: &[KeyCode]) -> HashSet<KeyCode> {
        keys.iter().copied().collect()
    }

    #[test]
    fn opposing_keys_cancel() {
        let b = KeyBindings::default();
        assert_eq!(movement_vector(&held(&[KeyCode::KeyA, KeyCode::KeyD]), &b), Vec2::ZERO);
        assert_eq!(movement_vector(&held(&[KeyCode::KeyS]), &b), Vec2::NEG_Y);
    }

    #[test]
    fn diagonal_is_not_normalized() {
        let v = movement_vector(&held(&[KeyCode::KeyW, KeyCode::KeyD]), &KeyBindings::default());
        assert_eq!(v, Vec2::new(1.0, 1.0));
        assert!((v.length() - std::f32::consts::SQRT_2).abs() < 1e-6);
    }

    #[test]
    fn jump_is_edge_triggered() {
        let b = KeyBindings::default();
        let mut m = InputManager::default();
        let space = held(&[KeyCode::Space]);
        let none = held(&[]);

        assert!(m.poll(&space, &b).jump_pressed);
        assert!(!m.poll(&space, &b).jump_pressed, "holding must not repeat");
        assert!(!m.poll(&none, &b).jump_pressed);
        assert!(m.poll(&space, &b).jump_pressed, "release + press fires again");
    }

    #[test]
    fn dash_edge_is_independent_of_jump() {
        let b = KeyBindings::default();
        let mut m = InputManager::default();
        let s = m.poll(&held(&[KeyCode::ShiftLeft, KeyCode::Space]), &b);
        assert!(s.jump_pressed && s.dash_pressed);
        let s = m.poll(&held(&[KeyCode::ShiftLeft]), &b);
        assert!(!s.jump_pressed && !s.dash_pressed);
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let mut m = InputManager::default();
        for name in ["jump-a", "jump-b"] {
            let log = log.clone();
            m.on_jump(move || log.lock().unwrap().push(name.to_string()));
        }
        {
            let log = log.clone();
            m.on_dash(move || log.lock().unwrap().push("dash".to_string()));
        }
        {
            let log = log.clone();
            m.on_move(move |v| log.lock().unwrap().push(format!("move {} {}", v.x, v.y)));
        }

        m.poll(&held(&[KeyCode::Space, KeyCode::ShiftLeft, KeyCode::KeyA]), &KeyBindings::default());
        assert_eq!(*log.lock().unwrap(), vec!["jump-a", "jump-b", "dash", "move -1 0"]);
    }

    #[test]
    fn no_listeners_is_a_no_op() {
        let mut m = InputManager::default();
        let s = m.poll(&held(&[KeyCode::KeyW]), &KeyBindings::default());
        assert_eq!(s.movement, Vec2::Y);
    }

    #[test]
    fn bindings_follow_settings() {
        let mut controls = ControlsSettings::default();
        controls.keybinds.insert("jump".into(), "J".into());
        let b = KeyBindings::from_controls(&controls);
        assert_eq!(b.jump, KeyCode::KeyJ);
        assert_eq!(b.dash, KeyCode::ShiftLeft);
    }

    #[test]
    fn poll_input_writes_events() {
        let mut app = App::new();
        app.init_resource::<ButtonInput<KeyCode>>()
            .insert_resource(Settings::defaults())
            .init_resource::<InputManager>()
            .add_event::<MoveInput>()
            .add_event::<JumpPressed>()
            .add_event::<DashPressed>()
            .add_systems(Update, poll_input);

        {
            let mut kb = app.world_mut().resource_mut::<ButtonInput<KeyCode>>();
            kb.press(KeyCode::Space);
            kb.press(KeyCode::KeyD);
        }
        app.update();
        app.update();

        let jumps = app.world_mut().resource_mut::<Events<JumpPressed>>().drain().count();
        assert_eq!(jumps, 1);
        let moves: Vec<_> = app.world_mut().resource_mut::<Events<MoveInput>>().drain().collect();
        assert_eq!(moves, vec![MoveInput(Vec2::X), MoveInput(Vec2::X)]);
    }
}
