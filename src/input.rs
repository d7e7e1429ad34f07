//! Held-key state and the key → action registry.

use std::collections::{BTreeSet, HashMap};
use std::hash::Hash;

/// A keyboard key identifier. Keys without a registered action are still
/// tracked while held, they just do nothing.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Key {
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    Space,
    Other(String),
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Action {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Fire,
}

impl Key {
    /// The action registered for this key, if any.
    pub fn action(&self) -> Option<Action> {
        match self {
            Key::ArrowUp => Some(Action::MoveUp),
            Key::ArrowDown => Some(Action::MoveDown),
            Key::ArrowLeft => Some(Action::MoveLeft),
            Key::ArrowRight => Some(Action::MoveRight),
            Key::Space => Some(Action::Fire),
            Key::Other(_) => None,
        }
    }
}

/// Keys currently held down. Iteration order is the `Key` ordering, so
/// per-frame dispatch is deterministic.
#[derive(Clone, Debug, Default)]
pub struct InputState {
    pressed: BTreeSet<Key>,
}

impl InputState {
    pub fn key_down(&mut self, key: Key) {
        self.pressed.insert(key);
    }

    pub fn key_up(&mut self, key: &Key) {
        self.pressed.remove(key);
    }

    pub fn is_held(&self, key: &Key) -> bool {
        self.pressed.contains(key)
    }

    /// Actions for every held key that has one, in dispatch order.
    pub fn actions(&self) -> Vec<Action> {
        self.pressed.iter().filter_map(Key::action).collect()
    }
}

impl FromIterator<Key> for InputState {
    fn from_iter<I: IntoIterator<Item = Key>>(iter: I) -> Self {
        let mut input = InputState::default();
        for key in iter {
            input.key_down(key);
        }
        input
    }
}

// ── Physical keys ─────────────────────────────────────────────────────────────

/// Physical keys currently down, each with the `Key` it maps to and the frame
/// it was last seen in. Several physical keys may map to one `Key`; that key
/// stays held until every one of them is released.
#[derive(Clone, Debug)]
pub struct HeldKeys<P> {
    held: HashMap<P, (Key, u64)>,
}

impl<P> Default for HeldKeys<P> {
    fn default() -> Self {
        HeldKeys { held: HashMap::new() }
    }
}

impl<P: Eq + Hash> HeldKeys<P> {
    /// Press or auto-repeat of `physical`.
    pub fn press(&mut self, physical: P, key: Key, frame: u64) {
        self.held.insert(physical, (key, frame));
    }

    pub fn release(&mut self, physical: &P) {
        self.held.remove(physical);
    }

    /// Release keys not refreshed within `window` frames, for terminals that
    /// never report key releases.
    pub fn expire(&mut self, frame: u64, window: u64) {
        self.held
            .retain(|_, (_, last)| frame.saturating_sub(*last) <= window);
    }

    /// Collapse the physical keys into the logical held set.
    pub fn input_state(&self) -> InputState {
        self.held.values().map(|(key, _)| key.clone()).collect()
    }
}
