//! Logical steering keys and the held-flag table read by the flight controller.
//!
//! Key events arrive at arbitrary times relative to the simulation tick. They
//! are not queued: each event overwrites the flag for its key, and the next
//! tick reads whatever is held at that moment.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::keybindings::{BindingError, KeyBindings};

/// The twelve logical keys that steer the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SteeringKey {
    Forward,
    Backward,
    YawLeft,
    YawRight,
    StrafeLeft,
    StrafeRight,
    Rise,
    Sink,
    RollLeft,
    RollRight,
    PitchUp,
    PitchDown,
}

impl SteeringKey {
    /// Number of logical keys.
    pub const COUNT: usize = 12;

    /// Every key, in declaration order.
    pub const ALL: [SteeringKey; Self::COUNT] = [
        Self::Forward,
        Self::Backward,
        Self::YawLeft,
        Self::YawRight,
        Self::StrafeLeft,
        Self::StrafeRight,
        Self::Rise,
        Self::Sink,
        Self::RollLeft,
        Self::RollRight,
        Self::PitchUp,
        Self::PitchDown,
    ];

    /// The logical identifier, e.g. `"yaw-left"`.
    pub fn name(self) -> &'static str {
        match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::YawLeft => "yaw-left",
            Self::YawRight => "yaw-right",
            Self::StrafeLeft => "strafe-left",
            Self::StrafeRight => "strafe-right",
            Self::Rise => "rise",
            Self::Sink => "sink",
            Self::RollLeft => "roll-left",
            Self::RollRight => "roll-right",
            Self::PitchUp => "pitch-up",
            Self::PitchDown => "pitch-down",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for SteeringKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SteeringKey {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| BindingError::UnknownKey(s.to_string()))
    }
}

/// Held/released flag for each [`SteeringKey`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SteeringKeyState {
    held: [bool; SteeringKey::COUNT],
}

impl SteeringKeyState {
    /// All keys released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag for `key`. Last write wins.
    pub fn set(&mut self, key: SteeringKey, held: bool) {
        self.held[key.index()] = held;
    }

    /// Whether `key` is currently held.
    #[must_use]
    pub fn is_held(&self, key: SteeringKey) -> bool {
        self.held[key.index()]
    }

    /// Whether any key is held.
    #[must_use]
    pub fn any_held(&self) -> bool {
        self.held.iter().any(|&h| h)
    }

    /// Iterate over the keys currently held.
    pub fn held_keys(&self) -> impl Iterator<Item = SteeringKey> + '_ {
        SteeringKey::ALL.into_iter().filter(|&k| self.is_held(k))
    }

    /// Release every key.
    pub fn release_all(&mut self) {
        self.held = [false; SteeringKey::COUNT];
    }
}

/// Receives raw key transitions by key code.
///
/// Unrecognized codes are ignored without error.
pub trait InputPort {
    /// A key went down.
    fn on_key_down(&mut self, code: &str);
    /// A key went up.
    fn on_key_up(&mut self, code: &str);
}

/// The standard [`InputPort`]: resolves codes through [`KeyBindings`] and
/// writes the result into a [`SteeringKeyState`].
#[derive(Debug, Clone, Default)]
pub struct SteeringInput {
    bindings: KeyBindings,
    state: SteeringKeyState,
}

impl SteeringInput {
    pub fn new(bindings: KeyBindings) -> Self {
        Self {
            bindings,
            state: SteeringKeyState::new(),
        }
    }

    /// Current held flags.
    pub fn state(&self) -> &SteeringKeyState {
        &self.state
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }

    /// Replace the bindings. Flags already held stay held.
    pub fn set_bindings(&mut self, bindings: KeyBindings) {
        self.bindings = bindings;
    }

    fn apply(&mut self, code: &str, held: bool) {
        match self.bindings.resolve(code) {
            Some(key) => {
                trace!(code, %key, held, "steering key");
                self.state.set(key, held);
            }
            None => trace!(code, "ignoring unbound key"),
        }
    }
}

impl InputPort for SteeringInput {
    fn on_key_down(&mut self, code: &str) {
        self.apply(code, true);
    }

    fn on_key_up(&mut self, code: &str) {
        self.apply(code, false);
    }
}
