//! Adapter from winit keyboard events to an [`InputPort`].
//!
//! Physical key codes are used so that the default layout works identically
//! regardless of the user's keyboard layout.

use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

use crate::steering::InputPort;

/// Minimal description of a key event for processing.
#[derive(Debug, Clone, Copy)]
pub struct RawKeyEvent {
    /// The physical key involved.
    pub key: PhysicalKey,
    /// Whether the key was pressed or released.
    pub state: ElementState,
    /// Whether this is a repeat event.
    pub repeat: bool,
}

impl From<&KeyEvent> for RawKeyEvent {
    fn from(event: &KeyEvent) -> Self {
        Self {
            key: event.physical_key,
            state: event.state,
            repeat: event.repeat,
        }
    }
}

/// Code name of a physical key (`"KeyW"`, `"ArrowUp"`), or `None` for keys
/// winit could not identify.
pub fn key_code_name(key: PhysicalKey) -> Option<String> {
    match key {
        PhysicalKey::Code(code) => Some(format!("{code:?}")),
        PhysicalKey::Unidentified(_) => None,
    }
}

/// Forward one key event to `port`.
///
/// Repeat events and unidentified keys are dropped.
pub fn forward_key_event<P: InputPort + ?Sized>(port: &mut P, event: RawKeyEvent) {
    if event.repeat {
        return;
    }
    let Some(code) = key_code_name(event.key) else {
        return;
    };
    match event.state {
        ElementState::Pressed => port.on_key_down(&code),
        ElementState::Released => port.on_key_up(&code),
    }
}
