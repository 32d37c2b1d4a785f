//! Steering input: logical flight keys, their held-state table, the input
//! port that feeds it, configurable key bindings, and the winit key adapter.

pub mod keybindings;
pub mod keyboard;
pub mod steering;

pub use keybindings::{BindingError, KeyBindings};
pub use keyboard::{RawKeyEvent, forward_key_event, key_code_name};
pub use steering::{InputPort, SteeringInput, SteeringKey, SteeringKeyState};
