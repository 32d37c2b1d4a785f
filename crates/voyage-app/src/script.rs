//! Scripted key input for headless flights.
//!
//! A script is a RON file of key transitions stamped with the tick they
//! precede:
//!
//! ```ron
//! (events: [
//!     (tick: 0, code: "KeyW", pressed: true),
//!     (tick: 90, code: "KeyW", pressed: false),
//! ])
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use voyage_input::InputPort;

/// Errors loading an input script.
#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read input script {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse input script: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// One key transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptEvent {
    /// Applied before the tick with this index runs (ticks count from 0).
    pub tick: u64,
    /// Key code or logical key name, as given to [`InputPort`].
    pub code: String,
    /// `true` for key down, `false` for key up.
    pub pressed: bool,
}

/// Key transitions ordered by tick. Events sharing a tick keep file order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputScript {
    events: Vec<ScriptEvent>,
}

impl InputScript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_events(mut events: Vec<ScriptEvent>) -> Self {
        events.sort_by_key(|e| e.tick);
        Self { events }
    }

    /// Parse a script from RON text.
    pub fn from_ron(text: &str) -> Result<Self, ScriptError> {
        let script: InputScript = ron::from_str(text)?;
        Ok(Self::from_events(script.events))
    }

    /// Read and parse a script file.
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_ron(&text)
    }

    /// Add a key-down before `tick`.
    pub fn press(self, tick: u64, code: &str) -> Self {
        self.with_event(tick, code, true)
    }

    /// Add a key-up before `tick`.
    pub fn release(self, tick: u64, code: &str) -> Self {
        self.with_event(tick, code, false)
    }

    fn with_event(mut self, tick: u64, code: &str, pressed: bool) -> Self {
        // Insert after existing events of the same tick.
        let at = self.events.partition_point(|e| e.tick <= tick);
        self.events.insert(
            at,
            ScriptEvent {
                tick,
                code: code.to_string(),
                pressed,
            },
        );
        self
    }

    /// A short demonstration flight: accelerate, bank into a turn, climb,
    /// then release everything and coast with whatever rotation is left.
    pub fn demo() -> Self {
        Self::new()
            .press(0, "forward")
            .release(120, "forward")
            .press(60, "yaw-left")
            .release(90, "yaw-left")
            .press(90, "roll-right")
            .release(110, "roll-right")
            .press(150, "pitch-up")
            .release(170, "pitch-up")
            .press(180, "rise")
            .release(240, "rise")
    }

    pub fn events(&self) -> &[ScriptEvent] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events scheduled before `tick`.
    pub fn events_at(&self, tick: u64) -> &[ScriptEvent] {
        let start = self.events.partition_point(|e| e.tick < tick);
        let end = self.events.partition_point(|e| e.tick <= tick);
        &self.events[start..end]
    }

    /// Tick of the final event.
    pub fn last_tick(&self) -> Option<u64> {
        self.events.last().map(|e| e.tick)
    }

    /// Send the events scheduled before `tick` to `port`.
    pub fn apply<P: InputPort + ?Sized>(&self, tick: u64, port: &mut P) {
        for event in self.events_at(tick) {
            if event.pressed {
                port.on_key_down(&event.code);
            } else {
                port.on_key_up(&event.code);
            }
        }
    }
}
