//! Key code to [`SteeringKey`] bindings with RON persistence.
//!
//! Codes are physical key names as reported by winit's `KeyCode` debug output
//! (`"KeyW"`, `"ArrowUp"`), which match the browser `KeyboardEvent.code` names.

use std::collections::HashMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::steering::SteeringKey;

/// Errors from binding configuration and persistence.
#[derive(Debug, thiserror::Error)]
pub enum BindingError {
    /// A binding referred to a logical key that does not exist.
    #[error("unknown steering key: {0}")]
    UnknownKey(String),

    /// Failed to read or write the bindings file.
    #[error("keybinding file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The bindings file is not valid RON.
    #[error("malformed keybinding file: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Serializing the bindings failed.
    #[error("failed to serialize keybindings: {0}")]
    Serialize(#[from] ron::Error),
}

/// Maps physical key codes to logical steering keys.
///
/// Several codes may drive the same key; a code drives at most one key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyBindings {
    bindings: HashMap<String, SteeringKey>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let defaults = [
            ("KeyW", SteeringKey::Forward),
            ("KeyS", SteeringKey::Backward),
            ("KeyA", SteeringKey::YawLeft),
            ("KeyD", SteeringKey::YawRight),
            ("KeyQ", SteeringKey::StrafeLeft),
            ("KeyE", SteeringKey::StrafeRight),
            ("KeyR", SteeringKey::Rise),
            ("KeyF", SteeringKey::Sink),
            ("KeyZ", SteeringKey::RollLeft),
            ("KeyC", SteeringKey::RollRight),
            ("ArrowUp", SteeringKey::PitchUp),
            ("ArrowDown", SteeringKey::PitchDown),
        ];
        Self {
            bindings: defaults
                .into_iter()
                .map(|(code, key)| (code.to_string(), key))
                .collect(),
        }
    }
}

impl KeyBindings {
    /// Bindings with no codes bound. Logical identifiers still resolve.
    pub fn empty() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Resolve a code: bound physical codes first, then logical identifiers
    /// such as `"roll-left"`.
    #[must_use]
    pub fn resolve(&self, code: &str) -> Option<SteeringKey> {
        self.bindings
            .get(code)
            .copied()
            .or_else(|| code.parse().ok())
    }

    /// Bind `code` to `key`, replacing whatever `code` drove before.
    pub fn bind(&mut self, code: impl Into<String>, key: SteeringKey) {
        self.bindings.insert(code.into(), key);
    }

    /// Remove the binding for `code`. Returns the key it drove.
    pub fn unbind(&mut self, code: &str) -> Option<SteeringKey> {
        self.bindings.remove(code)
    }

    /// Codes bound to `key`, sorted.
    pub fn codes_for(&self, key: SteeringKey) -> Vec<&str> {
        let mut codes: Vec<&str> = self
            .bindings
            .iter()
            .filter(|&(_, &k)| k == key)
            .map(|(code, _)| code.as_str())
            .collect();
        codes.sort_unstable();
        codes
    }

    /// Apply `code -> logical key name` overrides from the config.
    ///
    /// Nothing is applied if any name is unknown.
    pub fn apply_overrides(
        &mut self,
        overrides: &HashMap<String, String>,
    ) -> Result<(), BindingError> {
        let parsed = overrides
            .iter()
            .map(|(code, name)| -> Result<(String, SteeringKey), BindingError> {
                Ok((code.clone(), name.parse()?))
            })
            .collect::<Result<Vec<_>, _>>()?;
        for (code, key) in parsed {
            self.bind(code, key);
        }
        Ok(())
    }

    /// Keys that no physical code drives.
    #[must_use]
    pub fn unbound_keys(&self) -> Vec<SteeringKey> {
        SteeringKey::ALL
            .into_iter()
            .filter(|key| !self.bindings.values().any(|k| k == key))
            .collect()
    }

    /// Save to a RON file at `path`.
    pub fn save(&self, path: &Path) -> Result<(), BindingError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let ron_str = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())?;
        std::fs::write(path, ron_str)?;
        Ok(())
    }

    /// Load from a RON file, falling back to [`KeyBindings::default`] if the
    /// file is missing or malformed.
    #[must_use]
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(bindings) => bindings,
                Err(e) => {
                    warn!(
                        "Malformed keybinding file {}: {e}; using defaults",
                        path.display()
                    );
                    Self::default()
                }
            },
            Err(e) => {
                warn!(
                    "Cannot read keybinding file {}: {e}; using defaults",
                    path.display()
                );
                Self::default()
            }
        }
    }
}
