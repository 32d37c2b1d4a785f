//! Application-level errors.

use voyage_config::ConfigError;
use voyage_input::BindingError;

use crate::platform::PlatformError;
use crate::script::ScriptError;

/// Anything that can stop the application before or during startup.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Platform(#[from] PlatformError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid keybinding override: {0}")]
    Bindings(#[from] BindingError),

    #[error(transparent)]
    Script(#[from] ScriptError),
}
