//! Configuration for the Voyage flight scene.
//!
//! Settings persist to disk as RON, tolerate missing or unknown fields, and
//! can be overridden from the command line via clap.

mod cli;
mod config;
mod error;

pub use cli::CliArgs;
pub use config::{
    AxisConfig, Config, DebugConfig, FlightConfig, InputConfig, SimulationConfig,
    StarfieldConfig,
};
pub use error::ConfigError;
