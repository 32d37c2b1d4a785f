//! Configuration structs with flight-scene defaults and RON persistence.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name of the persisted configuration inside the config directory.
pub const CONFIG_FILE: &str = "config.ron";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Starfield generation parameters.
    pub starfield: StarfieldConfig,
    /// Flight controller tuning.
    pub flight: FlightConfig,
    /// Keybinding overrides.
    pub input: InputConfig,
    /// Frame driver settings.
    pub simulation: SimulationConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Starfield generation parameters.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StarfieldConfig {
    /// Number of candidate samples drawn. Not the number of stars kept.
    pub count: u32,
    /// Outer radius of the star shell.
    pub sphere_radius: f32,
    /// Inner radius of the star shell; nothing is placed closer than this.
    pub void_radius: f32,
    /// Fixed seed for reproducible fields. `None` draws from OS entropy.
    pub seed: Option<u64>,
}

/// Tuning for a single rotation axis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct AxisConfig {
    /// Rate change per tick while a steering key is held (radians/tick).
    pub step: f32,
    /// Lower bound of the rotation rate.
    pub min: f32,
    /// Upper bound of the rotation rate.
    pub max: f32,
}

/// Flight controller tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct FlightConfig {
    /// Velocity added per tick per held thrust key.
    pub thrust: f32,
    /// Rotation about the camera's local X axis.
    pub pitch: AxisConfig,
    /// Rotation about the camera's local Y axis.
    pub yaw: AxisConfig,
    /// Rotation about the camera's local Z axis.
    pub roll: AxisConfig,
}

/// Input configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// Keybinding overrides (key code -> logical key name, e.g. `"KeyI": "forward"`).
    pub keybindings: HashMap<String, String>,
}

/// Frame driver settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Fixed simulation rate in ticks per second.
    pub tick_rate_hz: u32,
    /// Number of ticks for a headless run (0 = derive from the input script).
    pub max_ticks: u64,
    /// Optional RON input script replayed through the input port.
    pub script: Option<PathBuf>,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
    /// Emit a telemetry line every this many ticks (0 disables it).
    pub telemetry_interval: u64,
}

// --- Default implementations ---

impl Default for StarfieldConfig {
    fn default() -> Self {
        Self {
            count: 10_000,
            sphere_radius: 150.0,
            void_radius: 120.0,
            seed: None,
        }
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            step: 0.0005,
            min: -0.02,
            max: 0.02,
        }
    }
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self {
            thrust: 0.0001,
            pitch: AxisConfig::default(),
            yaw: AxisConfig::default(),
            roll: AxisConfig::default(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            tick_rate_hz: 60,
            max_ticks: 0,
            script: None,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            telemetry_interval: 60,
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);

        if config_path.exists() {
            let contents =
                std::fs::read_to_string(&config_path).map_err(ConfigError::read(&config_path))?;
            let config: Config =
                ron::from_str(&contents).map_err(ConfigError::parse(&config_path))?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::write(config_dir))?;

        let config_path = config_dir.join(CONFIG_FILE);
        let pretty = ron::ser::PrettyConfig::new()
            .depth_limit(3)
            .separate_tuple_members(true)
            .enumerate_arrays(false);

        let serialized = ron::ser::to_string_pretty(self, pretty)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::write(&config_path))?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join(CONFIG_FILE);
        let contents =
            std::fs::read_to_string(&config_path).map_err(ConfigError::read(&config_path))?;
        let new_config: Config =
            ron::from_str(&contents).map_err(ConfigError::parse(&config_path))?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(3))
                .unwrap();
        assert!(ron_str.contains("count: 10000"));
        assert!(ron_str.contains("tick_rate_hz: 60"));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.starfield.seed = Some(7);
        config
            .input
            .keybindings
            .insert("KeyI".to_string(), "forward".to_string());
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_section_uses_default() {
        let ron_str = "(starfield: (count: 500), debug: ())";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.starfield.count, 500);
        assert_eq!(config.starfield.sphere_radius, 150.0);
        assert_eq!(config.flight, FlightConfig::default());
    }

    #[test]
    fn test_partial_axis_uses_default_bounds() {
        let ron_str = "(flight: (yaw: (step: 0.001)))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config.flight.yaw.step, 0.001);
        assert_eq!(config.flight.yaw.max, 0.02);
        assert_eq!(config.flight.pitch, AxisConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_default_shell_is_valid() {
        let starfield = StarfieldConfig::default();
        assert!(starfield.void_radius > 0.0);
        assert!(starfield.void_radius < starfield.sphere_radius);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.starfield.count = 2_000;
        config.flight.thrust = 0.0002;
        config.simulation.script = Some(PathBuf::from("flight.ron"));

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join(CONFIG_FILE).exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.starfield.sphere_radius = 300.0;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert_eq!(result.unwrap().starfield.sphere_radius, 300.0);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_invalid_ron_produces_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "{{not valid}}").unwrap();
        let err = Config::load_or_create(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), Some(dir.path().join(CONFIG_FILE).as_path()));
        assert!(err.to_string().contains(CONFIG_FILE));
    }

    #[test]
    fn test_reload_missing_file_names_the_path() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::default().reload(dir.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert_eq!(err.path(), Some(dir.path().join(CONFIG_FILE).as_path()));
    }

    #[test]
    fn test_save_into_file_path_is_write_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let err = Config::default().save(&blocker).unwrap_err();
        assert!(matches!(err, ConfigError::Write { .. }));
        assert_eq!(err.path(), Some(blocker.as_path()));
    }

    #[test]
    fn test_ron_comments_accepted() {
        let ron_str = "// flight settings\n(\n  // nothing overridden\n)";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert_eq!(config, Config::default());
    }
}
