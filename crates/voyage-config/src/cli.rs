//! Command-line argument parsing for the `voyage` binary.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Voyage command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "voyage", about = "First-person flight through a procedural starfield")]
pub struct CliArgs {
    /// Number of candidate star samples.
    #[arg(long)]
    pub stars: Option<u32>,

    /// Outer radius of the star shell.
    #[arg(long)]
    pub sphere_radius: Option<f32>,

    /// Inner (empty) radius of the star shell.
    #[arg(long)]
    pub void_radius: Option<f32>,

    /// Seed for a reproducible starfield.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Number of ticks to simulate in a headless run.
    #[arg(long)]
    pub ticks: Option<u64>,

    /// Input script to replay.
    #[arg(long)]
    pub script: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(count) = args.stars {
            self.starfield.count = count;
        }
        if let Some(r) = args.sphere_radius {
            self.starfield.sphere_radius = r;
        }
        if let Some(r) = args.void_radius {
            self.starfield.void_radius = r;
        }
        if let Some(seed) = args.seed {
            self.starfield.seed = Some(seed);
        }
        if let Some(ticks) = args.ticks {
            self.simulation.max_ticks = ticks;
        }
        if let Some(ref script) = args.script {
            self.simulation.script = Some(script.clone());
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
