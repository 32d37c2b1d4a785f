//! The `voyage` binary: a headless flight through the procedural starfield.
//!
//! Run with: `cargo run -p voyage-app -- --seed 42 --ticks 600`

use clap::Parser;
use tracing::{error, info};
use voyage_app::{AppError, PlatformDirs, run_headless};
use voyage_config::{CliArgs, Config};

fn main() {
    let args = CliArgs::parse();
    if let Err(e) = run(&args) {
        // Logging may not be up yet if startup failed early.
        eprintln!("voyage: {e}");
        error!("{e}");
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), AppError> {
    let dirs = PlatformDirs::resolve_and_create(args.config.as_deref())?;
    let mut config = Config::load_or_create(&dirs.config_dir)?;
    config.apply_cli_overrides(args);

    voyage_log::init_logging(Some(&dirs.log_dir), cfg!(debug_assertions), Some(&config));

    info!("Voyage");
    info!("  config: {}", dirs.config_dir.display());
    info!("  logs:   {}", dirs.log_dir.display());
    info!(
        "Starfield: {} samples, shell {}..{}",
        config.starfield.count, config.starfield.void_radius, config.starfield.sphere_radius
    );

    run_headless(&config)?;
    Ok(())
}
