//! Voyage application: wires config, starfield generation, the flight
//! controller and input into a fixed-timestep frame driver.

pub mod driver;
pub mod error;
pub mod platform;
pub mod render;
pub mod script;

pub use driver::{FrameDriver, MAX_FRAME_TIME, Renderer, SceneView};
pub use error::AppError;
pub use platform::{PlatformDirs, PlatformError};
pub use render::LogRenderer;
pub use script::{InputScript, ScriptError, ScriptEvent};

use tracing::{info, warn};
use voyage_config::Config;
use voyage_flight::{Camera, FlightController, FlightTelemetry};
use voyage_input::KeyBindings;
use voyage_space::{StarfieldGenerator, source_from_seed};

/// Ticks simulated headless when neither `max_ticks` nor a script says otherwise.
pub const DEFAULT_HEADLESS_TICKS: u64 = 600;

/// Build the scene from config: bindings, starfield, controller and script.
///
/// Without a configured script the built-in demo flight is used.
pub fn build_driver(config: &Config) -> Result<FrameDriver, AppError> {
    let mut bindings = KeyBindings::default();
    bindings.apply_overrides(&config.input.keybindings)?;
    let unbound = bindings.unbound_keys();
    if !unbound.is_empty() {
        warn!(?unbound, "Steering keys without a physical binding");
    }

    let sf = &config.starfield;
    let generator = StarfieldGenerator::new(sf.count, sf.sphere_radius, sf.void_radius);
    if generator.is_degenerate() {
        warn!(
            count = sf.count,
            sphere_radius = sf.sphere_radius,
            void_radius = sf.void_radius,
            "Starfield parameters leave no room for stars"
        );
    }
    let mut rng = source_from_seed(sf.seed);
    let mut starfield = generator.generate(&mut rng);

    let camera = Camera::default();
    starfield.set_origin_offset(camera.position);
    info!(
        stars = starfield.len(),
        requested = sf.count,
        seed = ?sf.seed,
        "Starfield generated"
    );

    let controller = FlightController::from_config(&config.flight, bindings);
    let script = match &config.simulation.script {
        Some(path) => {
            let script = InputScript::load(path)?;
            info!(
                path = %path.display(),
                events = script.events().len(),
                "Loaded input script"
            );
            script
        }
        None => InputScript::demo(),
    };

    Ok(
        FrameDriver::new(controller, camera, starfield, config.simulation.tick_rate_hz)
            .with_script(script),
    )
}

/// Number of ticks a headless run simulates: `max_ticks` if set, otherwise
/// the script's length plus one second of coasting.
pub fn headless_ticks(config: &Config, script: &InputScript) -> u64 {
    if config.simulation.max_ticks > 0 {
        return config.simulation.max_ticks;
    }
    match script.last_tick() {
        Some(last) => last + 1 + u64::from(config.simulation.tick_rate_hz.max(1)),
        None => DEFAULT_HEADLESS_TICKS,
    }
}

/// Fly the configured scene without a window, logging telemetry, and return
/// the final state.
pub fn run_headless(config: &Config) -> Result<FlightTelemetry, AppError> {
    let mut driver = build_driver(config)?;
    let ticks = headless_ticks(config, driver.script());
    let mut renderer = LogRenderer::new(config.debug.telemetry_interval);

    info!(ticks, tick_rate_hz = config.simulation.tick_rate_hz, "Starting headless flight");
    for _ in 0..ticks {
        driver.step(&mut renderer);
    }

    let telemetry = driver.telemetry();
    info!(
        frames = renderer.frames(),
        seconds = ticks as f64 * driver.fixed_dt(),
        "Flight finished: {telemetry}"
    );
    Ok(telemetry)
}
