//! Fixed-timestep frame driver.
//!
//! Flight ticks advance by constant per-tick increments. The driver runs
//! them at a fixed rate from an accumulator of elapsed frame time, then
//! renders exactly once per frame with the leftover fraction as `alpha`.

use std::time::Instant;

use tracing::warn;
use voyage_flight::{Camera, FlightController, FlightTelemetry};
use voyage_input::InputPort;
use voyage_space::PointCloud;

use crate::script::InputScript;

/// Maximum frame time fed into the accumulator, in seconds.
/// Longer frames are clamped rather than caught up with a burst of ticks.
pub const MAX_FRAME_TIME: f64 = 0.25;

/// What the renderer may read each frame.
#[derive(Debug, Clone, Copy)]
pub struct SceneView<'a> {
    pub camera: &'a Camera,
    pub starfield: &'a PointCloud,
    pub telemetry: FlightTelemetry,
}

/// Consumes the scene once per frame. Read-only.
pub trait Renderer {
    /// Draw the frame. `alpha` in `[0, 1)` is how far wall time has run
    /// past the last completed tick, in ticks.
    fn render(&mut self, view: &SceneView<'_>, alpha: f64);
}

/// Owns the camera, starfield and controller and sequences input, ticks and rendering.
pub struct FrameDriver {
    controller: FlightController,
    camera: Camera,
    starfield: PointCloud,
    script: InputScript,
    fixed_dt: f64,
    accumulator: f64,
    frame_count: u64,
    previous_time: Option<Instant>,
}

impl FrameDriver {
    /// A driver ticking at `tick_rate_hz` (a rate of 0 is treated as 1).
    pub fn new(
        controller: FlightController,
        camera: Camera,
        starfield: PointCloud,
        tick_rate_hz: u32,
    ) -> Self {
        Self {
            controller,
            camera,
            starfield,
            script: InputScript::default(),
            fixed_dt: 1.0 / f64::from(tick_rate_hz.max(1)),
            accumulator: 0.0,
            frame_count: 0,
            previous_time: None,
        }
    }

    /// Replay `script` through the input port as ticks run.
    pub fn with_script(mut self, script: InputScript) -> Self {
        self.script = script;
        self
    }

    /// Run one frame of `frame_time` seconds: zero or more ticks, then one render.
    /// Returns the number of ticks run.
    pub fn advance<R: Renderer + ?Sized>(&mut self, frame_time: f64, renderer: &mut R) -> u32 {
        let mut frame_time = frame_time.max(0.0);
        if frame_time > MAX_FRAME_TIME {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                MAX_FRAME_TIME * 1000.0
            );
            frame_time = MAX_FRAME_TIME;
        }

        self.accumulator += frame_time;
        let mut ticks = 0;
        while self.accumulator >= self.fixed_dt {
            self.tick();
            self.accumulator -= self.fixed_dt;
            ticks += 1;
        }

        self.render(renderer);
        ticks
    }

    /// Like [`advance`](Self::advance), measuring frame time from the wall clock.
    /// The first call measures nothing and only renders.
    pub fn advance_realtime<R: Renderer + ?Sized>(&mut self, renderer: &mut R) -> u32 {
        let now = Instant::now();
        let frame_time = self
            .previous_time
            .map_or(0.0, |prev| now.duration_since(prev).as_secs_f64());
        self.previous_time = Some(now);
        self.advance(frame_time, renderer)
    }

    /// Exactly one tick and one render, independent of time. Used for headless runs.
    pub fn step<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        self.tick();
        self.render(renderer);
    }

    fn tick(&mut self) {
        self.script.apply(self.controller.ticks(), &mut self.controller);
        self.controller.update(&mut self.camera, &mut self.starfield);
    }

    fn render<R: Renderer + ?Sized>(&mut self, renderer: &mut R) {
        let view = SceneView {
            camera: &self.camera,
            starfield: &self.starfield,
            telemetry: self.controller.telemetry(&self.camera),
        };
        renderer.render(&view, self.alpha());
        self.frame_count += 1;
    }

    /// Live key events go here; they are read by the next tick.
    pub fn input(&mut self) -> &mut dyn InputPort {
        &mut self.controller
    }

    /// Leftover accumulator time as a fraction of a tick.
    pub fn alpha(&self) -> f64 {
        if self.accumulator > 0.0 {
            self.accumulator / self.fixed_dt
        } else {
            0.0
        }
    }

    /// Seconds per tick.
    pub fn fixed_dt(&self) -> f64 {
        self.fixed_dt
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Ticks completed so far.
    pub fn tick_count(&self) -> u64 {
        self.controller.ticks()
    }

    pub fn script(&self) -> &InputScript {
        &self.script
    }

    pub fn controller(&self) -> &FlightController {
        &self.controller
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn starfield(&self) -> &PointCloud {
        &self.starfield
    }

    pub fn telemetry(&self) -> FlightTelemetry {
        self.controller.telemetry(&self.camera)
    }
}
