//! Headless renderer that reports the scene through the log.

use tracing::{info, trace};

use crate::driver::{Renderer, SceneView};

/// Logs a telemetry line every `interval` ticks instead of drawing.
#[derive(Debug, Default)]
pub struct LogRenderer {
    interval: u64,
    frames: u64,
    lines: u64,
    last_logged: Option<u64>,
}

impl LogRenderer {
    /// `interval` of 0 disables the periodic line.
    pub fn new(interval: u64) -> Self {
        Self {
            interval,
            ..Self::default()
        }
    }

    /// Frames rendered.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Telemetry lines written.
    pub fn lines(&self) -> u64 {
        self.lines
    }
}

impl Renderer for LogRenderer {
    fn render(&mut self, view: &SceneView<'_>, alpha: f64) {
        self.frames += 1;
        let telemetry = view.telemetry;
        trace!(
            frame = self.frames,
            alpha,
            stars = view.starfield.len(),
            anchor = ?view.starfield.origin_offset(),
            "frame"
        );

        // Several frames can share a tick when the driver renders between ticks.
        if self.interval > 0
            && telemetry.tick % self.interval == 0
            && self.last_logged != Some(telemetry.tick)
        {
            info!("{telemetry}");
            self.last_logged = Some(telemetry.tick);
            self.lines += 1;
        }
    }
}
