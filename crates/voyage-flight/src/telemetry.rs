//! Flight readout for HUD and log output.

use std::fmt;

use glam::Vec3;

/// Snapshot of the flight state after a tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlightTelemetry {
    /// Completed ticks.
    pub tick: u64,
    /// Camera position in world space.
    pub position: Vec3,
    /// Velocity in world units per tick.
    pub velocity: Vec3,
    /// Velocity magnitude.
    pub speed: f32,
    /// Camera view direction.
    pub forward: Vec3,
    pub pitch_rate: f32,
    pub yaw_rate: f32,
    pub roll_rate: f32,
}

impl FlightTelemetry {
    /// Speed in world units per second at the given tick rate.
    pub fn speed_per_second(&self, ticks_per_second: f64) -> f64 {
        f64::from(self.speed) * ticks_per_second
    }

    /// True while any axis is still turning the camera.
    pub fn is_rotating(&self) -> bool {
        self.pitch_rate != 0.0 || self.yaw_rate != 0.0 || self.roll_rate != 0.0
    }
}

impl fmt::Display for FlightTelemetry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = self.position;
        let d = self.forward;
        write!(
            f,
            "tick {} | pos ({:.4}, {:.4}, {:.4}) | speed {:.6}/tick | heading ({:.3}, {:.3}, {:.3}) | rates p={:.4} y={:.4} r={:.4}",
            self.tick,
            p.x,
            p.y,
            p.z,
            self.speed,
            d.x,
            d.y,
            d.z,
            self.pitch_rate,
            self.yaw_rate,
            self.roll_rate,
        )
    }
}
