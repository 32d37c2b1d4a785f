//! Keyboard flight kinematics: clamped per-axis rotation rates, undamped
//! velocity, and the camera/starfield pair they move in lockstep.

pub mod axis;
pub mod camera;
pub mod controller;
pub mod telemetry;

pub use axis::{AxisState, ClampedAxis};
pub use camera::Camera;
pub use controller::FlightController;
pub use telemetry::FlightTelemetry;
