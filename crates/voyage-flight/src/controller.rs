//! Keyboard-driven flight controller.
//!
//! Each tick the three rotation axes read their steering keys, the camera is
//! turned by every axis rate, and thrust keys add to a persistent velocity
//! along the turned camera's forward, right and up directions. The velocity
//! has no drag: once nonzero it moves the camera every tick until opposing
//! thrust cancels it. The starfield anchor moves by the same vector so the
//! star shell stays centred on the camera.
//!
//! Increments are per tick, not per second; the frame driver decides how
//! many ticks run per unit of wall time.

use glam::Vec3;
use tracing::trace;
use voyage_config::FlightConfig;
use voyage_input::{InputPort, KeyBindings, SteeringInput, SteeringKey, SteeringKeyState};
use voyage_space::PointCloud;

use crate::axis::ClampedAxis;
use crate::camera::Camera;
use crate::telemetry::FlightTelemetry;

/// Owns rotation rates, velocity and steering key state. The camera and the
/// starfield are borrowed for each [`update`](Self::update).
#[derive(Debug, Clone)]
pub struct FlightController {
    pitch: ClampedAxis,
    yaw: ClampedAxis,
    roll: ClampedAxis,
    velocity: Vec3,
    thrust: f32,
    input: SteeringInput,
    ticks: u64,
}

impl Default for FlightController {
    fn default() -> Self {
        Self::from_config(&FlightConfig::default(), KeyBindings::default())
    }
}

impl FlightController {
    /// Build from config. Pitch turns about local +X, yaw about +Y, roll about +Z.
    pub fn from_config(config: &FlightConfig, bindings: KeyBindings) -> Self {
        Self {
            pitch: ClampedAxis::from_config(Vec3::X, &config.pitch),
            yaw: ClampedAxis::from_config(Vec3::Y, &config.yaw),
            roll: ClampedAxis::from_config(Vec3::Z, &config.roll),
            velocity: Vec3::ZERO,
            thrust: config.thrust,
            input: SteeringInput::new(bindings),
            ticks: 0,
        }
    }

    /// Advance one tick: rotate the camera, accumulate thrust, then move the
    /// camera and the starfield anchor by the velocity.
    pub fn update(&mut self, camera: &mut Camera, starfield: &mut PointCloud) {
        let keys = *self.input.state();

        steer(&mut self.pitch, &keys, SteeringKey::PitchUp, SteeringKey::PitchDown, camera);
        steer(&mut self.yaw, &keys, SteeringKey::YawLeft, SteeringKey::YawRight, camera);
        steer(&mut self.roll, &keys, SteeringKey::RollLeft, SteeringKey::RollRight, camera);

        // Directions come from the camera after this tick's rotation.
        let thrusters = [
            (camera.forward(), SteeringKey::Forward, SteeringKey::Backward),
            (camera.right(), SteeringKey::StrafeRight, SteeringKey::StrafeLeft),
            (camera.up(), SteeringKey::Rise, SteeringKey::Sink),
        ];
        for (direction, positive, negative) in thrusters {
            if keys.is_held(positive) {
                self.velocity += direction * self.thrust;
            }
            if keys.is_held(negative) {
                self.velocity += direction * -self.thrust;
            }
        }

        camera.position += self.velocity;
        starfield.translate(self.velocity);
        self.ticks += 1;

        trace!(
            tick = self.ticks,
            velocity = ?self.velocity,
            pitch = self.pitch.rate(),
            yaw = self.yaw.rate(),
            roll = self.roll.rate(),
            "flight tick"
        );
    }

    /// Snapshot of the controller and camera for display.
    pub fn telemetry(&self, camera: &Camera) -> FlightTelemetry {
        FlightTelemetry {
            tick: self.ticks,
            position: camera.position,
            velocity: self.velocity,
            speed: self.speed(),
            forward: camera.forward(),
            pitch_rate: self.pitch.rate(),
            yaw_rate: self.yaw.rate(),
            roll_rate: self.roll.rate(),
        }
    }

    /// Current velocity, world units per tick.
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Magnitude of the velocity.
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    pub fn pitch(&self) -> &ClampedAxis {
        &self.pitch
    }

    pub fn yaw(&self) -> &ClampedAxis {
        &self.yaw
    }

    pub fn roll(&self) -> &ClampedAxis {
        &self.roll
    }

    /// Velocity added per tick per held thrust key.
    pub fn thrust(&self) -> f32 {
        self.thrust
    }

    /// Number of completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Held steering flags as the next tick will see them.
    pub fn keys(&self) -> &SteeringKeyState {
        self.input.state()
    }

    pub fn bindings(&self) -> &KeyBindings {
        self.input.bindings()
    }

    pub fn set_bindings(&mut self, bindings: KeyBindings) {
        self.input.set_bindings(bindings);
    }
}

impl InputPort for FlightController {
    fn on_key_down(&mut self, code: &str) {
        self.input.on_key_down(code);
    }

    fn on_key_up(&mut self, code: &str) {
        self.input.on_key_up(code);
    }
}

/// Advance one axis from its key pair and apply its rate to the camera.
fn steer(
    axis: &mut ClampedAxis,
    keys: &SteeringKeyState,
    increase: SteeringKey,
    decrease: SteeringKey,
    camera: &mut Camera,
) {
    axis.advance(keys.is_held(increase), keys.is_held(decrease));
    if axis.rate() != 0.0 {
        camera.rotate_on_axis(axis.axis(), axis.rate());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axis::AxisState;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn rig() -> (FlightController, Camera, PointCloud) {
        (FlightController::default(), Camera::default(), PointCloud::new())
    }

    fn approx(a: Vec3, b: Vec3, eps: f32) -> bool {
        (a - b).length() < eps
    }

    #[test]
    fn test_idle_tick_changes_nothing() {
        let (mut ctl, mut cam, mut stars) = rig();
        for _ in 0..10 {
            ctl.update(&mut cam, &mut stars);
        }
        assert_eq!(cam, Camera::default());
        assert_eq!(stars.origin_offset(), Vec3::ZERO);
        assert_eq!(ctl.ticks(), 10);
    }

    #[test]
    fn test_forward_five_ticks() {
        let (mut ctl, mut cam, mut stars) = rig();
        ctl.on_key_down("KeyW");
        for _ in 0..5 {
            ctl.update(&mut cam, &mut stars);
        }
        assert!(approx(ctl.velocity(), Vec3::new(0.0, 0.0, -0.0005), 1e-7));
        // Position integrates 1+2+3+4+5 thrust increments.
        assert!(approx(cam.position, Vec3::new(0.0, 0.0, -0.0015), 1e-7));
    }

    #[test]
    fn test_velocity_persists_without_input() {
        let (mut ctl, mut cam, mut stars) = rig();
        ctl.on_key_down("KeyW");
        ctl.update(&mut cam, &mut stars);
        ctl.on_key_up("KeyW");
        let v = ctl.velocity();
        for _ in 0..100 {
            ctl.update(&mut cam, &mut stars);
        }
        assert_eq!(ctl.velocity(), v);
        assert!(approx(cam.position, v * 101.0, 1e-6));
    }

    #[test]
    fn test_opposing_thrust_cancels_velocity() {
        let (mut ctl, mut cam, mut stars) = rig();
        ctl.on_key_down("KeyR");
        for _ in 0..3 {
            ctl.update(&mut cam, &mut stars);
        }
        ctl.on_key_up("KeyR");
        ctl.on_key_down("KeyF");
        for _ in 0..3 {
            ctl.update(&mut cam, &mut stars);
        }
        assert!(ctl.velocity().length() < 1e-9);
    }

    #[test]
    fn test_both_thrust_keys_sum_to_zero() {
        let (mut ctl, mut cam, mut stars) = rig();
        ctl.on_key_down("forward");
        ctl.on_key_down("backward");
        ctl.update(&mut cam, &mut stars);
        assert_eq!(ctl.velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_strafe_and_rise_follow_camera_axes() {
        let (mut ctl, mut cam, mut stars) = rig();
        ctl.on_key_down("strafe-right");
        ctl.on_key_down("rise");
        ctl.update(&mut cam, &mut stars);
        assert!(approx(ctl.velocity(), Vec3::new(0.0001, 0.0001, 0.0), 1e-9));

        ctl.on_key_up("strafe-right");
        ctl.on_key_up("rise");
        ctl.on_key_down("strafe-left");
        ctl.on_key_down("sink");
        ctl.update(&mut cam, &mut stars);
        assert!(ctl.velocity().length() < 1e-9);
    }

    #[test]
    fn test_thrust_uses_post_rotation_direction() {
        let (mut ctl, mut cam, mut stars) = rig();
        ctl.on_key_down("yaw-left");
        ctl.on_key_down("forward");
        ctl.update(&mut cam, &mut stars);
        // The camera already yawed by one step when thrust is sampled.
        let step = ctl.yaw().step();
        let expected = Vec3::new(-step.sin(), 0.0, -step.cos()) * ctl.thrust();
        assert!(approx(ctl.velocity(), expected, 1e-9));
    }

    #[test]
    fn test_sticky_rotation_after_release() {
        let (mut ctl, mut cam, mut stars) = rig();
        ctl.on_key_down("KeyA");
        for _ in 0..10 {
            ctl.update(&mut cam, &mut stars);
        }
        ctl.on_key_up("KeyA");
        let rate = ctl.yaw().rate();
        assert!(rate > 0.0);

        let mut previous = cam.forward();
        for _ in 0..20 {
            ctl.update(&mut cam, &mut stars);
            assert_eq!(ctl.yaw().rate(), rate);
            let forward = cam.forward();
            let turned = previous.angle_between(forward);
            assert!((turned - rate).abs() < 1e-3, "turned {turned}, rate {rate}");
            previous = forward;
        }
    }

    #[test]
    fn test_monotone_saturation() {
        let (mut ctl, mut cam, mut stars) = rig();
        let span = ctl.pitch().max() - ctl.pitch().min();
        let n = (span / ctl.pitch().step()).ceil() as usize;
        ctl.on_key_down("pitch-up");
        for _ in 0..n {
            ctl.update(&mut cam, &mut stars);
        }
        assert_eq!(ctl.pitch().rate(), ctl.pitch().max());
        for _ in 0..25 {
            ctl.update(&mut cam, &mut stars);
            assert_eq!(ctl.pitch().state(), AxisState::SaturatedPositive);
        }
    }

    #[test]
    fn test_roll_keys_drive_roll_axis_only() {
        let (mut ctl, mut cam, mut stars) = rig();
        ctl.on_key_down("KeyC");
        ctl.update(&mut cam, &mut stars);
        assert!(ctl.roll().rate() < 0.0);
        assert_eq!(ctl.pitch().rate(), 0.0);
        assert_eq!(ctl.yaw().rate(), 0.0);
        // Pure roll leaves the view direction alone.
        assert!(approx(cam.forward(), Vec3::NEG_Z, 1e-6));
    }

    #[test]
    fn test_unknown_codes_are_ignored() {
        let (mut ctl, mut cam, mut stars) = rig();
        ctl.on_key_down("Escape");
        ctl.on_key_down("");
        ctl.update(&mut cam, &mut stars);
        assert!(!ctl.keys().any_held());
        assert_eq!(ctl.velocity(), Vec3::ZERO);
    }

    #[test]
    fn test_clamp_invariant_under_random_key_histories() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
        let (mut ctl, mut cam, mut stars) = rig();
        for _ in 0..5_000 {
            let key = SteeringKey::ALL[rng.random_range(0..SteeringKey::COUNT)];
            if rng.random_bool(0.5) {
                ctl.on_key_down(key.name());
            } else {
                ctl.on_key_up(key.name());
            }
            ctl.update(&mut cam, &mut stars);
            for axis in [ctl.pitch(), ctl.yaw(), ctl.roll()] {
                assert!(
                    axis.min() <= axis.rate() && axis.rate() <= axis.max(),
                    "rate {} escaped [{}, {}]",
                    axis.rate(),
                    axis.min(),
                    axis.max()
                );
            }
        }
    }

    #[test]
    fn test_starfield_moves_with_camera() {
        let mut rng = ChaCha8Rng::seed_from_u64(17);
        let (mut ctl, mut cam, mut stars) = rig();
        let mut travelled = Vec3::ZERO;
        for _ in 0..2_000 {
            let key = SteeringKey::ALL[rng.random_range(0..SteeringKey::COUNT)];
            if rng.random_bool(0.6) {
                ctl.on_key_down(key.name());
            } else {
                ctl.on_key_up(key.name());
            }
            ctl.update(&mut cam, &mut stars);
            travelled += ctl.velocity();
            assert_eq!(stars.origin_offset(), travelled);
            assert_eq!(cam.position, stars.origin_offset());
        }
    }

    #[test]
    fn test_offset_camera_keeps_relative_anchor() {
        let mut ctl = FlightController::default();
        let mut cam = Camera::new(Vec3::new(0.0, 0.0, 400.0));
        let mut stars = PointCloud::new();
        stars.set_origin_offset(cam.position);
        ctl.on_key_down("KeyW");
        ctl.on_key_down("KeyD");
        for _ in 0..500 {
            ctl.update(&mut cam, &mut stars);
        }
        assert!(approx(cam.position - stars.origin_offset(), Vec3::ZERO, 1e-3));
        assert!(cam.position.z < 400.0);
    }

    #[test]
    fn test_rebinding_takes_effect() {
        let (mut ctl, mut cam, mut stars) = rig();
        let mut bindings = KeyBindings::empty();
        bindings.bind("KeyI", SteeringKey::Forward);
        ctl.set_bindings(bindings);
        ctl.on_key_down("KeyW");
        ctl.update(&mut cam, &mut stars);
        assert_eq!(ctl.velocity(), Vec3::ZERO);
        ctl.on_key_down("KeyI");
        ctl.update(&mut cam, &mut stars);
        assert!(ctl.velocity().z < 0.0);
    }

    #[test]
    fn test_custom_config() {
        let config = FlightConfig {
            thrust: 0.5,
            ..Default::default()
        };
        let mut ctl = FlightController::from_config(&config, KeyBindings::default());
        let mut cam = Camera::default();
        let mut stars = PointCloud::new();
        ctl.on_key_down("KeyS");
        ctl.update(&mut cam, &mut stars);
        assert!(approx(ctl.velocity(), Vec3::new(0.0, 0.0, 0.5), 1e-6));
    }
}
