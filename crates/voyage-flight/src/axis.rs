//! A single rotation axis with a persistent, clamped per-tick rate.

use glam::{Quat, Vec3};
use voyage_config::AxisConfig;

/// Where an axis rate sits within its bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisState {
    /// `rate == 0`.
    AtRest,
    /// Strictly between the bounds and nonzero.
    Ramping,
    /// `rate == max`.
    SaturatedPositive,
    /// `rate == min`.
    SaturatedNegative,
}

/// Angular rate about a fixed local axis.
///
/// The rate is applied as a rotation every tick whether or not a key is held;
/// only opposing input walks it back toward zero. Each increment or decrement
/// saturates at its own bound, so `min <= rate <= max` holds after every call
/// to [`advance`](Self::advance).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClampedAxis {
    rate: f32,
    step: f32,
    min: f32,
    max: f32,
    axis: Vec3,
}

impl ClampedAxis {
    /// An axis at rest. Reversed bounds are swapped and `axis` is normalized.
    pub fn new(axis: Vec3, step: f32, min: f32, max: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            rate: 0.0_f32.max(min).min(max),
            step: step.abs(),
            min,
            max,
            axis: axis.normalize_or(Vec3::Z),
        }
    }

    pub fn from_config(axis: Vec3, config: &AxisConfig) -> Self {
        Self::new(axis, config.step, config.min, config.max)
    }

    /// One tick of input. Both clauses apply when both keys are held.
    pub fn advance(&mut self, increase: bool, decrease: bool) {
        if increase && self.rate < self.max {
            self.rate = (self.rate + self.step).min(self.max);
        }
        if decrease && self.rate > self.min {
            self.rate = (self.rate - self.step).max(self.min);
        }
    }

    /// Rotation applied this tick: `rate` radians about the local axis.
    pub fn rotation(&self) -> Quat {
        Quat::from_axis_angle(self.axis, self.rate)
    }

    pub fn state(&self) -> AxisState {
        if self.rate == 0.0 {
            AxisState::AtRest
        } else if self.rate >= self.max {
            AxisState::SaturatedPositive
        } else if self.rate <= self.min {
            AxisState::SaturatedNegative
        } else {
            AxisState::Ramping
        }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn step(&self) -> f32 {
        self.step
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    /// Local unit axis the rate rotates about.
    pub fn axis(&self) -> Vec3 {
        self.axis
    }
}
