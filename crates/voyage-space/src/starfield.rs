//! Procedural starfield: rejection sampling of point stars into a spherical shell.
//!
//! Candidates are drawn uniformly from the cube enclosing the outer sphere and
//! kept only if they land between the inner (void) and outer radius. Rejected
//! candidates are not redrawn, so a cloud holds fewer stars than were requested.
//! The fraction kept is roughly the shell volume over the cube volume.

use glam::Vec3;

use crate::random::RandomSource;

/// Base grey level of a star before jitter.
const BASE_INTENSITY: f32 = 0.8;
/// Width of the uniform jitter around [`BASE_INTENSITY`].
const INTENSITY_SPREAD: f32 = 1.0;
/// Largest intensity below `BASE_INTENSITY + INTENSITY_SPREAD / 2`. The top
/// unit draw would otherwise round up onto the excluded bound.
const MAX_INTENSITY: f32 = f32::from_bits((BASE_INTENSITY + INTENSITY_SPREAD * 0.5).to_bits() - 1);

/// A single accepted star.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Star {
    /// Position relative to the cloud's origin.
    pub position: Vec3,
    /// Grey level in `[0.3, 1.3)`. Values above 1.0 are left for the renderer to clamp.
    pub intensity: f32,
}

/// The starfield asset: parallel position and color buffers plus the world
/// anchor the whole cloud is drawn at.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointCloud {
    positions: Vec<Vec3>,
    colors: Vec<[f32; 3]>,
    origin_offset: Vec3,
}

impl PointCloud {
    /// An empty cloud anchored at the world origin.
    pub fn new() -> Self {
        Self::default()
    }

    fn with_capacity(capacity: usize) -> Self {
        Self {
            positions: Vec::with_capacity(capacity),
            colors: Vec::with_capacity(capacity),
            origin_offset: Vec3::ZERO,
        }
    }

    fn push(&mut self, star: Star) {
        self.positions.push(star.position);
        self.colors.push([star.intensity; 3]);
    }

    /// Number of stars.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Star positions relative to [`origin_offset`](Self::origin_offset).
    pub fn positions(&self) -> &[Vec3] {
        &self.positions
    }

    /// One RGB triplet per star. Stars are monochrome, so all three channels match.
    pub fn colors(&self) -> &[[f32; 3]] {
        &self.colors
    }

    /// Iterate the stars back out of the buffers.
    pub fn stars(&self) -> impl Iterator<Item = Star> + '_ {
        self.positions
            .iter()
            .zip(&self.colors)
            .map(|(&position, color)| Star {
                position,
                intensity: color[0],
            })
    }

    /// Positions flattened to `[x0, y0, z0, x1, ...]` for vertex upload.
    pub fn position_buffer(&self) -> Vec<f32> {
        self.positions.iter().flat_map(|p| p.to_array()).collect()
    }

    /// Colors flattened to `[r0, g0, b0, r1, ...]` for vertex upload.
    pub fn color_buffer(&self) -> Vec<f32> {
        self.colors.iter().flatten().copied().collect()
    }

    /// Where the cloud is anchored in world space.
    pub fn origin_offset(&self) -> Vec3 {
        self.origin_offset
    }

    pub fn set_origin_offset(&mut self, offset: Vec3) {
        self.origin_offset = offset;
    }

    /// Move the anchor by `delta`.
    pub fn translate(&mut self, delta: Vec3) {
        self.origin_offset += delta;
    }
}

/// Shell parameters for star placement.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StarfieldGenerator {
    count: u32,
    sphere_radius: f32,
    void_radius: f32,
}

impl StarfieldGenerator {
    /// `count` candidates placed between `void_radius` and `sphere_radius`.
    pub fn new(count: u32, sphere_radius: f32, void_radius: f32) -> Self {
        Self {
            count,
            sphere_radius,
            void_radius,
        }
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn sphere_radius(&self) -> f32 {
        self.sphere_radius
    }

    pub fn void_radius(&self) -> f32 {
        self.void_radius
    }

    /// True when no point can satisfy the shell test: zero candidates, a
    /// non-positive or non-finite outer radius, or an inner radius that is
    /// not strictly smaller than the outer one.
    pub fn is_degenerate(&self) -> bool {
        self.count == 0
            || !self.sphere_radius.is_finite()
            || !self.void_radius.is_finite()
            || self.sphere_radius <= 0.0
            || self.void_radius >= self.sphere_radius
    }

    /// Expected fraction of candidates kept: shell volume over cube volume.
    pub fn expected_acceptance(&self) -> f64 {
        if self.is_degenerate() {
            return 0.0;
        }
        let outer = f64::from(self.sphere_radius);
        let inner = f64::from(self.void_radius.max(0.0));
        let shell = 4.0 / 3.0 * std::f64::consts::PI * (outer.powi(3) - inner.powi(3));
        let cube = (2.0 * outer).powi(3);
        shell / cube
    }

    /// Run the rejection sampler.
    ///
    /// Each candidate consumes three draws for its coordinates; an accepted
    /// candidate consumes a fourth for its intensity.
    pub fn generate<R: RandomSource + ?Sized>(&self, rng: &mut R) -> PointCloud {
        if self.is_degenerate() {
            log::debug!(
                "Degenerate starfield (count={}, sphere={}, void={}), returning empty cloud",
                self.count,
                self.sphere_radius,
                self.void_radius
            );
            return PointCloud::new();
        }

        let r = self.sphere_radius;
        let estimate = (f64::from(self.count) * self.expected_acceptance()).ceil() as usize;
        let mut cloud = PointCloud::with_capacity(estimate);

        for _ in 0..self.count {
            let position = Vec3::new(
                rng.next_range(-r, r),
                rng.next_range(-r, r),
                rng.next_range(-r, r),
            );
            let d = position.length();
            if d < self.void_radius || d > self.sphere_radius {
                continue;
            }

            let intensity =
                (BASE_INTENSITY + (rng.next_unit() - 0.5) * INTENSITY_SPREAD).min(MAX_INTENSITY);
            cloud.push(Star {
                position,
                intensity,
            });
        }

        log::debug!(
            "Generated starfield: {} of {} candidates kept ({:.1}% expected)",
            cloud.len(),
            self.count,
            self.expected_acceptance() * 100.0
        );
        cloud
    }
}

/// Generate a starfield in one call. See [`StarfieldGenerator::generate`].
pub fn generate<R: RandomSource + ?Sized>(
    count: u32,
    sphere_radius: f32,
    void_radius: f32,
    rng: &mut R,
) -> PointCloud {
    StarfieldGenerator::new(count, sphere_radius, void_radius).generate(rng)
}
