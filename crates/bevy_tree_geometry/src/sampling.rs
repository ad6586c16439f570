//! Point sampling on the formed cone and the scattered shell.

use std::f32::consts::{PI, TAU};

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::shape::TreeShape;

/// Angle between consecutive spiral points, `PI * (3 - sqrt(5))`.
pub const GOLDEN_ANGLE: f32 = 2.399_963_3;

/// Source of randomness for generation.
#[derive(Clone, Debug, Default, PartialEq, Reflect, Serialize, Deserialize)]
pub enum Sampler {
    /// Seeded from system entropy; output differs on every run.
    #[default]
    Entropy,
    /// Fixed seed for reproducible output.
    Seeded { seed: u64 },
}

impl Sampler {
    /// Returns the seed if seeded, None otherwise.
    pub fn seed(&self) -> Option<u64> {
        match self {
            Sampler::Entropy => None,
            Sampler::Seeded { seed } => Some(*seed),
        }
    }

    /// Build a random number generator for this sampler.
    pub fn rng(&self) -> fastrand::Rng {
        match self.seed() {
            Some(seed) => fastrand::Rng::with_seed(seed),
            None => fastrand::Rng::new(),
        }
    }
}

/// Uniform value in `[-bound, bound)`.
pub(crate) fn symmetric(rng: &mut fastrand::Rng, bound: f32) -> f32 {
    (rng.f32() * 2.0 - 1.0) * bound
}

/// Uniform value in `[min, max)`.
pub(crate) fn range(rng: &mut fastrand::Rng, min: f32, max: f32) -> f32 {
    min + rng.f32() * (max - min)
}

/// Formed position for item `index` of `count` on a spiral around the cone.
///
/// Height grows with the index, the angle advances by [`GOLDEN_ANGLE`] per
/// index and the radius follows the cone with up to `shape.jitter` of noise.
pub fn cone_spiral_point(
    index: usize,
    count: usize,
    shape: &TreeShape,
    rng: &mut fastrand::Rng,
) -> Vec3 {
    let count = count.max(1);
    let fraction = (index as f32 + 0.5) / count as f32;
    let half = shape.half_height();

    let y = (-half + fraction * shape.height + symmetric(rng, shape.jitter)).clamp(-half, half);
    let radius = (shape.radius_at(fraction) + symmetric(rng, shape.jitter)).max(0.0);
    let angle = index as f32 * GOLDEN_ANGLE;

    Vec3::new(radius * angle.cos(), y, radius * angle.sin())
}

/// Scattered position on the sphere shell via spherical coordinates.
pub fn sphere_shell_point(shape: &TreeShape, rng: &mut fastrand::Rng) -> Vec3 {
    let theta = rng.f32() * TAU;
    let phi = (2.0 * rng.f32() - 1.0).clamp(-1.0, 1.0).acos();
    let radius = range(rng, shape.scatter_min, shape.scatter_max);

    debug_assert!((0.0..=PI).contains(&phi));

    Vec3::new(
        radius * phi.sin() * theta.cos(),
        radius * phi.cos(),
        radius * phi.sin() * theta.sin(),
    )
}
