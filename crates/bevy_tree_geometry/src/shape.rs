//! Tree shape parameters.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Tolerance used by the bound predicates to absorb float rounding.
const BOUNDS_EPSILON: f32 = 1e-4;

/// Fixed parameters describing the formed cone and the scattered shell.
#[derive(Clone, Debug, PartialEq, Reflect, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeShape {
    /// Total cone height. The tree is centered on the origin, so formed
    /// points have `y` in `[-height / 2, height / 2]`.
    pub height: f32,
    /// Cone radius at the base.
    pub radius: f32,
    /// Maximum random offset applied to formed points.
    pub jitter: f32,
    /// Inner radius of the scattered shell.
    pub scatter_min: f32,
    /// Outer radius of the scattered shell.
    pub scatter_max: f32,
    /// Height fractions (0 = base, 1 = tip) that ornaments may occupy.
    pub ornament_band: (f32, f32),
}

impl Default for TreeShape {
    fn default() -> Self {
        Self {
            height: 14.0,
            radius: 5.0,
            jitter: 0.3,
            scatter_min: 12.0,
            scatter_max: 22.0,
            ornament_band: (0.05, 0.9),
        }
    }
}

impl TreeShape {
    /// Set the cone height.
    pub fn with_height(mut self, height: f32) -> Self {
        self.height = height.max(0.0);
        self
    }

    /// Set the base radius.
    pub fn with_radius(mut self, radius: f32) -> Self {
        self.radius = radius.max(0.0);
        self
    }

    /// Set the jitter bound.
    pub fn with_jitter(mut self, jitter: f32) -> Self {
        self.jitter = jitter.max(0.0);
        self
    }

    /// Set the scattered shell. The bounds are swapped if given in reverse.
    pub fn with_scatter_shell(mut self, min: f32, max: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        self.scatter_min = min.max(0.0);
        self.scatter_max = max.max(0.0);
        self
    }

    /// Half of the cone height.
    pub fn half_height(&self) -> f32 {
        self.height * 0.5
    }

    /// Position of the cone tip.
    pub fn tip(&self) -> Vec3 {
        Vec3::Y * self.half_height()
    }

    /// Cone radius at `fraction` of the height, measured from the base.
    pub fn radius_at(&self, fraction: f32) -> f32 {
        self.radius * (1.0 - fraction.clamp(0.0, 1.0))
    }

    /// Largest radial distance a formed point may have.
    pub fn max_formed_radius(&self) -> f32 {
        self.radius + self.jitter
    }

    /// Whether `point` lies inside the bounds of the formed cone.
    pub fn formed_bounds_contain(&self, point: Vec3) -> bool {
        let half = self.half_height() + BOUNDS_EPSILON;
        let radial = Vec2::new(point.x, point.z).length();
        point.y >= -half && point.y <= half && radial <= self.max_formed_radius() + BOUNDS_EPSILON
    }

    /// Whether `point` lies inside the scattered shell.
    pub fn scattered_bounds_contain(&self, point: Vec3) -> bool {
        let distance = point.length();
        distance >= self.scatter_min - BOUNDS_EPSILON && distance <= self.scatter_max + BOUNDS_EPSILON
    }
}
