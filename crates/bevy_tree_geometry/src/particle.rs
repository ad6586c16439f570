//! Fine particles that make up the needles of the tree.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sampling::{cone_spiral_point, range, sphere_shell_point};
use crate::shape::TreeShape;

/// A single particle with both endpoint positions.
///
/// Generated once and never mutated; the displayed position is derived from
/// these fields and the current blend progress.
#[derive(Component, Clone, Debug, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct Particle {
    pub index: usize,
    /// Position in the dispersed cloud.
    pub scattered: Vec3,
    /// Position on the cone surface.
    pub formed: Vec3,
    /// Per-particle random value in `[0, 1)`, drives twinkle and stagger.
    pub seed: f32,
    /// Size factor in `[0.5, 1.5)`.
    pub size: f32,
}

/// Generate `count` particles for `shape`.
pub fn generate_particles(count: usize, shape: &TreeShape, rng: &mut fastrand::Rng) -> Vec<Particle> {
    (0..count)
        .map(|index| Particle {
            index,
            scattered: sphere_shell_point(shape, rng),
            formed: cone_spiral_point(index, count, shape, rng),
            seed: rng.f32(),
            size: range(rng, 0.5, 1.5),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_when_count_is_zero() {
        let mut rng = fastrand::Rng::new();
        assert!(generate_particles(0, &TreeShape::default(), &mut rng).is_empty());
    }

    #[test]
    fn every_particle_satisfies_shape_bounds() {
        let shape = TreeShape::default();
        let mut rng = fastrand::Rng::new();
        let particles = generate_particles(3_000, &shape, &mut rng);

        assert_eq!(particles.len(), 3_000);
        for (i, p) in particles.iter().enumerate() {
            assert_eq!(p.index, i);
            assert!(shape.formed_bounds_contain(p.formed), "formed {i}: {:?}", p.formed);
            assert!(shape.scattered_bounds_contain(p.scattered), "scattered {i}: {:?}", p.scattered);
            assert!((0.0..1.0).contains(&p.seed));
            assert!((0.5..1.5).contains(&p.size));
        }
    }

    #[test]
    fn custom_shape_bounds_hold() {
        let shape = TreeShape::default()
            .with_height(6.0)
            .with_radius(2.0)
            .with_jitter(0.1)
            .with_scatter_shell(4.0, 5.0);
        let mut rng = fastrand::Rng::with_seed(11);
        for p in generate_particles(1_000, &shape, &mut rng) {
            assert!(p.formed.y.abs() <= 3.0 + 1e-4);
            assert!(Vec2::new(p.formed.x, p.formed.z).length() <= 2.1 + 1e-4);
            assert!((4.0 - 1e-4..=5.0 + 1e-4).contains(&p.scattered.length()));
        }
    }
}
