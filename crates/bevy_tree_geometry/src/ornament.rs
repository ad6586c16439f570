//! Instanced ornaments hung on the tree.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::sampling::{range, sphere_shell_point, symmetric, GOLDEN_ANGLE};
use crate::shape::TreeShape;

/// The three ornament mesh variants.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize)]
pub enum OrnamentShape {
    /// Round glass ball.
    #[default]
    Bauble,
    /// Small wrapped box.
    Gift,
    /// Faceted gem.
    Gem,
}

impl OrnamentShape {
    pub const ALL: [OrnamentShape; 3] = [
        OrnamentShape::Bauble,
        OrnamentShape::Gift,
        OrnamentShape::Gem,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            OrnamentShape::Bauble => "Bauble",
            OrnamentShape::Gift => "Gift",
            OrnamentShape::Gem => "Gem",
        }
    }
}

/// A decorative ornament with both endpoint positions.
#[derive(Component, Clone, Debug, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub struct Ornament {
    pub index: usize,
    pub scattered: Vec3,
    pub formed: Vec3,
    /// Angular velocity around each local axis, in radians per second.
    pub rotation_speed: Vec3,
    pub scale: f32,
    pub shape: OrnamentShape,
    /// Phase offset in `[0, TAU)` for bobbing.
    pub phase: f32,
}

/// Generate `count` ornaments for `shape`.
///
/// Formed positions are placed at random heights inside the ornament band,
/// slightly outside the needles but never further than `radius + jitter`
/// from the trunk.
pub fn generate_ornaments(count: usize, shape: &TreeShape, rng: &mut fastrand::Rng) -> Vec<Ornament> {
    let (band_low, band_high) = shape.ornament_band;
    let band_low = band_low.clamp(0.0, 1.0);
    let band_high = band_high.clamp(band_low, 1.0);

    (0..count)
        .map(|index| {
            let fraction = range(rng, band_low, band_high);
            let y = -shape.half_height() + fraction * shape.height;
            let radius = shape.radius_at(fraction) + rng.f32() * shape.jitter;
            let angle = index as f32 * GOLDEN_ANGLE;

            Ornament {
                index,
                scattered: sphere_shell_point(shape, rng),
                formed: Vec3::new(radius * angle.cos(), y, radius * angle.sin()),
                rotation_speed: Vec3::new(
                    symmetric(rng, 1.0),
                    symmetric(rng, 1.0),
                    symmetric(rng, 1.0),
                ),
                scale: range(rng, 0.25, 0.45),
                shape: OrnamentShape::ALL[rng.usize(..OrnamentShape::ALL.len())],
                phase: rng.f32() * std::f32::consts::TAU,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ornaments_satisfy_shape_bounds() {
        let shape = TreeShape::default();
        let mut rng = fastrand::Rng::new();
        let ornaments = generate_ornaments(500, &shape, &mut rng);

        assert_eq!(ornaments.len(), 500);
        for o in &ornaments {
            assert!(shape.formed_bounds_contain(o.formed), "{:?}", o.formed);
            assert!(shape.scattered_bounds_contain(o.scattered), "{:?}", o.scattered);
            assert!((0.25..0.45).contains(&o.scale));
            assert!(o.rotation_speed.abs().max_element() <= 1.0);
        }
    }

    #[test]
    fn ornaments_stay_inside_the_band() {
        let shape = TreeShape::default();
        let mut rng = fastrand::Rng::with_seed(5);
        let low = -shape.half_height() + shape.ornament_band.0 * shape.height;
        let high = -shape.half_height() + shape.ornament_band.1 * shape.height;
        for o in generate_ornaments(300, &shape, &mut rng) {
            assert!(o.formed.y >= low - 1e-4 && o.formed.y <= high + 1e-4);
        }
    }

    #[test]
    fn all_shapes_appear() {
        let mut rng = fastrand::Rng::with_seed(9);
        let ornaments = generate_ornaments(300, &TreeShape::default(), &mut rng);
        for shape in OrnamentShape::ALL {
            assert!(
                ornaments.iter().any(|o| o.shape == shape),
                "no {} generated",
                shape.name()
            );
        }
    }
}
