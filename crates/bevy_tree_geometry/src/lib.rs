//! # bevy_tree_geometry
//!
//! Procedural point generation for particle trees.
//!
//! Every generated item carries two positions: a *scattered* one on a sphere
//! shell around the origin and a *formed* one on the surface of a cone. A
//! renderer blends between them with [`blend_position`].
//!
//! ## Quick Start
//!
//! ```ignore
//! use bevy::prelude::*;
//! use bevy_tree_geometry::prelude::*;
//!
//! fn setup(mut commands: Commands) {
//!     let shape = TreeShape::default().with_height(12.0);
//!     let mut rng = Sampler::Seeded { seed: 7 }.rng();
//!
//!     for particle in generate_particles(2_000, &shape, &mut rng) {
//!         commands.spawn((
//!             Transform::from_translation(particle.scattered),
//!             particle,
//!         ));
//!     }
//! }
//! ```

pub mod blend;
pub mod ornament;
pub mod particle;
pub mod sampling;
pub mod shape;

use bevy::prelude::*;

pub use blend::{blend_position, ease_in_out};
pub use ornament::{generate_ornaments, Ornament, OrnamentShape};
pub use particle::{generate_particles, Particle};
pub use sampling::{cone_spiral_point, sphere_shell_point, Sampler, GOLDEN_ANGLE};
pub use shape::TreeShape;

/// Convenient re-exports of commonly used types.
pub mod prelude {
    pub use crate::blend::blend_position;
    pub use crate::ornament::{generate_ornaments, Ornament, OrnamentShape};
    pub use crate::particle::{generate_particles, Particle};
    pub use crate::sampling::Sampler;
    pub use crate::shape::TreeShape;
    pub use crate::TreeGeometryPlugin;
}

/// Registers the geometry types for reflection.
pub struct TreeGeometryPlugin;

impl Plugin for TreeGeometryPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<TreeShape>()
            .register_type::<Particle>()
            .register_type::<Ornament>()
            .register_type::<OrnamentShape>();
    }
}
