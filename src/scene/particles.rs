//! Needle particles.

use std::f32::consts::TAU;

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::prelude::*;
use bevy_tree_geometry::{blend_position, Particle};

use crate::blend::BlendDriver;
use crate::constants::{palette, sizes};

/// Shared needle materials, split by particle seed.
#[derive(Resource, Clone)]
pub struct NeedleMaterials {
    pub emerald: Handle<StandardMaterial>,
    pub gold: Handle<StandardMaterial>,
}

impl NeedleMaterials {
    pub fn new(materials: &mut Assets<StandardMaterial>) -> Self {
        let glowing = |color: Color| StandardMaterial {
            base_color: color,
            emissive: color.to_linear() * palette::NEEDLE_EMISSIVE_STRENGTH,
            ..default()
        };
        Self {
            emerald: materials.add(glowing(palette::NEEDLE_EMERALD)),
            gold: materials.add(glowing(palette::NEEDLE_GOLD)),
        }
    }

    /// Material for a particle with the given seed.
    pub fn for_seed(&self, seed: f32) -> Handle<StandardMaterial> {
        if seed < palette::GOLD_SHARE {
            self.gold.clone()
        } else {
            self.emerald.clone()
        }
    }
}

/// Spawn one entity per particle. All of them share a mesh and one of two
/// materials, so Bevy draws them as instanced batches.
pub fn spawn_particles(
    parent: &mut ChildSpawnerCommands,
    particles: Vec<Particle>,
    mesh: &Handle<Mesh>,
    materials: &NeedleMaterials,
) {
    for particle in particles {
        let transform = particle_transform(&particle, 0.0, 0.0);
        parent.spawn((
            Mesh3d(mesh.clone()),
            MeshMaterial3d(materials.for_seed(particle.seed)),
            transform,
            particle,
        ));
    }
}

/// Displayed transform of `particle` at blend `progress` and time `t`.
pub fn particle_transform(particle: &Particle, progress: f32, t: f32) -> Transform {
    let translation = blend_position(particle.scattered, particle.formed, progress, particle.seed);
    let twinkle = 1.0 + sizes::TWINKLE_AMPLITUDE * (t * 3.0 + particle.seed * TAU).sin();
    Transform::from_translation(translation).with_scale(Vec3::splat(particle.size * twinkle))
}

pub fn animate_particles(
    time: Res<Time>,
    blend: Res<BlendDriver>,
    mut query: Query<(&Particle, &mut Transform)>,
) {
    let progress = blend.progress();
    let t = time.elapsed_secs();
    query.par_iter_mut().for_each(|(particle, mut transform)| {
        *transform = particle_transform(particle, progress, t);
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn particle() -> Particle {
        Particle {
            index: 0,
            scattered: Vec3::new(15.0, 0.0, 0.0),
            formed: Vec3::new(1.0, 2.0, 0.5),
            seed: 0.4,
            size: 1.0,
        }
    }

    #[test]
    fn endpoints_follow_progress() {
        let p = particle();
        assert_eq!(particle_transform(&p, 0.0, 3.0).translation, p.scattered);
        assert_eq!(particle_transform(&p, 1.0, 3.0).translation, p.formed);
    }

    #[test]
    fn twinkle_stays_within_amplitude() {
        let p = particle();
        for step in 0..100 {
            let scale = particle_transform(&p, 1.0, step as f32 * 0.1).scale.x;
            assert!(scale >= 1.0 - sizes::TWINKLE_AMPLITUDE - 1e-5);
            assert!(scale <= 1.0 + sizes::TWINKLE_AMPLITUDE + 1e-5);
        }
    }

    #[test]
    fn gold_share_by_seed() {
        let mut materials = Assets::<StandardMaterial>::default();
        let needles = NeedleMaterials::new(&mut materials);
        assert_eq!(needles.for_seed(0.0), needles.gold);
        assert_eq!(needles.for_seed(0.9), needles.emerald);
    }
}
