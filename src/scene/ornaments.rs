//! Ornament meshes hung on the tree.

use bevy::ecs::hierarchy::ChildSpawnerCommands;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use bevy_tree_geometry::{blend_position, Ornament, OrnamentShape};

use crate::blend::BlendDriver;
use crate::constants::{palette, sizes};

/// Shared mesh and material per ornament shape.
#[derive(Resource, Clone, Default)]
pub struct OrnamentAssets {
    pub meshes: HashMap<OrnamentShape, Handle<Mesh>>,
    pub materials: HashMap<OrnamentShape, Handle<StandardMaterial>>,
}

impl OrnamentAssets {
    pub fn new(meshes: &mut Assets<Mesh>, materials: &mut Assets<StandardMaterial>) -> Self {
        let mut assets = Self::default();
        for shape in OrnamentShape::ALL {
            let mesh = match shape {
                OrnamentShape::Bauble => meshes.add(Sphere::new(0.5).mesh().uv(24, 16)),
                OrnamentShape::Gift => meshes.add(Cuboid::new(0.8, 0.8, 0.8)),
                OrnamentShape::Gem => meshes.add(Tetrahedron::default()),
            };
            let material = match shape {
                OrnamentShape::Bauble => StandardMaterial {
                    base_color: palette::BAUBLE,
                    metallic: 0.9,
                    perceptual_roughness: 0.15,
                    ..default()
                },
                OrnamentShape::Gift => StandardMaterial {
                    base_color: palette::GIFT,
                    metallic: 1.0,
                    perceptual_roughness: 0.3,
                    ..default()
                },
                OrnamentShape::Gem => StandardMaterial {
                    base_color: palette::GEM,
                    emissive: palette::GEM.to_linear() * 0.5,
                    metallic: 0.2,
                    perceptual_roughness: 0.05,
                    ..default()
                },
            };
            assets.meshes.insert(shape, mesh);
            assets.materials.insert(shape, materials.add(material));
        }
        assets
    }
}

pub fn spawn_ornaments(
    parent: &mut ChildSpawnerCommands,
    ornaments: Vec<Ornament>,
    assets: &OrnamentAssets,
) {
    for ornament in ornaments {
        let (Some(mesh), Some(material)) = (
            assets.meshes.get(&ornament.shape),
            assets.materials.get(&ornament.shape),
        ) else {
            warn!("No assets for ornament shape {}", ornament.shape.name());
            continue;
        };

        parent.spawn((
            Name::new(format!("{} {}", ornament.shape.name(), ornament.index)),
            Mesh3d(mesh.clone()),
            MeshMaterial3d(material.clone()),
            ornament_transform(&ornament, 0.0, 0.0),
            ornament,
        ));
    }
}

/// Displayed transform of `ornament` at blend `progress` and time `t`.
///
/// Ornaments tumble freely and bob gently once they hang on the tree.
pub fn ornament_transform(ornament: &Ornament, progress: f32, t: f32) -> Transform {
    let seed = ornament.phase / std::f32::consts::TAU;
    let bob = sizes::ORNAMENT_BOB * progress * (t * 1.5 + ornament.phase).sin();
    let translation = blend_position(ornament.scattered, ornament.formed, progress, seed) + Vec3::Y * bob;

    let spin = ornament.rotation_speed * t;
    Transform::from_translation(translation)
        .with_rotation(Quat::from_euler(EulerRot::XYZ, spin.x, spin.y, spin.z))
        .with_scale(Vec3::splat(ornament.scale))
}

pub fn animate_ornaments(
    time: Res<Time>,
    blend: Res<BlendDriver>,
    mut query: Query<(&Ornament, &mut Transform)>,
) {
    let progress = blend.progress();
    let t = time.elapsed_secs();
    for (ornament, mut transform) in &mut query {
        *transform = ornament_transform(ornament, progress, t);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ornament() -> Ornament {
        Ornament {
            index: 3,
            scattered: Vec3::new(0.0, 14.0, 0.0),
            formed: Vec3::new(2.0, -1.0, 1.0),
            rotation_speed: Vec3::new(0.5, -0.25, 0.1),
            scale: 0.3,
            shape: OrnamentShape::Gift,
            phase: 1.2,
        }
    }

    #[test]
    fn scattered_ornaments_do_not_bob() {
        let o = ornament();
        for step in 0..20 {
            assert_eq!(ornament_transform(&o, 0.0, step as f32).translation, o.scattered);
        }
    }

    #[test]
    fn formed_ornaments_bob_around_their_spot() {
        let o = ornament();
        let transform = ornament_transform(&o, 1.0, 2.0);
        let drift = transform.translation - o.formed;
        assert_eq!(drift.x, 0.0);
        assert_eq!(drift.z, 0.0);
        assert!(drift.y.abs() <= sizes::ORNAMENT_BOB);
        assert_eq!(transform.scale, Vec3::splat(0.3));
    }

    #[test]
    fn assets_cover_every_shape() {
        let mut meshes = Assets::<Mesh>::default();
        let mut materials = Assets::<StandardMaterial>::default();
        let assets = OrnamentAssets::new(&mut meshes, &mut materials);
        for shape in OrnamentShape::ALL {
            assert!(assets.meshes.contains_key(&shape));
            assert!(assets.materials.contains_key(&shape));
        }
    }
}
