//! The rendered tree: camera, lights, needles, ornaments and the topper.

mod ornaments;
mod particles;

pub use ornaments::{animate_ornaments, ornament_transform, spawn_ornaments, OrnamentAssets};
pub use particles::{animate_particles, particle_transform, spawn_particles, NeedleMaterials};

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::post_process::bloom::Bloom;
use bevy::prelude::*;
use bevy::render::view::Hdr;
use bevy_tree_geometry::{ease_in_out, generate_ornaments, generate_particles, TreeGeometryPlugin};

use crate::blend::BlendDriver;
use crate::constants::{lights, palette, sizes};
use crate::settings::TreeSettings;

pub struct TreeScenePlugin;

impl Plugin for TreeScenePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(TreeGeometryPlugin)
            .insert_resource(ClearColor(palette::BACKGROUND))
            .add_systems(Startup, (spawn_camera, spawn_lights, spawn_tree))
            .add_systems(
                Update,
                (
                    animate_particles,
                    animate_ornaments,
                    animate_topper,
                    orbit_camera,
                ),
            );
    }
}

/// Root entity all tree parts are parented to.
#[derive(Component)]
pub struct TreeRoot;

/// The glowing star on the tip.
#[derive(Component)]
pub struct TreeTopper {
    /// Resting position at the tip of the cone.
    pub tip: Vec3,
}

/// Slow automatic orbit around the trunk.
#[derive(Component)]
pub struct OrbitCamera {
    pub angle: f32,
    pub distance: f32,
    pub height: f32,
}

impl Default for OrbitCamera {
    fn default() -> Self {
        Self {
            angle: 0.0,
            distance: sizes::CAMERA_DISTANCE,
            height: sizes::CAMERA_HEIGHT,
        }
    }
}

impl OrbitCamera {
    pub fn transform(&self) -> Transform {
        let position = Vec3::new(
            self.distance * self.angle.sin(),
            self.height,
            self.distance * self.angle.cos(),
        );
        Transform::from_translation(position).looking_at(Vec3::ZERO, Vec3::Y)
    }
}

fn spawn_camera(mut commands: Commands) {
    let orbit = OrbitCamera::default();
    let transform = orbit.transform();

    commands.spawn((
        Name::new("Tree Camera"),
        orbit,
        Camera3d::default(),
        Hdr,
        Tonemapping::TonyMcMapface,
        Bloom::NATURAL,
        AmbientLight {
            color: lights::AMBIENT_COLOR,
            brightness: lights::AMBIENT_BRIGHTNESS,
            affects_lightmapped_meshes: true,
        },
        transform,
    ));
}

fn spawn_lights(mut commands: Commands) {
    commands.spawn((
        Name::new("Key Light"),
        PointLight {
            color: lights::KEY_COLOR,
            intensity: lights::KEY_INTENSITY,
            range: 60.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(lights::KEY_POSITION),
    ));

    commands.spawn((
        Name::new("Rim Light"),
        SpotLight {
            color: lights::RIM_COLOR,
            intensity: lights::RIM_INTENSITY,
            range: 60.0,
            outer_angle: 0.6,
            inner_angle: 0.3,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(lights::RIM_POSITION).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Generate all geometry once and spawn it under a [`TreeRoot`].
pub fn spawn_tree(
    mut commands: Commands,
    settings: Res<TreeSettings>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let shape = &settings.shape;
    let mut rng = settings.sampler().rng();

    let particles = generate_particles(settings.particle_count, shape, &mut rng);
    let ornaments = generate_ornaments(settings.ornament_count, shape, &mut rng);
    info!(
        "Generated {} particles and {} ornaments",
        particles.len(),
        ornaments.len()
    );

    let needle_materials = NeedleMaterials::new(&mut materials);
    let needle_mesh = meshes.add(Sphere::new(sizes::PARTICLE_RADIUS).mesh().uv(8, 6));
    let ornament_assets = OrnamentAssets::new(&mut meshes, &mut materials);

    let topper_mesh = meshes.add(Sphere::new(sizes::STAR_RADIUS));
    let topper_material = materials.add(StandardMaterial {
        base_color: palette::STAR,
        emissive: palette::STAR.to_linear() * palette::STAR_EMISSIVE_STRENGTH,
        ..default()
    });
    let tip = shape.tip() + Vec3::Y * sizes::STAR_RADIUS;

    commands
        .spawn((
            Name::new("Tree"),
            TreeRoot,
            Transform::default(),
            Visibility::default(),
        ))
        .with_children(|parent| {
            spawn_particles(parent, particles, &needle_mesh, &needle_materials);
            spawn_ornaments(parent, ornaments, &ornament_assets);

            parent.spawn((
                Name::new("Topper"),
                TreeTopper { tip },
                Mesh3d(topper_mesh),
                MeshMaterial3d(topper_material),
                Transform::from_translation(tip).with_scale(Vec3::ZERO),
            ));
        });

    commands.insert_resource(needle_materials);
    commands.insert_resource(ornament_assets);
}

/// Grow the topper in as the tree forms.
fn animate_topper(
    time: Res<Time>,
    blend: Res<BlendDriver>,
    mut query: Query<(&TreeTopper, &mut Transform)>,
) {
    let t = time.elapsed_secs();
    let grown = ease_in_out((blend.progress() - 0.7) / 0.3);
    for (topper, mut transform) in &mut query {
        transform.translation = topper.tip;
        transform.scale = Vec3::splat(grown * (1.0 + 0.1 * (t * 2.0).sin()));
        transform.rotation = Quat::from_rotation_y(t * 0.5);
    }
}

fn orbit_camera(
    time: Res<Time>,
    settings: Res<TreeSettings>,
    mut query: Query<(&mut OrbitCamera, &mut Transform)>,
) {
    if settings.orbit_speed == 0.0 {
        return;
    }
    for (mut orbit, mut transform) in &mut query {
        orbit.angle = (orbit.angle + settings.orbit_speed * time.delta_secs()) % std::f32::consts::TAU;
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy_tree_geometry::{Ornament, Particle};

    fn tree_app(settings: TreeSettings) -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<Assets<Mesh>>()
            .init_resource::<Assets<StandardMaterial>>()
            .init_resource::<BlendDriver>()
            .insert_resource(settings)
            .add_systems(Startup, spawn_tree)
            .add_systems(Update, (animate_particles, animate_ornaments, animate_topper));
        app
    }

    #[test]
    fn spawns_configured_counts() {
        let mut app = tree_app(TreeSettings {
            particle_count: 150,
            ornament_count: 12,
            seed: Some(1),
            ..default()
        });
        app.update();

        let world = app.world_mut();
        assert_eq!(world.query::<&Particle>().iter(world).count(), 150);
        assert_eq!(world.query::<&Ornament>().iter(world).count(), 12);
        assert_eq!(world.query::<&TreeTopper>().iter(world).count(), 1);
        assert_eq!(world.query::<&TreeRoot>().iter(world).count(), 1);
        assert!(world.contains_resource::<NeedleMaterials>());
        assert!(world.contains_resource::<OrnamentAssets>());
    }

    #[test]
    fn formed_tree_sits_on_the_cone() {
        let settings = TreeSettings {
            particle_count: 200,
            ornament_count: 20,
            ..default()
        };
        let shape = settings.shape.clone();
        let mut app = tree_app(settings);
        app.update();

        // Jump straight to Formed
        {
            let mut blend = app.world_mut().resource_mut::<BlendDriver>();
            blend.set_formed(true);
            blend.tick(100.0);
        }
        app.update();

        let world = app.world_mut();
        for (particle, transform) in world.query::<(&Particle, &Transform)>().iter(world) {
            assert_eq!(transform.translation, particle.formed);
            assert!(shape.formed_bounds_contain(transform.translation));
        }
        for (ornament, transform) in world.query::<(&Ornament, &Transform)>().iter(world) {
            let drift = transform.translation - ornament.formed;
            assert_eq!(drift.x, 0.0);
            assert_eq!(drift.z, 0.0);
            assert!(drift.y.abs() <= sizes::ORNAMENT_BOB + 1e-5);
        }
    }

    #[test]
    fn scattered_tree_hides_the_topper() {
        let mut app = tree_app(TreeSettings {
            particle_count: 10,
            ornament_count: 2,
            ..default()
        });
        app.update();
        app.update();

        let world = app.world_mut();
        let transform = world
            .query_filtered::<&Transform, With<TreeTopper>>()
            .single(world)
            .unwrap();
        assert_eq!(transform.scale, Vec3::ZERO);
    }

    #[test]
    fn orbit_camera_looks_at_the_trunk() {
        let orbit = OrbitCamera {
            angle: 1.0,
            ..default()
        };
        let transform = orbit.transform();
        let horizontal = Vec2::new(transform.translation.x, transform.translation.z).length();
        assert!((horizontal - sizes::CAMERA_DISTANCE).abs() < 1e-4);
        assert!(transform.forward().dot(-transform.translation.normalize()) > 0.999);
    }
}
