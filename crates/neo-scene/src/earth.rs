//! Earth group: tilted axis, sun light, continuous rotation.

use bevy::prelude::*;

pub const EARTH_RADIUS: f32 = 1.0;
pub const AXIAL_TILT_DEG: f32 = -23.4;
/// 0.002 rad per frame at 60 fps, expressed time-based.
const ROTATION_RATE: f32 = 0.12;

const SUN_DIRECTION: Vec3 = Vec3::new(-2.0, 0.5, 1.5);

pub struct EarthPlugin;

impl Plugin for EarthPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_earth)
            .add_systems(Update, rotate_earth);
    }
}

#[derive(Component)]
pub struct EarthGlobe;

fn spawn_earth(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let globe_mesh = meshes.add(
        Sphere::new(EARTH_RADIUS)
            .mesh()
            .ico(5)
            .unwrap_or_else(|_| Sphere::new(EARTH_RADIUS).mesh().uv(64, 32)),
    );
    let globe_material = materials.add(StandardMaterial {
        base_color: Color::srgb(0.1, 0.3, 0.65),
        perceptual_roughness: 0.9,
        metallic: 0.0,
        ..default()
    });

    let tilt = Quat::from_rotation_z(AXIAL_TILT_DEG.to_radians());
    commands
        .spawn((
            Name::new("Earth Group"),
            Transform::from_rotation(tilt),
            GlobalTransform::default(),
            Visibility::default(),
            InheritedVisibility::VISIBLE,
            ViewVisibility::default(),
        ))
        .with_children(|group| {
            group.spawn((
                Name::new("Earth Globe"),
                EarthGlobe,
                Mesh3d(globe_mesh),
                MeshMaterial3d(globe_material),
                Transform::default(),
            ));
        });

    commands.spawn((
        Name::new("Sun Light"),
        DirectionalLight {
            illuminance: 12_000.0,
            ..default()
        },
        Transform::from_translation(SUN_DIRECTION).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Spin the globe around its (tilted) local Y axis, independent of
/// asteroid data.
fn rotate_earth(time: Res<Time>, mut query: Query<&mut Transform, With<EarthGlobe>>) {
    for mut transform in &mut query {
        transform.rotate_y(ROTATION_RATE * time.delta_secs());
    }
}
