//! Camera orbiting the Earth at the origin.
//!
//! The focus never moves: everything of interest sits relative to the
//! globe, so the camera is a pure spherical coordinate around it. The
//! zoom range is derived from the same log-distance mapping that
//! places the asteroids, so the far end always shows the whole field.

use bevy::input::mouse::{MouseMotion, MouseWheel};
use bevy::prelude::*;
use std::f32::consts::FRAC_PI_2;

use neo_core::radial_distance;

use crate::earth::EARTH_RADIUS;

const DRAG_RADIANS_PER_PIXEL: f32 = 0.01;
const ZOOM_STEP: f32 = 1.5;
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.05;
/// Miss distances beyond ~100M km all collapse to roughly this radius
/// under the log mapping, so it bounds the renderable field.
const FIELD_EXTENT_KM: f64 = 1.0e8;

pub struct OrbitCameraPlugin;

impl Plugin for OrbitCameraPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_camera)
            .add_systems(Update, drive_camera);
    }
}

/// Spherical coordinate of the camera around the Earth.
#[derive(Component)]
pub struct EarthOrbit {
    yaw: f32,
    pitch: f32,
    radius: f32,
}

impl EarthOrbit {
    /// Close enough to fill the view with the globe without clipping
    /// into it.
    fn min_radius() -> f32 {
        EARTH_RADIUS * 2.0
    }

    /// Far enough back that the whole log-scaled field is in frame.
    fn max_radius() -> f32 {
        radial_distance(FIELD_EXTENT_KM) as f32 * 1.5
    }

    fn transform(&self) -> Transform {
        let rotation = Quat::from_euler(EulerRot::YXZ, self.yaw, -self.pitch, 0.0);
        Transform::from_translation(rotation * (Vec3::Z * self.radius))
            .looking_at(Vec3::ZERO, Vec3::Y)
    }
}

impl Default for EarthOrbit {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.2,
            radius: Self::max_radius(),
        }
    }
}

fn spawn_camera(mut commands: Commands) {
    let orbit = EarthOrbit::default();
    commands.spawn((
        Name::new("Scene Camera"),
        Camera3d::default(),
        orbit.transform(),
        orbit,
    ));
}

/// Left-drag orbits, scroll zooms. The transform is rebuilt from the
/// spherical coordinate whenever either input moved it.
fn drive_camera(
    mut motion: MessageReader<MouseMotion>,
    mut wheel: MessageReader<MouseWheel>,
    buttons: Res<ButtonInput<MouseButton>>,
    mut cameras: Query<(&mut Transform, &mut EarthOrbit)>,
) {
    let drag: Vec2 = motion.read().map(|ev| ev.delta).sum();
    let scroll: f32 = wheel.read().map(|ev| ev.y).sum();
    let dragging = buttons.pressed(MouseButton::Left) && drag != Vec2::ZERO;

    if !dragging && scroll == 0.0 {
        return;
    }

    for (mut transform, mut orbit) in &mut cameras {
        if dragging {
            orbit.yaw -= drag.x * DRAG_RADIANS_PER_PIXEL;
            orbit.pitch =
                (orbit.pitch + drag.y * DRAG_RADIANS_PER_PIXEL).clamp(-PITCH_LIMIT, PITCH_LIMIT);
        }
        if scroll != 0.0 {
            orbit.radius = (orbit.radius - scroll * ZOOM_STEP)
                .clamp(EarthOrbit::min_radius(), EarthOrbit::max_radius());
        }
        *transform = orbit.transform();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zoom_range_brackets_the_globe_and_the_field() {
        assert!(EarthOrbit::min_radius() > EARTH_RADIUS);
        assert!(f64::from(EarthOrbit::max_radius()) > radial_distance(FIELD_EXTENT_KM));
    }

    #[test]
    fn transform_keeps_the_camera_at_the_orbit_radius() {
        let orbit = EarthOrbit {
            yaw: 1.3,
            pitch: 0.4,
            radius: 25.0,
        };
        let transform = orbit.transform();
        assert!((transform.translation.length() - 25.0).abs() < 1e-4);
    }

    #[test]
    fn positive_pitch_lifts_the_camera_above_the_equator() {
        let orbit = EarthOrbit {
            yaw: 0.0,
            pitch: 0.5,
            radius: 10.0,
        };
        assert!(orbit.transform().translation.y > 0.0);
    }
}
