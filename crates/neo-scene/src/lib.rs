//! Bevy scene placing fetched asteroids around a rotating Earth.
//!
//! The scene view is decoupled from the dashboard: it receives the
//! date range that the dashboard (or the CLI) selected and runs its
//! own fetch against the same endpoint, so both views show the same
//! data for the same range.

use bevy::prelude::*;
use bevy::window::{PresentMode, Window, WindowPlugin, WindowResolution};

use neo_feed::{DateRange, FeedConfig};

mod asteroids;
mod earth;
mod orbit_camera;

pub use orbit_camera::OrbitCameraPlugin;

/// What to show: the date range arrives verbatim from the caller and
/// is reused verbatim in the scene's own feed request.
#[derive(Resource, Clone, Debug)]
pub struct SceneConfig {
    pub range: DateRange,
    pub feed: FeedConfig,
}

pub struct SceneAppPlugin;

impl Plugin for SceneAppPlugin {
    fn build(&self, app: &mut App) {
        let title = {
            let config = app.world().resource::<SceneConfig>();
            format!("NEO Risk Scene — {} → {}", config.range.start, config.range.end)
        };

        app.insert_resource(ClearColor(Color::srgb(0.0, 0.0, 0.02)))
            .insert_resource(AmbientLight {
                color: Color::srgb(0.6, 0.6, 0.7),
                brightness: 120.0,
                affects_lightmapped_meshes: true,
            })
            .add_plugins(DefaultPlugins.set(WindowPlugin {
                primary_window: Some(Window {
                    title,
                    resolution: WindowResolution::new(1280, 800),
                    present_mode: PresentMode::AutoVsync,
                    ..default()
                }),
                ..default()
            }))
            .add_plugins(earth::EarthPlugin)
            .add_plugins(asteroids::AsteroidFieldPlugin)
            .add_plugins(OrbitCameraPlugin);
    }
}

/// Launches the standalone scene app for the given date range.
pub fn run(config: SceneConfig) {
    App::new()
        .insert_resource(config)
        .add_plugins(SceneAppPlugin)
        .run();
}
