//! Asteroid field rebuilt from each successful feed result.
//!
//! The fetch runs on the feed worker thread; an Update system drains
//! the result channel and swaps the asteroid meshes in place. On a
//! failed fetch the previous field stays visible.

use bevy::log::prelude::*;
use bevy::prelude::*;

use neo_core::{build_scene, validate_batch, SpatialMapper};
use neo_feed::{spawn_feed_worker, FeedWorker, FetchRequest};

use crate::SceneConfig;

pub struct AsteroidFieldPlugin;

impl Plugin for AsteroidFieldPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_feed)
            .add_systems(Update, poll_feed);
    }
}

#[derive(Resource)]
struct FeedChannel {
    worker: FeedWorker,
}

#[derive(Component)]
struct AsteroidGroup;

#[derive(Component)]
struct Asteroid;

fn setup_feed(mut commands: Commands, config: Res<SceneConfig>) {
    commands.spawn((
        Name::new("Asteroid Group"),
        AsteroidGroup,
        Transform::default(),
        GlobalTransform::default(),
        Visibility::default(),
        InheritedVisibility::VISIBLE,
        ViewVisibility::default(),
    ));

    match spawn_feed_worker(config.feed.clone()) {
        Ok(worker) => {
            let request = FetchRequest {
                generation: 1,
                range: config.range.clone(),
            };
            if worker.requests.send(request).is_err() {
                warn!("feed worker rejected the initial request");
            }
            commands.insert_resource(FeedChannel { worker });
        }
        Err(err) => warn!("failed to start feed worker: {err:?}"),
    }
}

fn poll_feed(
    mut commands: Commands,
    channel: Option<Res<FeedChannel>>,
    group: Query<Entity, With<AsteroidGroup>>,
    existing: Query<Entity, With<Asteroid>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let Some(channel) = channel else {
        return;
    };
    let Ok(group_entity) = group.single() else {
        return;
    };

    while let Ok(result) = channel.worker.results.try_recv() {
        match result.outcome {
            Ok(raw) => {
                let records = validate_batch(raw);
                let mut mapper = SpatialMapper::from_entropy();
                let model = build_scene(&records, &mut mapper);

                for entity in &existing {
                    commands.entity(entity).despawn();
                }

                info!(
                    count = model.entries.len(),
                    start = %result.range.start,
                    end = %result.range.end,
                    "rebuilding asteroid field"
                );

                for entry in &model.entries {
                    let mesh = meshes.add(Sphere::new(entry.radius as f32).mesh().uv(6, 6));
                    let material = materials.add(StandardMaterial {
                        base_color: Color::srgb_u8(entry.color.r, entry.color.g, entry.color.b),
                        perceptual_roughness: 1.0,
                        ..default()
                    });
                    commands.spawn((
                        Name::new(entry.name.clone()),
                        Asteroid,
                        Mesh3d(mesh),
                        MeshMaterial3d(material),
                        Transform::from_xyz(
                            entry.position.x as f32,
                            entry.position.y as f32,
                            entry.position.z as f32,
                        ),
                        ChildOf(group_entity),
                    ));
                }
            }
            Err(err) => {
                warn!("feed fetch failed, keeping previous asteroid field: {err}");
            }
        }
    }
}
