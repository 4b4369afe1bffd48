//! Enemy ships - fly a straight path from above the screen to below it.
//!
//! An enemy that completes its path has escaped and costs the player a life.

use bevy::prelude::*;

use super::{
    GameSystems,
    contact::{Category, Hitbox},
    motion::{Tween, TweenFinished},
    spawner::EnemyPath,
};
use crate::{config::Tuning, screens::Screen};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Enemy>();
    app.add_message::<EnemyEscaped>();

    app.add_systems(
        Update,
        escape_enemies
            .in_set(GameSystems::Arrivals)
            .run_if(in_state(Screen::Gameplay)),
    );
}

const ENEMY_COLOR: Color = Color::srgb(0.85, 0.25, 0.3);

/// Z layer shared by ships.
pub const SHIP_Z: f32 = 2.0;

/// Marker component for enemy ships.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Enemy;

/// Message sent when an enemy reaches the end of its path.
#[derive(Message, Debug, Clone, Copy)]
pub struct EnemyEscaped {
    pub entity: Entity,
}

/// Spawn an enemy at the start of `path`, facing along it.
/// It only starts flying when `moving` is set.
pub fn spawn_enemy(
    commands: &mut Commands,
    path: EnemyPath,
    tuning: &Tuning,
    moving: bool,
) -> Entity {
    let mut enemy = commands.spawn((
        Name::new("Enemy"),
        Enemy,
        Category::Enemy,
        Hitbox(tuning.enemy_size),
        Sprite::from_color(ENEMY_COLOR, tuning.enemy_size),
        Transform::from_translation(path.start.extend(SHIP_Z))
            .with_rotation(Quat::from_rotation_z(path.heading())),
        DespawnOnExit(Screen::Gameplay),
    ));

    if moving {
        enemy.insert(Tween::new(path.start, path.end, tuning.enemy_travel_secs));
    }

    debug!(
        "Spawned enemy {} from {:?} to {:?} (moving: {})",
        enemy.id(),
        path.start,
        path.end,
        moving
    );
    enemy.id()
}

/// Remove enemies that made it to the bottom and report the escape.
fn escape_enemies(
    mut commands: Commands,
    mut finished_events: MessageReader<TweenFinished>,
    enemies: Query<(), With<Enemy>>,
    mut escaped_events: MessageWriter<EnemyEscaped>,
) {
    for TweenFinished(entity) in finished_events.read() {
        if enemies.contains(*entity) {
            commands.entity(*entity).despawn();
            escaped_events.write(EnemyEscaped { entity: *entity });
        }
    }
}
