//! Bullets - fired straight up from the player, removed at the top edge.

use bevy::prelude::*;

use super::{
    GameSystems, PlayField,
    contact::{Category, Hitbox},
    motion::{Tween, TweenFinished},
    phase::Phase,
    player::Player,
};
use crate::{config::Tuning, screens::Screen};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Bullet>();
    app.add_message::<FireBullet>();

    app.add_systems(
        Update,
        fire_bullets
            .in_set(GameSystems::Spawn)
            .run_if(in_state(Phase::InGame)),
    );

    app.add_systems(
        Update,
        despawn_spent_bullets
            .in_set(GameSystems::Arrivals)
            .run_if(in_state(Screen::Gameplay)),
    );
}

const BULLET_COLOR: Color = Color::srgb(1.0, 0.9, 0.4);
const BULLET_Z: f32 = 1.0;

/// Marker component for bullets.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Bullet;

/// Message to fire one bullet from the player.
#[derive(Message, Debug, Clone, Copy)]
pub struct FireBullet;

/// Where a bullet fired from `from` leaves the screen.
pub fn bullet_target(from: Vec2, field: &PlayField, tuning: &Tuning) -> Vec2 {
    Vec2::new(from.x, field.height() + tuning.bullet_size.y)
}

/// Bullets move at a fixed speed: `bullet_travel_secs` per screen height.
pub fn flight_secs(from: Vec2, to: Vec2, field: &PlayField, tuning: &Tuning) -> f32 {
    tuning.bullet_travel_secs * from.distance(to) / field.height()
}

fn fire_bullets(
    mut commands: Commands,
    mut fire_events: MessageReader<FireBullet>,
    player: Query<&Transform, With<Player>>,
    field: Res<PlayField>,
    tuning: Res<Tuning>,
) {
    for _ in fire_events.read() {
        let Ok(transform) = player.single() else {
            debug!("No player to fire from");
            continue;
        };

        let from = transform.translation.truncate();
        let to = bullet_target(from, &field, &tuning);
        let secs = flight_secs(from, to, &field, &tuning);

        commands.spawn((
            Name::new("Bullet"),
            Bullet,
            Category::Bullet,
            Hitbox(tuning.bullet_size),
            Sprite::from_color(BULLET_COLOR, tuning.bullet_size),
            Transform::from_translation(from.extend(BULLET_Z)),
            Tween::new(from, to, secs),
            DespawnOnExit(Screen::Gameplay),
        ));

        debug!("Fired bullet from {:?}, {:.2}s to the top", from, secs);
    }
}

fn despawn_spent_bullets(
    mut commands: Commands,
    mut finished_events: MessageReader<TweenFinished>,
    bullets: Query<(), With<Bullet>>,
) {
    for TweenFinished(entity) in finished_events.read() {
        if bullets.contains(*entity) {
            commands.entity(*entity).despawn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bullet_leaves_through_top() {
        let field = PlayField::default();
        let tuning = Tuning::default();
        let target = bullet_target(Vec2::new(200.0, 192.0), &field, &tuning);
        assert_eq!(target.x, 200.0);
        assert!(target.y - tuning.bullet_size.y / 2.0 > field.height());
    }

    #[test]
    fn test_flight_time_scales_with_distance() {
        let field = PlayField::default();
        let tuning = Tuning::default();
        let full = flight_secs(Vec2::ZERO, Vec2::new(0.0, field.height()), &field, &tuning);
        let half = flight_secs(
            Vec2::new(0.0, field.height() / 2.0),
            Vec2::new(0.0, field.height()),
            &field,
            &tuning,
        );
        assert!((full - tuning.bullet_travel_secs).abs() < 1e-5);
        assert!((half - full / 2.0).abs() < 1e-5);
    }
}
