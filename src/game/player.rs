//! The player ship - slides into view when play starts and follows drags.

use bevy::prelude::*;

use super::{
    GameSystems, PlayField,
    contact::{Category, Hitbox},
    enemy::SHIP_Z,
    input::PointerDragged,
    motion::{Tween, TweenFinished},
    phase::Phase,
    spawner::StartLevel,
};
use crate::{config::Tuning, screens::Screen};

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Player>();

    app.add_systems(
        Update,
        drag_player
            .in_set(GameSystems::Input)
            .run_if(in_state(Phase::InGame)),
    );

    app.add_systems(
        Update,
        finish_entrance
            .in_set(GameSystems::Arrivals)
            .run_if(in_state(Phase::InGame)),
    );
}

const PLAYER_COLOR: Color = Color::srgb(0.35, 0.75, 1.0);

/// Height the player flies at, as a fraction of the screen height.
const PLAYER_ALTITUDE: f32 = 0.2;

/// Marker component for the player ship.
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct Player;

/// Spawn the player just below the bottom edge, waiting for the first tap.
pub fn spawn_player(commands: &mut Commands, field: &PlayField, tuning: &Tuning) -> Entity {
    let start = Vec2::new(field.width() / 2.0, -tuning.player_size.y);

    commands
        .spawn((
            Name::new("Player"),
            Player,
            Category::Player,
            Hitbox(tuning.player_size),
            Sprite::from_color(PLAYER_COLOR, tuning.player_size),
            Transform::from_translation(start.extend(SHIP_Z)),
            DespawnOnExit(Screen::Gameplay),
        ))
        .id()
}

/// The slide from below the screen up to flying altitude.
pub fn entrance_tween(from: Vec2, field: &PlayField, tuning: &Tuning) -> Tween {
    let to = Vec2::new(from.x, field.height() * PLAYER_ALTITUDE);
    Tween::new(from, to, tuning.player_entrance_secs)
}

/// Keep a ship of the given half width fully inside `area` horizontally.
pub fn clamp_to_area(x: f32, half_width: f32, area: Rect) -> f32 {
    x.min(area.max.x - half_width).max(area.min.x + half_width)
}

/// Move the player sideways by the drag distance.
fn drag_player(
    mut drag_events: MessageReader<PointerDragged>,
    mut player: Query<&mut Transform, (With<Player>, Without<Tween>)>,
    field: Res<PlayField>,
    tuning: Res<Tuning>,
) {
    let dx: f32 = drag_events.read().map(|drag| drag.delta.x).sum();
    let Ok(mut transform) = player.single_mut() else {
        return;
    };

    let half_width = tuning.player_size.x / 2.0;
    transform.translation.x = clamp_to_area(transform.translation.x + dx, half_width, field.area);
}

/// The first level starts once the player has arrived.
fn finish_entrance(
    mut finished_events: MessageReader<TweenFinished>,
    player: Query<(), With<Player>>,
    mut level_events: MessageWriter<StartLevel>,
) {
    for TweenFinished(entity) in finished_events.read() {
        if player.contains(*entity) {
            info!("Player in position");
            level_events.write(StartLevel);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_keeps_ship_inside() {
        let area = PlayField::default().area;
        let half = 24.0;
        assert_eq!(clamp_to_area(360.0, half, area), 360.0);
        assert_eq!(clamp_to_area(0.0, half, area), area.min.x + half);
        assert_eq!(clamp_to_area(5000.0, half, area), area.max.x - half);
        assert_eq!(clamp_to_area(area.min.x + half, half, area), area.min.x + half);
    }

    #[test]
    fn test_clamp_after_any_drag() {
        let area = PlayField::default().area;
        let half = 24.0;
        let mut x = 360.0;
        for dx in [-90.0, -400.0, 35.0, 1200.0, -7.5, 0.0, -3000.0] {
            x = clamp_to_area(x + dx, half, area);
            assert!(x >= area.min.x + half && x <= area.max.x - half);
        }
    }

    #[test]
    fn test_entrance_ends_at_flying_altitude() {
        let field = PlayField::default();
        let tuning = Tuning::default();
        let mut tween = entrance_tween(Vec2::new(360.0, -64.0), &field, &tuning);
        let end = tween.advance(std::time::Duration::from_secs(1));
        assert_eq!(end, Vec2::new(360.0, field.height() * 0.2));
    }
}
