//! Endless starfield - two screen-sized tiles that leapfrog as they scroll.

use bevy::{prelude::*, sprite::Anchor};
use rand::Rng;

use super::{GameSystems, PlayField, phase::Phase};
use crate::{config::Tuning, screens::Screen, theme::palette::SPACE_BACKGROUND};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        scroll_background
            .in_set(GameSystems::Scroll)
            .run_if(in_state(Screen::Gameplay)),
    );
}

const BACKGROUND_Z: f32 = -10.0;
const STARS_PER_TILE: usize = 60;
const STAR_COLOR: Color = Color::srgba(1.0, 1.0, 1.0, 0.7);

#[derive(Component, Debug)]
pub struct BackgroundTile;

/// Move a tile down by `step` and wrap it back above the other tile once it
/// is fully below the bottom edge.
pub fn scroll_tile(y: f32, step: f32, height: f32) -> f32 {
    let y = y - step;
    if y < -height { y + 2.0 * height } else { y }
}

pub fn spawn_background(commands: &mut Commands, field: &PlayField) {
    let mut rng = rand::rng();

    for index in 0..2 {
        let y = field.height() * index as f32;
        commands
            .spawn((
                Name::new("Background Tile"),
                BackgroundTile,
                Sprite::from_color(SPACE_BACKGROUND, field.size),
                Anchor::BOTTOM_CENTER,
                Transform::from_xyz(field.width() / 2.0, y, BACKGROUND_Z),
                DespawnOnExit(Screen::Gameplay),
            ))
            .with_children(|tile| {
                for _ in 0..STARS_PER_TILE {
                    let x = rng.random_range(-field.width() / 2.0..field.width() / 2.0);
                    let y = rng.random_range(0.0..field.height());
                    let size = rng.random_range(1.0..3.0);
                    tile.spawn((
                        Sprite::from_color(STAR_COLOR, Vec2::splat(size)),
                        Transform::from_xyz(x, y, 0.1),
                    ));
                }
            });
    }
}

/// Scrolling only advances during play; wrapping always runs.
fn scroll_background(
    time: Res<Time>,
    phase: Option<Res<State<Phase>>>,
    field: Res<PlayField>,
    tuning: Res<Tuning>,
    mut tiles: Query<&mut Transform, With<BackgroundTile>>,
) {
    let playing = phase.is_some_and(|phase| *phase.get() == Phase::InGame);
    let step = if playing {
        tuning.scroll_speed * time.delta_secs()
    } else {
        0.0
    };

    for mut transform in &mut tiles {
        transform.translation.y = scroll_tile(transform.translation.y, step, field.height());
    }
}
