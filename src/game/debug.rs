//! Debug visualization for contacts.
//!
//! Toggle with the 'D' key during gameplay.
//! Shows:
//! - The playable area
//! - Every hitbox, colored by category

use bevy::{color::palettes::css, input::common_conditions::input_just_pressed, prelude::*};

use super::{
    PlayField,
    contact::{Category, Hitbox},
};
use crate::screens::Screen;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<DebugOverlayVisible>();

    app.add_systems(
        Update,
        toggle_debug
            .run_if(in_state(Screen::Gameplay).and(input_just_pressed(KeyCode::KeyD))),
    );

    app.add_systems(
        Update,
        (draw_play_area, draw_hitboxes).run_if(in_state(Screen::Gameplay).and(debug_visible)),
    );
}

/// Resource to track if the debug overlay is visible.
#[derive(Resource, Default)]
pub struct DebugOverlayVisible(pub bool);

fn debug_visible(debug: Res<DebugOverlayVisible>) -> bool {
    debug.0
}

fn toggle_debug(mut debug: ResMut<DebugOverlayVisible>) {
    debug.0 = !debug.0;
    let state = if debug.0 { "ON" } else { "OFF" };
    info!("Debug overlay: {}", state);
}

fn draw_play_area(mut gizmos: Gizmos, field: Res<PlayField>) {
    gizmos.rect_2d(
        Isometry2d::from_translation(field.area.center()),
        field.area.size(),
        css::AQUA.with_alpha(0.8),
    );
}

fn draw_hitboxes(mut gizmos: Gizmos, bodies: Query<(&Category, &GlobalTransform, &Hitbox)>) {
    for (category, transform, hitbox) in &bodies {
        let color = match category {
            Category::Player => css::LIMEGREEN,
            Category::Bullet => css::GOLD,
            Category::Enemy => css::INDIAN_RED,
        };
        gizmos.rect_2d(
            Isometry2d::from_translation(transform.translation().truncate()),
            hitbox.0,
            color.with_alpha(0.8),
        );
    }
}
