//! Development tools for the game. This plugin is only enabled in dev builds.

use bevy::{dev_tools::states::log_transitions, prelude::*};

use crate::{game::Phase, menus::Menu, screens::Screen};

pub(super) fn plugin(app: &mut App) {
    // Log `Screen`, `Menu` and `Phase` transitions.
    app.add_systems(
        Update,
        (
            log_transitions::<Screen>,
            log_transitions::<Menu>,
            log_transitions::<Phase>,
        ),
    );
}
