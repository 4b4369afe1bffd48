//! The game over menu.

use bevy::prelude::*;

use crate::{
    game::Session,
    menus::Menu,
    screens::Screen,
    theme::{palette::*, widget},
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Menu::GameOver), spawn_gameover_menu);
}

fn spawn_gameover_menu(mut commands: Commands, session: Res<Session>) {
    commands.spawn((
        widget::ui_root("Game Over Menu"),
        BackgroundColor(SPACE_BACKGROUND),
        GlobalZIndex(2),
        DespawnOnExit(Menu::GameOver),
        children![
            widget::header("Game Over"),
            (
                widget::label(format!("Score: {}", session.score), 40.0, LABEL_TEXT),
                Node {
                    margin: UiRect::bottom(Val::Px(60.0)),
                    ..default()
                },
            ),
            widget::button("Restart", restart),
            widget::button("Main Menu", quit_to_title),
        ],
    ));
}

fn restart(_: On<Pointer<Click>>, mut next_screen: ResMut<NextState<Screen>>) {
    next_screen.set(Screen::Gameplay);
}

fn quit_to_title(_: On<Pointer<Click>>, mut next_screen: ResMut<NextState<Screen>>) {
    next_screen.set(Screen::Title);
}
