//! The main menu (seen on the title screen).

use bevy::prelude::*;

use crate::{
    menus::Menu,
    screens::Screen,
    theme::{palette::*, widget},
};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(OnEnter(Menu::Main), spawn_main_menu);
}

fn spawn_main_menu(mut commands: Commands) {
    commands.spawn((
        widget::ui_root("Main Menu"),
        BackgroundColor(SPACE_BACKGROUND),
        GlobalZIndex(2),
        DespawnOnExit(Menu::Main),
        #[cfg(not(target_family = "wasm"))]
        children![
            widget::label("Games by Xander", 24.0, SUBTITLE_TEXT),
            widget::label("Solo", 96.0, LABEL_TEXT),
            (
                widget::label("Mission", 96.0, LABEL_TEXT),
                Node {
                    margin: UiRect::bottom(Val::Px(80.0)),
                    ..default()
                },
            ),
            widget::button("Start Game", enter_gameplay_screen),
            widget::button("Exit", exit_app),
        ],
        #[cfg(target_family = "wasm")]
        children![
            widget::label("Games by Xander", 24.0, SUBTITLE_TEXT),
            widget::label("Solo", 96.0, LABEL_TEXT),
            (
                widget::label("Mission", 96.0, LABEL_TEXT),
                Node {
                    margin: UiRect::bottom(Val::Px(80.0)),
                    ..default()
                },
            ),
            widget::button("Start Game", enter_gameplay_screen),
        ],
    ));
}

fn enter_gameplay_screen(_: On<Pointer<Click>>, mut next_screen: ResMut<NextState<Screen>>) {
    info!("Start pressed, entering gameplay");
    next_screen.set(Screen::Gameplay);
}

#[cfg(not(target_family = "wasm"))]
fn exit_app(_: On<Pointer<Click>>, mut app_exit: MessageWriter<AppExit>) {
    app_exit.write(AppExit::Success);
}
