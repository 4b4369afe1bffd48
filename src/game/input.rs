//! Pointer input - mouse and touch turned into taps and drags in scene space.

use bevy::{prelude::*, window::PrimaryWindow};

use crate::{AppSystems, screens::Screen};

pub(super) fn plugin(app: &mut App) {
    app.add_message::<PointerPressed>();
    app.add_message::<PointerDragged>();
    app.init_resource::<HeldPointer>();

    app.add_systems(OnEnter(Screen::Gameplay), release_pointer);

    app.add_systems(
        Update,
        record_pointer
            .in_set(AppSystems::RecordInput)
            .run_if(in_state(Screen::Gameplay)),
    );
}

/// Message sent when a mouse button or finger goes down.
#[derive(Message, Debug, Clone, Copy)]
pub struct PointerPressed {
    pub position: Vec2,
}

/// Message sent when a held pointer moves.
#[derive(Message, Debug, Clone, Copy)]
pub struct PointerDragged {
    pub delta: Vec2,
}

/// Where the pointer was held last frame, in scene space.
#[derive(Resource, Debug, Default)]
pub struct HeldPointer(pub Option<Vec2>);

/// Movement of a pointer held across two frames.
pub fn drag_delta(previous: Option<Vec2>, current: Option<Vec2>) -> Option<Vec2> {
    let delta = current? - previous?;
    (delta != Vec2::ZERO).then_some(delta)
}

/// A pointer held when the last run ended must not count as a drag now.
fn release_pointer(mut held: ResMut<HeldPointer>) {
    held.0 = None;
}

fn to_scene(camera: &Camera, camera_transform: &GlobalTransform, screen: Vec2) -> Option<Vec2> {
    camera.viewport_to_world_2d(camera_transform, screen).ok()
}

/// Read the mouse and the first touch. Touch takes priority when present.
fn record_pointer(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    mut last_held: ResMut<HeldPointer>,
    mut press_events: MessageWriter<PointerPressed>,
    mut drag_events: MessageWriter<PointerDragged>,
) {
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };

    for touch in touches.iter_just_pressed() {
        if let Some(position) = to_scene(camera, camera_transform, touch.position()) {
            press_events.write(PointerPressed { position });
        }
    }

    let cursor = window_query
        .single()
        .ok()
        .and_then(|window| window.cursor_position());

    if mouse.just_pressed(MouseButton::Left)
        && let Some(position) = cursor.and_then(|p| to_scene(camera, camera_transform, p))
    {
        press_events.write(PointerPressed { position });
    }

    let held = match touches.iter().next() {
        Some(touch) => Some(touch.position()),
        None if mouse.pressed(MouseButton::Left) => cursor,
        None => None,
    }
    .and_then(|p| to_scene(camera, camera_transform, p));

    if let Some(delta) = drag_delta(last_held.0, held) {
        drag_events.write(PointerDragged { delta });
    }
    last_held.0 = held;
}
