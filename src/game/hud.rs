//! Score and lives labels, plus the "Tap To Begin" prompt.

use bevy::{prelude::*, sprite::Anchor};

use super::{
    GameSystems, PlayField, Session,
    effects::{Bounce, Fade},
    motion::Tween,
    session::LifeLost,
};
use crate::{config::Tuning, screens::Screen, theme::palette::LABEL_TEXT};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (
            update_hud.run_if(resource_changed::<Session>),
            bounce_lives_label,
        )
            .in_set(GameSystems::Presentation)
            .run_if(in_state(Screen::Gameplay)),
    );
}

const HUD_Z: f32 = 10.0;
const HUD_FONT_SIZE: f32 = 36.0;
const PROMPT_FONT_SIZE: f32 = 48.0;

/// How long the labels take to slide down into view.
const HUD_SLIDE_SECS: f32 = 0.3;
/// How long the prompt takes to appear.
const PROMPT_FADE_IN_SECS: f32 = 0.3;

#[derive(Component, Debug)]
pub struct ScoreLabel;

#[derive(Component, Debug)]
pub struct LivesLabel;

/// The prompt shown until the first tap.
#[derive(Component, Debug)]
pub struct TapToBeginLabel;

pub fn score_text(score: u32) -> String {
    format!("Score: {score}")
}

pub fn lives_text(lives: u32) -> String {
    format!("Lives: {lives}")
}

/// Spawn the labels above the top edge and slide them into place.
pub fn spawn_hud(commands: &mut Commands, field: &PlayField, tuning: &Tuning) {
    let resting_y = field.height() * 0.9;
    let hidden_y = field.height() + HUD_FONT_SIZE;

    let score_x = field.width() * 0.15;
    commands.spawn((
        Name::new("Score Label"),
        ScoreLabel,
        Text2d::new(score_text(0)),
        TextFont::from_font_size(HUD_FONT_SIZE),
        TextColor(LABEL_TEXT),
        Anchor::CENTER_LEFT,
        Transform::from_xyz(score_x, hidden_y, HUD_Z),
        Tween::new(
            Vec2::new(score_x, hidden_y),
            Vec2::new(score_x, resting_y),
            HUD_SLIDE_SECS,
        ),
        DespawnOnExit(Screen::Gameplay),
    ));

    let lives_x = field.width() * 0.85;
    commands.spawn((
        Name::new("Lives Label"),
        LivesLabel,
        Text2d::new(lives_text(tuning.starting_lives)),
        TextFont::from_font_size(HUD_FONT_SIZE),
        TextColor(LABEL_TEXT),
        Anchor::CENTER_RIGHT,
        Transform::from_xyz(lives_x, hidden_y, HUD_Z),
        Tween::new(
            Vec2::new(lives_x, hidden_y),
            Vec2::new(lives_x, resting_y),
            HUD_SLIDE_SECS,
        ),
        DespawnOnExit(Screen::Gameplay),
    ));

    commands.spawn((
        Name::new("Tap To Begin"),
        TapToBeginLabel,
        Text2d::new("Tap To Begin"),
        TextFont::from_font_size(PROMPT_FONT_SIZE),
        TextColor(LABEL_TEXT.with_alpha(0.0)),
        Transform::from_xyz(field.width() / 2.0, field.height() / 2.0, HUD_Z),
        Fade::new(0.0, 1.0, PROMPT_FADE_IN_SECS),
        DespawnOnExit(Screen::Gameplay),
    ));
}

fn update_hud(
    session: Res<Session>,
    mut score_label: Query<&mut Text2d, (With<ScoreLabel>, Without<LivesLabel>)>,
    mut lives_label: Query<&mut Text2d, (With<LivesLabel>, Without<ScoreLabel>)>,
) {
    for mut text in &mut score_label {
        text.0 = score_text(session.score);
    }
    for mut text in &mut lives_label {
        text.0 = lives_text(session.lives);
    }
}

fn bounce_lives_label(
    mut commands: Commands,
    mut life_lost_events: MessageReader<LifeLost>,
    mut lives_label: Query<(Entity, &mut Text2d), With<LivesLabel>>,
) {
    let Some(remaining) = life_lost_events.read().last().map(|lost| lost.remaining) else {
        return;
    };
    for (entity, mut text) in &mut lives_label {
        text.0 = lives_text(remaining);
        commands.entity(entity).insert(Bounce::default());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_text() {
        assert_eq!(score_text(0), "Score: 0");
        assert_eq!(score_text(25), "Score: 25");
        assert_eq!(lives_text(3), "Lives: 3");
    }

    #[test]
    fn test_life_lost_updates_and_bounces_lives_label() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_message::<LifeLost>();
        app.add_systems(Update, bounce_lives_label);

        let label = app
            .world_mut()
            .spawn((LivesLabel, Text2d::new(lives_text(3))))
            .id();
        app.update();
        assert!(app.world().get::<Bounce>(label).is_none());

        app.world_mut().write_message(LifeLost { remaining: 2 });
        app.update();

        assert_eq!(app.world().get::<Text2d>(label).map(|t| t.0.as_str()), Some("Lives: 2"));
        assert!(app.world().get::<Bounce>(label).is_some());
    }
}
