//! The phase machine for one scene: waiting for a tap, playing, and over.
//!
//! PreGame -> InGame on the first tap. InGame -> AfterGame when the last
//! life is lost or the player is rammed. AfterGame is final; a new scene
//! starts over in PreGame.

use bevy::prelude::*;

use super::{
    GameSystems, PlayField,
    bullet::{Bullet, FireBullet},
    effects::Fade,
    enemy::Enemy,
    hud::TapToBeginLabel,
    input::PointerPressed,
    motion::Tween,
    player::{Player, entrance_tween},
    spawner::EnemySpawner,
};
use crate::{AppSystems, config::Tuning, screens::Screen};

pub(super) fn plugin(app: &mut App) {
    app.add_sub_state::<Phase>();
    app.add_message::<GameOverRequested>();

    app.add_systems(
        Update,
        handle_taps
            .in_set(GameSystems::Input)
            .run_if(in_state(Screen::Gameplay)),
    );

    app.add_systems(
        Update,
        tick_game_over_countdown
            .in_set(AppSystems::TickTimers)
            .run_if(in_state(Phase::AfterGame)),
    );

    app.add_systems(OnExit(Screen::Gameplay), remove_countdown);
}

#[derive(SubStates, Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[source(Screen = Screen::Gameplay)]
pub enum Phase {
    #[default]
    PreGame,
    InGame,
    AfterGame,
}

/// How long the "Tap To Begin" prompt takes to fade away.
const PROMPT_FADE_OUT_SECS: f32 = 0.5;

/// Message sent when the run should end.
#[derive(Message, Debug, Clone, Copy)]
pub struct GameOverRequested;

/// Delay before the game over screen is shown.
#[derive(Resource, Debug)]
pub struct GameOverCountdown(pub Timer);

/// Every tap fires. The first one also starts the game; its bullets are
/// picked up once the phase has switched to InGame on the next frame.
fn handle_taps(
    mut commands: Commands,
    mut press_events: MessageReader<PointerPressed>,
    phase: Res<State<Phase>>,
    mut next_phase: ResMut<NextState<Phase>>,
    mut fire_events: MessageWriter<FireBullet>,
    player: Query<(Entity, &Transform), With<Player>>,
    prompt: Query<(Entity, &TextColor), With<TapToBeginLabel>>,
    field: Res<PlayField>,
    tuning: Res<Tuning>,
) {
    let taps: Vec<Vec2> = press_events.read().map(|press| press.position).collect();
    let Some(first) = taps.first() else {
        return;
    };

    match phase.get() {
        Phase::PreGame => {
            next_phase.set(Phase::InGame);
            info!("Game started by tap at {:?}", first);

            for (label, color) in &prompt {
                commands
                    .entity(label)
                    .insert(Fade::out(color.0.alpha(), PROMPT_FADE_OUT_SECS).then_despawn());
            }

            // The first level begins once the player has flown in.
            if let Ok((entity, transform)) = player.single() {
                let tween = entrance_tween(transform.translation.truncate(), &field, &tuning);
                commands.entity(entity).insert(tween);
            }
        }
        Phase::InGame => {}
        Phase::AfterGame => return,
    }

    for _ in &taps {
        fire_events.write(FireBullet);
    }
}

/// End the run: freeze every bullet and enemy, stop spawning, and schedule
/// the game over screen. Only the first request of a run does anything.
pub(super) fn run_game_over(
    mut commands: Commands,
    mut game_over_events: MessageReader<GameOverRequested>,
    mut next_phase: ResMut<NextState<Phase>>,
    mut spawner: ResMut<EnemySpawner>,
    countdown: Option<Res<GameOverCountdown>>,
    movers: Query<Entity, (With<Tween>, Or<(With<Bullet>, With<Enemy>)>)>,
    tuning: Res<Tuning>,
) {
    if game_over_events.read().count() == 0 || countdown.is_some() {
        return;
    }

    next_phase.set(Phase::AfterGame);
    spawner.cancel();
    for entity in &movers {
        commands.entity(entity).remove::<Tween>();
    }
    commands.insert_resource(GameOverCountdown(Timer::from_seconds(
        tuning.game_over_delay_secs,
        TimerMode::Once,
    )));

    info!("GAME OVER! Showing results in {}s", tuning.game_over_delay_secs);
}

fn tick_game_over_countdown(
    mut commands: Commands,
    time: Res<Time>,
    countdown: Option<ResMut<GameOverCountdown>>,
    mut next_screen: ResMut<NextState<Screen>>,
) {
    let Some(mut countdown) = countdown else {
        return;
    };

    if countdown.0.tick(time.delta()).just_finished() {
        commands.remove_resource::<GameOverCountdown>();
        next_screen.set(Screen::GameOver);
    }
}

fn remove_countdown(mut commands: Commands) {
    commands.remove_resource::<GameOverCountdown>();
}
