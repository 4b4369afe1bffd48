//! Timed enemy spawning.
//!
//! Each level has a fixed spawn interval. Starting a level replaces any
//! pending spawn timer, so a milestone kill changes the pace at once.

use std::time::Duration;

use bevy::prelude::*;
use rand::Rng;

use super::{GameSystems, PlayField, Session, enemy::spawn_enemy, phase::Phase};
use crate::{config::Tuning, screens::Screen};

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<EnemySpawner>();
    app.add_message::<StartLevel>();

    app.add_systems(OnEnter(Screen::Gameplay), reset_spawner);

    app.add_systems(
        Update,
        tick_spawner
            .in_set(GameSystems::Spawn)
            .run_if(in_state(Phase::InGame)),
    );
}

/// Interval reused for every level past the end of the table.
pub const FLOOR_SPAWN_INTERVAL: f32 = 0.5;

/// Seconds between spawns for a level, if the level is in the table.
pub fn spawn_interval(level: u32) -> Option<f32> {
    match level {
        1 => Some(1.2),
        2 => Some(1.0),
        3 => Some(0.8),
        4 => Some(0.5),
        _ => None,
    }
}

/// Seconds between spawns for any level, falling back to the floor.
pub fn interval_for_level(level: u32) -> f32 {
    spawn_interval(level).unwrap_or_else(|| {
        warn!(
            "No spawn interval for level {}, reusing {}s",
            level, FLOOR_SPAWN_INTERVAL
        );
        FLOOR_SPAWN_INTERVAL
    })
}

/// Message asking for the next level to start.
#[derive(Message, Debug, Clone, Copy)]
pub struct StartLevel;

/// Resource holding the repeating spawn timer, if spawning is active.
#[derive(Resource, Debug, Default)]
pub struct EnemySpawner {
    timer: Option<Timer>,
}

impl EnemySpawner {
    /// Replace any pending timer with a fresh one.
    pub fn restart(&mut self, interval_secs: f32) {
        self.timer = Some(Timer::from_seconds(interval_secs, TimerMode::Repeating));
    }

    /// Stop spawning.
    pub fn cancel(&mut self) {
        self.timer = None;
    }

    /// The active interval in seconds.
    pub fn interval(&self) -> Option<f32> {
        self.timer.as_ref().map(|timer| timer.duration().as_secs_f32())
    }

    /// Advance the timer. Returns how many spawns are due.
    pub fn tick(&mut self, delta: Duration) -> u32 {
        match self.timer.as_mut() {
            Some(timer) => {
                timer.tick(delta);
                timer.times_finished_this_tick()
            }
            None => 0,
        }
    }
}

/// Advance the session to the next level and restart spawning at its pace.
/// Returns the new interval.
pub fn begin_next_level(session: &mut Session, spawner: &mut EnemySpawner) -> f32 {
    session.level += 1;
    let interval = interval_for_level(session.level);
    spawner.restart(interval);
    interval
}

/// Where an enemy enters and leaves the screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyPath {
    pub start: Vec2,
    pub end: Vec2,
}

impl EnemyPath {
    /// Pick independent entry and exit columns inside the playable area.
    /// Enemies enter above the top edge and leave below the bottom edge.
    pub fn random(rng: &mut impl Rng, field: &PlayField) -> Self {
        let columns = field.area.min.x..field.area.max.x;
        let start_x = rng.random_range(columns.clone());
        let end_x = rng.random_range(columns);
        Self {
            start: Vec2::new(start_x, field.height() * 1.2),
            end: Vec2::new(end_x, -field.height() * 0.2),
        }
    }

    /// Angle of travel in radians, measured from the +x axis.
    pub fn heading(&self) -> f32 {
        let delta = self.end - self.start;
        delta.y.atan2(delta.x)
    }
}

fn reset_spawner(mut spawner: ResMut<EnemySpawner>) {
    spawner.cancel();
}

/// Start the next level for every request this frame.
pub(super) fn start_new_level(
    mut start_events: MessageReader<StartLevel>,
    mut session: ResMut<Session>,
    mut spawner: ResMut<EnemySpawner>,
) {
    for _ in start_events.read() {
        let interval = begin_next_level(&mut session, &mut spawner);
        info!(
            "Level {} started, spawning every {}s",
            session.level, interval
        );
    }
}

/// Spawn enemies whenever the timer comes due.
fn tick_spawner(
    mut commands: Commands,
    time: Res<Time>,
    mut spawner: ResMut<EnemySpawner>,
    field: Res<PlayField>,
    tuning: Res<Tuning>,
    phase: Res<State<Phase>>,
) {
    let due = spawner.tick(time.delta());
    if due == 0 {
        return;
    }

    // Enemies created outside of play stay where they were spawned.
    let moving = *phase.get() == Phase::InGame;
    let mut rng = rand::rng();
    for _ in 0..due {
        let path = EnemyPath::random(&mut rng, &field);
        spawn_enemy(&mut commands, path, &tuning, moving);
    }
}
