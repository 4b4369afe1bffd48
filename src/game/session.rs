//! The session - score, lives and level for one run.
//!
//! Score goes up by one per confirmed kill and forces a level-up when it
//! lands exactly on one of the milestones. Lives go down by one per escaped
//! enemy; the run ends on the escape that takes them to zero.

use bevy::prelude::*;

use super::{enemy::EnemyEscaped, phase::GameOverRequested};
use crate::{config::Tuning, screens::Screen};

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<Session>();
    app.register_type::<Session>();
    app.add_message::<LifeLost>();

    app.add_systems(OnEnter(Screen::Gameplay), reset_session);
}

/// Scores that force an immediate level-up when reached exactly.
pub const LEVEL_UP_SCORES: [u32; 3] = [10, 25, 50];

/// Lives a session starts with when no tuning says otherwise.
const DEFAULT_LIVES: u32 = 3;

/// Resource tracking the current run.
///
/// Created fresh whenever gameplay is entered and left untouched afterwards,
/// so the game over screen can read the final score.
#[derive(Resource, Debug, Clone, PartialEq, Eq, Reflect)]
#[reflect(Resource)]
pub struct Session {
    pub score: u32,
    pub lives: u32,
    /// Zero until the first level starts.
    pub level: u32,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(DEFAULT_LIVES)
    }
}

/// What happened when a life was taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifeLoss {
    /// Lives remain after the loss.
    Remaining(u32),
    /// That was the last life; the run is over.
    LastLife,
    /// Lives were already at zero, nothing changed.
    AlreadyOut,
}

impl Session {
    pub fn new(lives: u32) -> Self {
        Self {
            score: 0,
            lives,
            level: 0,
        }
    }

    /// Count one kill. Returns true when the new score forces a level-up.
    pub fn record_kill(&mut self) -> bool {
        self.score += 1;
        LEVEL_UP_SCORES.contains(&self.score)
    }

    /// Take one life.
    pub fn lose_life(&mut self) -> LifeLoss {
        match self.lives {
            0 => LifeLoss::AlreadyOut,
            1 => {
                self.lives = 0;
                LifeLoss::LastLife
            }
            lives => {
                self.lives = lives - 1;
                LifeLoss::Remaining(self.lives)
            }
        }
    }
}

/// Message sent after a life was taken, for the HUD.
#[derive(Message, Debug, Clone, Copy)]
pub struct LifeLost {
    pub remaining: u32,
}

/// Start every run from a clean session.
fn reset_session(mut session: ResMut<Session>, tuning: Res<Tuning>) {
    *session = Session::new(tuning.starting_lives);
    info!("Session reset with {} lives", session.lives);
}

/// Take a life for every enemy that got past the player.
pub(super) fn lose_lives(
    mut session: ResMut<Session>,
    mut escaped_events: MessageReader<EnemyEscaped>,
    mut life_lost_events: MessageWriter<LifeLost>,
    mut game_over_events: MessageWriter<GameOverRequested>,
) {
    for event in escaped_events.read() {
        match session.lose_life() {
            LifeLoss::Remaining(remaining) => {
                info!("Enemy {} escaped, {} lives left", event.entity, remaining);
                life_lost_events.write(LifeLost { remaining });
            }
            LifeLoss::LastLife => {
                info!("Enemy {} escaped, no lives left", event.entity);
                life_lost_events.write(LifeLost { remaining: 0 });
                game_over_events.write(GameOverRequested);
            }
            LifeLoss::AlreadyOut => {}
        }
    }
}
