//! Scripted straight-line movement.
//!
//! A [`Tween`] moves its entity from one point to another over a fixed time
//! and is removed when it arrives. Removing it early is how movement is
//! cancelled. Whoever cares about the arrival listens for [`TweenFinished`].

use std::time::Duration;

use bevy::prelude::*;

use super::GameSystems;
use crate::screens::Screen;

pub(super) fn plugin(app: &mut App) {
    app.add_message::<TweenFinished>();

    app.add_systems(
        Update,
        advance_tweens
            .in_set(GameSystems::Motion)
            .run_if(in_state(Screen::Gameplay)),
    );
}

/// Linear movement between two points.
#[derive(Component, Debug, Clone)]
pub struct Tween {
    pub from: Vec2,
    pub to: Vec2,
    timer: Timer,
}

impl Tween {
    pub fn new(from: Vec2, to: Vec2, duration_secs: f32) -> Self {
        Self {
            from,
            to,
            timer: Timer::from_seconds(duration_secs, TimerMode::Once),
        }
    }

    /// Advance by `delta` and return the new position.
    pub fn advance(&mut self, delta: Duration) -> Vec2 {
        self.timer.tick(delta);
        self.from.lerp(self.to, self.progress())
    }

    /// Fraction of the way travelled. A zero-length tween is already there.
    pub fn progress(&self) -> f32 {
        let duration = self.timer.duration().as_secs_f32();
        if duration <= 0.0 {
            1.0
        } else {
            (self.timer.elapsed_secs() / duration).min(1.0)
        }
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

/// Message sent when an entity reaches the end of its tween.
#[derive(Message, Debug, Clone, Copy)]
pub struct TweenFinished(pub Entity);

fn advance_tweens(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut Tween)>,
    mut finished_events: MessageWriter<TweenFinished>,
) {
    for (entity, mut transform, mut tween) in &mut query {
        let position = tween.advance(time.delta());
        transform.translation.x = position.x;
        transform.translation.y = position.y;

        if tween.is_finished() {
            commands.entity(entity).remove::<Tween>();
            finished_events.write(TweenFinished(entity));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_interpolates_linearly() {
        let mut tween = Tween::new(Vec2::new(0.0, 100.0), Vec2::new(40.0, -100.0), 2.0);
        let halfway = tween.advance(Duration::from_secs(1));
        assert!((halfway - Vec2::new(20.0, 0.0)).length() < 1e-4);
        assert!(!tween.is_finished());
    }

    #[test]
    fn test_tween_stops_at_target() {
        let mut tween = Tween::new(Vec2::ZERO, Vec2::new(0.0, 50.0), 0.5);
        let end = tween.advance(Duration::from_secs(3));
        assert_eq!(end, Vec2::new(0.0, 50.0));
        assert!(tween.is_finished());
    }

    #[test]
    fn test_zero_length_tween_arrives_at_once() {
        let mut tween = Tween::new(Vec2::ZERO, Vec2::new(10.0, 10.0), 0.0);
        let end = tween.advance(Duration::ZERO);
        assert_eq!(end, Vec2::new(10.0, 10.0));
        assert!(tween.is_finished());
    }
}
