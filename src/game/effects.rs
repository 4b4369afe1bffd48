//! Visual effects - explosions, fades and the lives bounce.
//!
//! Each effect is a component holding its own clock. The animate systems
//! advance the clock, apply the current look and remove the effect (or the
//! entity) once it is done.

use bevy::prelude::*;

use super::GameSystems;
use crate::{config::Tuning, screens::Screen};

pub(super) fn plugin(app: &mut App) {
    app.add_systems(
        Update,
        (animate_explosions, animate_text_fades, animate_bounces)
            .in_set(GameSystems::Presentation)
            .run_if(in_state(Screen::Gameplay)),
    );
}

// =============================================================================
// EXPLOSION
// =============================================================================

const EXPLOSION_COLOR: Color = Color::srgb(1.0, 0.55, 0.1);
const EXPLOSION_Z: f32 = 3.0;

/// Time to grow from nothing to full size.
const EXPLOSION_GROW_SECS: f32 = 0.1;
/// Time to fade out once full size.
const EXPLOSION_FADE_SECS: f32 = 0.1;

/// An explosion that grows, fades and removes itself.
#[derive(Component, Debug, Default)]
pub struct Explosion {
    pub timer: f32,
}

impl Explosion {
    /// Scale and alpha `elapsed` seconds after the blast.
    pub fn appearance(elapsed: f32) -> (f32, f32) {
        if elapsed < EXPLOSION_GROW_SECS {
            (elapsed / EXPLOSION_GROW_SECS, 1.0)
        } else {
            let fade = ((elapsed - EXPLOSION_GROW_SECS) / EXPLOSION_FADE_SECS).min(1.0);
            (1.0, 1.0 - fade)
        }
    }

    pub fn is_done(&self) -> bool {
        self.timer >= EXPLOSION_GROW_SECS + EXPLOSION_FADE_SECS
    }
}

pub fn spawn_explosion(commands: &mut Commands, position: Vec2, tuning: &Tuning) {
    commands.spawn((
        Name::new("Explosion"),
        Explosion::default(),
        Sprite::from_color(EXPLOSION_COLOR, tuning.explosion_size),
        Transform::from_translation(position.extend(EXPLOSION_Z)).with_scale(Vec3::ZERO),
        DespawnOnExit(Screen::Gameplay),
    ));
}

fn animate_explosions(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut Sprite, &mut Explosion)>,
) {
    for (entity, mut transform, mut sprite, mut explosion) in &mut query {
        explosion.timer += time.delta_secs();
        let (scale, alpha) = Explosion::appearance(explosion.timer);
        transform.scale = Vec3::splat(scale);
        sprite.color = sprite.color.with_alpha(alpha);

        if explosion.is_done() {
            commands.entity(entity).despawn();
        }
    }
}

// =============================================================================
// FADE
// =============================================================================

/// Fades text from one alpha to another.
#[derive(Component, Debug, Clone)]
pub struct Fade {
    pub timer: f32,
    pub duration: f32,
    pub from: f32,
    pub to: f32,
    /// Remove the entity when the fade completes.
    pub despawn: bool,
}

impl Fade {
    pub fn new(from: f32, to: f32, duration: f32) -> Self {
        Self {
            timer: 0.0,
            duration,
            from,
            to,
            despawn: false,
        }
    }

    /// Fade from the current alpha to transparent.
    pub fn out(from: f32, duration: f32) -> Self {
        Self::new(from, 0.0, duration)
    }

    pub fn then_despawn(mut self) -> Self {
        self.despawn = true;
        self
    }

    pub fn progress(&self) -> f32 {
        if self.duration <= 0.0 {
            1.0
        } else {
            (self.timer / self.duration).min(1.0)
        }
    }

    pub fn alpha(&self) -> f32 {
        self.from + (self.to - self.from) * self.progress()
    }
}

fn animate_text_fades(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut TextColor, &mut Fade)>,
) {
    for (entity, mut color, mut fade) in &mut query {
        fade.timer += time.delta_secs();
        color.0 = color.0.with_alpha(fade.alpha());

        if fade.progress() >= 1.0 {
            if fade.despawn {
                commands.entity(entity).despawn();
            } else {
                commands.entity(entity).remove::<Fade>();
            }
        }
    }
}

// =============================================================================
// BOUNCE
// =============================================================================

const BOUNCE_PEAK: f32 = 1.5;
const BOUNCE_HALF_SECS: f32 = 0.2;

/// A quick grow-and-shrink pulse.
#[derive(Component, Debug, Default)]
pub struct Bounce {
    pub timer: f32,
}

impl Bounce {
    pub fn scale_at(elapsed: f32) -> f32 {
        let rise = BOUNCE_PEAK - 1.0;
        if elapsed < BOUNCE_HALF_SECS {
            1.0 + rise * elapsed / BOUNCE_HALF_SECS
        } else if elapsed < BOUNCE_HALF_SECS * 2.0 {
            BOUNCE_PEAK - rise * (elapsed - BOUNCE_HALF_SECS) / BOUNCE_HALF_SECS
        } else {
            1.0
        }
    }

    pub fn is_done(&self) -> bool {
        self.timer >= BOUNCE_HALF_SECS * 2.0
    }
}

fn animate_bounces(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Transform, &mut Bounce)>,
) {
    for (entity, mut transform, mut bounce) in &mut query {
        bounce.timer += time.delta_secs();
        transform.scale = Vec3::splat(Bounce::scale_at(bounce.timer));

        if bounce.is_done() {
            commands.entity(entity).remove::<Bounce>();
        }
    }
}
