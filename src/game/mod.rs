//! The gameplay scene for the shooter.
//!
//! This module contains all the gameplay logic including:
//! - The pre-game / in-game / after-game phase machine
//! - The session (score, lives, level)
//! - Timed enemy spawning driven by the level table
//! - Scripted motion for the player, bullets, enemies and HUD
//! - Contact detection and resolution
//! - Scrolling background, explosions and the HUD

mod background;
mod bullet;
mod contact;
mod debug;
mod effects;
mod enemy;
mod hud;
mod input;
mod motion;
mod phase;
mod player;
mod session;
mod spawner;

use bevy::prelude::*;

pub use phase::Phase;
pub use session::Session;

use crate::{AppSystems, config::Tuning, screens::Screen};

/// Width of the scene in world units.
pub const SCENE_WIDTH: f32 = 720.0;

/// Height of the scene in world units.
pub const SCENE_HEIGHT: f32 = 960.0;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<PlayField>();
    app.register_type::<PlayField>();

    configure_frame_order(app);

    app.add_plugins((
        input::plugin,
        background::plugin,
        motion::plugin,
        player::plugin,
        bullet::plugin,
        enemy::plugin,
        spawner::plugin,
        contact::plugin,
        session::plugin,
        phase::plugin,
        hud::plugin,
        effects::plugin,
        debug::plugin,
    ));

    // Life loss, level starts and game over share state, so they run in a fixed order.
    app.add_systems(
        Update,
        (
            session::lose_lives,
            spawner::start_new_level,
            phase::run_game_over,
        )
            .chain()
            .in_set(GameSystems::Rules)
            .run_if(in_state(Phase::InGame)),
    );
}

/// Chain the gameplay sets and flush despawns from arrivals before contacts.
fn configure_frame_order(app: &mut App) {
    app.configure_sets(
        Update,
        (
            GameSystems::Input,
            GameSystems::Scroll,
            GameSystems::Spawn,
            GameSystems::Motion,
            GameSystems::Arrivals,
            GameSystems::Contacts,
            GameSystems::Rules,
            GameSystems::Presentation,
        )
            .chain()
            .in_set(AppSystems::Update),
    );

    // Escaped enemies and spent bullets must be gone before contacts are detected,
    // so an escape in the same frame always wins over a hit.
    app.add_systems(
        Update,
        ApplyDeferred
            .after(GameSystems::Arrivals)
            .before(GameSystems::Contacts)
            .run_if(in_state(Screen::Gameplay)),
    );
}

/// The per-frame order of the gameplay scene.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameSystems {
    /// Taps and drags.
    Input,
    /// Background scrolling.
    Scroll,
    /// Enemy spawn timer.
    Spawn,
    /// Scripted movement.
    Motion,
    /// Reactions to finished movements (escapes, spent bullets, player entrance).
    Arrivals,
    /// Contact detection and resolution.
    Contacts,
    /// Lives, levels and the phase machine.
    Rules,
    /// HUD and visual effects.
    Presentation,
}

/// The scene bounds and the playable area inside them.
///
/// The playable area keeps a 16:9 portrait aspect and is centered
/// horizontally; enemies spawn and the player moves only inside it.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Resource)]
pub struct PlayField {
    pub size: Vec2,
    pub area: Rect,
}

impl PlayField {
    /// Tallest aspect ratio the playable area is designed for.
    pub const MAX_ASPECT_RATIO: f32 = 16.0 / 9.0;

    pub fn new(size: Vec2) -> Self {
        let playable_width = size.y / Self::MAX_ASPECT_RATIO;
        let margin = (size.x - playable_width) / 2.0;
        Self {
            size,
            area: Rect::new(margin, 0.0, margin + playable_width, size.y),
        }
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }
}

impl Default for PlayField {
    fn default() -> Self {
        Self::new(Vec2::new(SCENE_WIDTH, SCENE_HEIGHT))
    }
}

/// System to spawn the scene when entering gameplay.
/// Called from `screens/gameplay.rs` on `OnEnter(Screen::Gameplay)`.
pub fn spawn_game(mut commands: Commands, field: Res<PlayField>, tuning: Res<Tuning>) {
    background::spawn_background(&mut commands, &field);
    player::spawn_player(&mut commands, &field, &tuning);
    hud::spawn_hud(&mut commands, &field, &tuning);

    info!("Game spawned - tap to begin");
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    use contact::{Category, Hitbox};
    use enemy::Enemy;
    use motion::Tween;
    use phase::GameOverRequested;
    use spawner::StartLevel;

    #[test]
    fn test_play_field_is_centered() {
        let field = PlayField::new(Vec2::new(720.0, 960.0));
        assert_eq!(field.area.width(), 540.0);
        assert_eq!(field.area.min.x, 90.0);
        assert_eq!(field.area.max.x, 630.0);
        assert_eq!(field.area.min.y, 0.0);
        assert_eq!(field.area.max.y, 960.0);
    }

    #[test]
    fn test_play_field_fills_narrow_scene() {
        let field = PlayField::new(Vec2::new(540.0, 960.0));
        assert_eq!(field.area.min.x, 0.0);
        assert_eq!(field.area.max.x, 540.0);
    }

    fn frame_app() -> App {
        let mut app = App::new();
        app.add_plugins((MinimalPlugins, StatesPlugin));
        app.init_state::<Screen>();
        app.add_sub_state::<Phase>();
        app.init_resource::<PlayField>();
        app.init_resource::<Tuning>();
        app.add_message::<GameOverRequested>();
        app.add_message::<StartLevel>();
        configure_frame_order(&mut app);
        app.add_plugins((motion::plugin, enemy::plugin, contact::plugin, session::plugin));
        app.add_systems(
            Update,
            session::lose_lives
                .in_set(GameSystems::Rules)
                .run_if(in_state(Phase::InGame)),
        );

        app.world_mut()
            .resource_mut::<NextState<Screen>>()
            .set(Screen::Gameplay);
        app.update();
        app.world_mut()
            .resource_mut::<NextState<Phase>>()
            .set(Phase::InGame);
        app.update();
        app
    }

    /// An enemy at `at` moving by `tween`, and a bullet on the same spot.
    fn enemy_over_bullet(app: &mut App, at: Vec2, tween: Tween) -> (Entity, Entity) {
        let tuning = Tuning::default();
        let enemy = app
            .world_mut()
            .spawn((
                Enemy,
                Category::Enemy,
                Hitbox(tuning.enemy_size),
                Transform::from_translation(at.extend(2.0)),
                tween,
            ))
            .id();
        let bullet = app
            .world_mut()
            .spawn((
                Category::Bullet,
                Hitbox(tuning.bullet_size),
                Transform::from_translation(at.extend(1.0)),
            ))
            .id();
        (enemy, bullet)
    }

    #[test]
    fn test_escape_wins_over_hit_in_same_frame() {
        let mut app = frame_app();
        let at = Vec2::new(360.0, 400.0);
        let (enemy, bullet) = enemy_over_bullet(&mut app, at, Tween::new(at, at, 0.0));

        app.update();

        let session = app.world().resource::<Session>();
        assert_eq!(session.score, 0);
        assert_eq!(session.lives, 2);
        assert!(app.world().get_entity(enemy).is_err());
        assert!(app.world().get_entity(bullet).is_ok());
    }

    #[test]
    fn test_hit_scores_while_enemy_still_flying() {
        let mut app = frame_app();
        let at = Vec2::new(360.0, 400.0);
        let tween = Tween::new(at, at - Vec2::new(0.0, 100.0), 10.0);
        let (enemy, bullet) = enemy_over_bullet(&mut app, at, tween);

        app.update();

        let session = app.world().resource::<Session>();
        assert_eq!(session.score, 1);
        assert_eq!(session.lives, 3);
        assert!(app.world().get_entity(enemy).is_err());
        assert!(app.world().get_entity(bullet).is_err());
    }
}
