//! Contact detection and resolution between ships and bullets.
//!
//! Every enemy is tested against every player and bullet hitbox once per
//! frame. Each overlap becomes a [`Contact`]; the resolver orders the pair by
//! category and looks the pair up in a small dispatch table.

use std::collections::HashSet;

use bevy::prelude::*;

use super::{
    GameSystems, PlayField, Session, effects::spawn_explosion, enemy::Enemy,
    phase::{GameOverRequested, Phase}, spawner::StartLevel,
};
use crate::config::Tuning;

pub(super) fn plugin(app: &mut App) {
    app.register_type::<Category>();
    app.register_type::<Hitbox>();
    app.add_message::<Contact>();

    app.add_systems(
        Update,
        (detect_contacts, resolve_contacts)
            .chain()
            .in_set(GameSystems::Contacts)
            .run_if(in_state(Phase::InGame)),
    );
}

/// What kind of body an entity is, for contact handling.
/// Ordered so that a pair can be put in a fixed order before dispatch.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Reflect)]
#[reflect(Component)]
pub enum Category {
    Player,
    Bullet,
    Enemy,
}

/// Axis-aligned collision box, centered on the entity.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Hitbox(pub Vec2);

impl Hitbox {
    /// Whether this box at `at` overlaps `other` at `other_at`.
    /// Touching edges do not count.
    pub fn overlaps(&self, at: Vec2, other: &Hitbox, other_at: Vec2) -> bool {
        let distance = (at - other_at).abs();
        let reach = (self.0 + other.0) / 2.0;
        distance.x < reach.x && distance.y < reach.y
    }
}

/// One side of a contact, captured when it was detected.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub entity: Entity,
    pub category: Category,
    pub position: Vec2,
}

/// Message sent for every overlapping pair, in no particular order.
#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub a: Body,
    pub b: Body,
}

impl Contact {
    /// The two bodies, lower category first.
    pub fn ordered(&self) -> (Body, Body) {
        if self.a.category <= self.b.category {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }
}

/// What to do with an ordered pair of categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactRule {
    /// An enemy rammed the player: both explode and the run ends.
    PlayerHit,
    /// A bullet hit an enemy: score, explode, remove both.
    EnemyShot,
    Ignore,
}

impl ContactRule {
    pub fn for_pair(first: Category, second: Category) -> Self {
        match (first, second) {
            (Category::Player, Category::Enemy) => ContactRule::PlayerHit,
            (Category::Bullet, Category::Enemy) => ContactRule::EnemyShot,
            _ => ContactRule::Ignore,
        }
    }
}

/// Kills only count while the enemy is on screen. An enemy below the bottom
/// edge is on its way out and will be counted as an escape instead.
pub fn is_scorable(enemy_y: f32, field: &PlayField) -> bool {
    enemy_y > field.area.min.y && enemy_y < field.area.max.y
}

/// Report every enemy overlapping the player or a bullet.
fn detect_contacts(
    enemies: Query<(Entity, &Transform, &Hitbox), With<Enemy>>,
    others: Query<(Entity, &Category, &Transform, &Hitbox), Without<Enemy>>,
    mut contact_events: MessageWriter<Contact>,
) {
    for (enemy, enemy_transform, enemy_hitbox) in &enemies {
        let enemy_position = enemy_transform.translation.truncate();

        for (other, &category, transform, hitbox) in &others {
            let position = transform.translation.truncate();
            if enemy_hitbox.overlaps(enemy_position, hitbox, position) {
                contact_events.write(Contact {
                    a: Body {
                        entity: enemy,
                        category: Category::Enemy,
                        position: enemy_position,
                    },
                    b: Body {
                        entity: other,
                        category,
                        position,
                    },
                });
            }
        }
    }
}

/// Apply the contact rules. An entity removed by one contact is ignored by
/// the rest of this frame's contacts.
fn resolve_contacts(
    mut commands: Commands,
    mut contact_events: MessageReader<Contact>,
    mut session: ResMut<Session>,
    field: Res<PlayField>,
    tuning: Res<Tuning>,
    mut level_events: MessageWriter<StartLevel>,
    mut game_over_events: MessageWriter<GameOverRequested>,
) {
    let mut removed: HashSet<Entity> = HashSet::new();

    for contact in contact_events.read() {
        let (first, second) = contact.ordered();
        if removed.contains(&first.entity) || removed.contains(&second.entity) {
            continue;
        }

        match ContactRule::for_pair(first.category, second.category) {
            ContactRule::PlayerHit => {
                spawn_explosion(&mut commands, first.position, &tuning);
                spawn_explosion(&mut commands, second.position, &tuning);
                commands.entity(first.entity).despawn();
                commands.entity(second.entity).despawn();
                removed.extend([first.entity, second.entity]);

                info!("Player hit by enemy {}", second.entity);
                game_over_events.write(GameOverRequested);
            }
            ContactRule::EnemyShot => {
                if !is_scorable(second.position.y, &field) {
                    continue;
                }

                if session.record_kill() {
                    level_events.write(StartLevel);
                }
                info!("Enemy {} shot down, score {}", second.entity, session.score);

                spawn_explosion(&mut commands, second.position, &tuning);
                commands.entity(first.entity).despawn();
                commands.entity(second.entity).despawn();
                removed.extend([first.entity, second.entity]);
            }
            ContactRule::Ignore => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn body(entity: Entity, category: Category, position: Vec2) -> Body {
        Body {
            entity,
            category,
            position,
        }
    }

    #[test]
    fn test_pair_is_ordered_by_category() {
        let mut world = World::new();
        let enemy = body(world.spawn_empty().id(), Category::Enemy, Vec2::ZERO);
        let bullet = body(world.spawn_empty().id(), Category::Bullet, Vec2::ONE);

        let forward = Contact { a: bullet, b: enemy }.ordered();
        let backward = Contact { a: enemy, b: bullet }.ordered();
        assert_eq!(forward, (bullet, enemy));
        assert_eq!(backward, (bullet, enemy));
    }

    #[test]
    fn test_dispatch_table() {
        let rule = ContactRule::for_pair;
        assert_eq!(rule(Category::Player, Category::Enemy), ContactRule::PlayerHit);
        assert_eq!(rule(Category::Bullet, Category::Enemy), ContactRule::EnemyShot);
        assert_eq!(rule(Category::Player, Category::Bullet), ContactRule::Ignore);
        assert_eq!(rule(Category::Bullet, Category::Bullet), ContactRule::Ignore);
        assert_eq!(rule(Category::Enemy, Category::Enemy), ContactRule::Ignore);
        assert_eq!(rule(Category::Player, Category::Player), ContactRule::Ignore);
    }

    #[test]
    fn test_hitbox_overlap() {
        let a = Hitbox(Vec2::new(10.0, 10.0));
        let b = Hitbox(Vec2::new(20.0, 4.0));
        assert!(a.overlaps(Vec2::ZERO, &b, Vec2::new(14.0, 6.0)));
        assert!(!a.overlaps(Vec2::ZERO, &b, Vec2::new(15.0, 0.0)));
        assert!(!a.overlaps(Vec2::ZERO, &b, Vec2::new(0.0, 7.5)));
        assert!(b.overlaps(Vec2::new(14.0, 6.0), &a, Vec2::ZERO));
    }

    #[test]
    fn test_only_on_screen_enemies_score() {
        let field = PlayField::default();
        assert!(is_scorable(field.height() / 2.0, &field));
        assert!(is_scorable(1.0, &field));
        assert!(!is_scorable(0.0, &field));
        assert!(!is_scorable(-25.0, &field));
        assert!(!is_scorable(field.height() + 10.0, &field));
    }

    fn contact_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.init_resource::<Session>();
        app.init_resource::<PlayField>();
        app.init_resource::<Tuning>();
        app.add_message::<Contact>();
        app.add_message::<StartLevel>();
        app.add_message::<GameOverRequested>();
        app.add_systems(Update, resolve_contacts);
        app
    }

    fn spawn_body(app: &mut App, category: Category, position: Vec2) -> Body {
        let entity = app
            .world_mut()
            .spawn((category, Transform::from_translation(position.extend(0.0))))
            .id();
        body(entity, category, position)
    }

    #[test]
    fn test_enemy_hit_by_two_bullets_scores_once() {
        let mut app = contact_app();
        let at = Vec2::new(300.0, 500.0);
        let enemy = spawn_body(&mut app, Category::Enemy, at);
        let first = spawn_body(&mut app, Category::Bullet, at);
        let second = spawn_body(&mut app, Category::Bullet, at);

        app.world_mut().write_message(Contact { a: enemy, b: first });
        app.world_mut().write_message(Contact { a: enemy, b: second });
        app.update();

        assert_eq!(app.world().resource::<Session>().score, 1);
        assert!(app.world().get_entity(enemy.entity).is_err());
        assert!(app.world().get_entity(first.entity).is_err());
        // The second bullet keeps flying.
        assert!(app.world().get_entity(second.entity).is_ok());
    }

    #[test]
    fn test_escaping_enemy_is_not_scored() {
        let mut app = contact_app();
        let below = Vec2::new(300.0, -30.0);
        let enemy = spawn_body(&mut app, Category::Enemy, below);
        let bullet = spawn_body(&mut app, Category::Bullet, below);

        app.world_mut().write_message(Contact { a: bullet, b: enemy });
        app.update();

        assert_eq!(app.world().resource::<Session>().score, 0);
        assert!(app.world().get_entity(enemy.entity).is_ok());
        assert!(app.world().get_entity(bullet.entity).is_ok());
    }

    #[test]
    fn test_tenth_kill_requests_level_up() {
        let mut app = contact_app();
        app.world_mut().resource_mut::<Session>().score = 9;
        let at = Vec2::new(300.0, 500.0);
        let enemy = spawn_body(&mut app, Category::Enemy, at);
        let bullet = spawn_body(&mut app, Category::Bullet, at);

        app.world_mut().write_message(Contact { a: enemy, b: bullet });
        app.update();

        assert_eq!(app.world().resource::<Session>().score, 10);
        let level_ups = app.world().resource::<Messages<StartLevel>>();
        assert_eq!(level_ups.len(), 1);
    }

    #[test]
    fn test_player_hit_removes_both_and_ends_game() {
        let mut app = contact_app();
        let player = spawn_body(&mut app, Category::Player, Vec2::new(360.0, 190.0));
        let enemy = spawn_body(&mut app, Category::Enemy, Vec2::new(370.0, 200.0));

        app.world_mut().write_message(Contact { a: enemy, b: player });
        app.update();

        assert!(app.world().get_entity(player.entity).is_err());
        assert!(app.world().get_entity(enemy.entity).is_err());
        let game_overs = app.world().resource::<Messages<GameOverRequested>>();
        assert_eq!(game_overs.len(), 1);
        // Lives are untouched; the hit ends the run on its own.
        assert_eq!(app.world().resource::<Session>().lives, 3);
    }
}
