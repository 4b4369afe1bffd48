//! Gameplay tuning loaded from a JSON file in the user's config directory.
//!
//! Every field has a default, so the file may override any subset of them.
//! A missing file is normal; a malformed one is reported and ignored.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

pub(super) fn plugin(app: &mut App) {
    app.init_resource::<Tuning>();
    app.register_type::<Tuning>();

    app.add_systems(Startup, load_tuning);
}

/// Tunable gameplay numbers. Distances are in scene units, times in seconds.
#[derive(Resource, Debug, Clone, PartialEq, Deserialize, Reflect)]
#[reflect(Resource)]
#[serde(default)]
pub struct Tuning {
    pub starting_lives: u32,
    /// Background scroll speed while in play.
    pub scroll_speed: f32,
    /// Time a bullet takes to cross the full screen height.
    /// Shorter flights take proportionally less time.
    pub bullet_travel_secs: f32,
    /// Time an enemy takes to cross the screen along its path.
    pub enemy_travel_secs: f32,
    /// Time the player takes to slide into view when play starts.
    pub player_entrance_secs: f32,
    /// Delay between losing and showing the game over screen.
    pub game_over_delay_secs: f32,
    pub player_size: Vec2,
    pub bullet_size: Vec2,
    pub enemy_size: Vec2,
    pub explosion_size: Vec2,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            scroll_speed: 300.0,
            bullet_travel_secs: 1.0,
            enemy_travel_secs: 2.0,
            player_entrance_secs: 0.5,
            game_over_delay_secs: 1.0,
            player_size: Vec2::new(48.0, 64.0),
            bullet_size: Vec2::new(8.0, 24.0),
            enemy_size: Vec2::new(48.0, 48.0),
            explosion_size: Vec2::new(72.0, 72.0),
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON. Fields not present keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Get the file path for the tuning overrides.
    fn file_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("solo_mission").join("tuning.json"))
    }

    /// Load tuning from disk, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = Self::file_path() else {
            warn!("Could not determine config directory for tuning");
            return Self::default();
        };

        if !path.exists() {
            info!("No tuning file at {:?}, using defaults", path);
            return Self::default();
        }

        match fs::read_to_string(&path) {
            Ok(contents) => match Self::from_json(&contents) {
                Ok(tuning) => {
                    info!("Loaded tuning from {:?}", path);
                    tuning
                }
                Err(e) => {
                    warn!("Failed to parse tuning: {}", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read tuning file: {}", e);
                Self::default()
            }
        }
    }
}

fn load_tuning(mut tuning: ResMut<Tuning>) {
    *tuning = Tuning::load();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "starting_lives": 5, "scroll_speed": 120.0 }"#)
            .expect("valid json");
        assert_eq!(tuning.starting_lives, 5);
        assert_eq!(tuning.scroll_speed, 120.0);
        assert_eq!(tuning.enemy_travel_secs, Tuning::default().enemy_travel_secs);
        assert_eq!(tuning.player_size, Tuning::default().player_size);
    }

    #[test]
    fn test_vectors_parse_as_arrays() {
        let tuning = Tuning::from_json(r#"{ "enemy_size": [10.0, 20.0] }"#).expect("valid json");
        assert_eq!(tuning.enemy_size, Vec2::new(10.0, 20.0));
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        assert!(Tuning::from_json("{ starting_lives: }").is_err());
        assert!(Tuning::from_json(r#"{ "starting_lives": "three" }"#).is_err());
    }
}
