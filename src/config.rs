//! Game tuning loaded from RON
//!
//! Every field has a default matching the shipped feel of the game, so a
//! config file only needs the values it wants to change:
//!
//! ```ron
//! (
//!     player: (jump_power: 2.0),
//!     session: (seed: Some(42)),
//! )
//! ```

use std::fs;
use std::path::Path;
use serde::{Serialize, Deserialize};
use thiserror::Error;

/// Where the frontend looks for the config (relative to the asset root)
pub const CONFIG_PATH: &str = "assets/config/game.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
    #[error("Serialize error: {0}")]
    Serialize(#[from] ron::Error),
    #[error("Invalid config: {0}")]
    Invalid(String),
}

/// Player physics and size
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub start_x: f32,
    pub start_y: f32,
    pub width: f32,
    pub height: f32,
    /// Downward acceleration, negative (screen heights / s²)
    pub gravity: f32,
    /// Upward velocity given by a normal bounce
    pub jump_power: f32,
    /// Horizontal speed while a direction is held (screen widths / s)
    pub move_speed: f32,
    /// Bounce multiplier for jumpy platforms
    pub jumpy_multiplier: f32,
    /// Sprite drawn slightly below the hitbox so the feet sink into platforms
    pub sprite_offset_y: f32,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            start_x: 0.5,
            start_y: 0.0,
            width: 0.1,
            height: 0.1,
            gravity: -5.0,
            jump_power: 1.8,
            move_speed: 1.1,
            jumpy_multiplier: 2.2,
            sprite_offset_y: -0.015,
        }
    }
}

impl PlayerConfig {
    /// Apex height of a standard bounce: v² / 2g
    pub fn max_jump_height(&self) -> f32 {
        (self.jump_power * self.jump_power) / (2.0 * -self.gravity)
    }
}

/// Platform generation and pruning
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Platforms further than this below the camera are dropped
    pub keep_alive_height: f32,
    /// Generate until the topmost platform is this far above the camera
    pub generation_lookahead: f32,
    pub platform_height: f32,
    pub coin_chance: f32,
    pub jumpy_chance: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            keep_alive_height: 2.5,
            generation_lookahead: 3.0,
            platform_height: 0.035,
            coin_chance: 0.075,
            jumpy_chance: 0.05,
        }
    }
}

/// Run lifecycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds between game over and the next title screen
    pub restart_delay: f32,
    /// How far below the lowest platform the player may fall before dying
    pub death_margin: f32,
    /// Upper bound on a single step (s)
    pub max_frame_dt: f32,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            restart_delay: 3.0,
            death_margin: 0.5,
            max_frame_dt: 0.1,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub player: PlayerConfig,
    pub world: WorldConfig,
    pub session: SessionConfig,
}

impl GameConfig {
    /// Parse and validate a RON document.
    pub fn from_ron_str(s: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = ron::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        Self::from_ron_str(&contents)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(3);
        let s = ron::ser::to_string_pretty(self, pretty)?;
        fs::write(path, s)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let p = &self.player;
        let w = &self.world;
        let s = &self.session;

        let finite = [
            ("player.start_x", p.start_x),
            ("player.start_y", p.start_y),
            ("player.width", p.width),
            ("player.height", p.height),
            ("player.gravity", p.gravity),
            ("player.jump_power", p.jump_power),
            ("player.move_speed", p.move_speed),
            ("player.jumpy_multiplier", p.jumpy_multiplier),
            ("player.sprite_offset_y", p.sprite_offset_y),
            ("world.keep_alive_height", w.keep_alive_height),
            ("world.generation_lookahead", w.generation_lookahead),
            ("world.platform_height", w.platform_height),
            ("session.restart_delay", s.restart_delay),
            ("session.death_margin", s.death_margin),
            ("session.max_frame_dt", s.max_frame_dt),
        ];
        for (name, value) in finite {
            if !value.is_finite() {
                return Err(invalid(format!("{} is not finite ({})", name, value)));
            }
        }

        if p.gravity >= 0.0 {
            return Err(invalid(format!("player.gravity must be negative ({})", p.gravity)));
        }
        if p.jump_power <= 0.0 {
            return Err(invalid(format!("player.jump_power must be positive ({})", p.jump_power)));
        }
        for (name, value) in [("player.width", p.width), ("player.height", p.height)] {
            if value <= 0.0 || value >= 1.0 {
                return Err(invalid(format!("{} must be in (0, 1) ({})", name, value)));
            }
        }
        if w.keep_alive_height <= 0.0 {
            return Err(invalid(format!(
                "world.keep_alive_height must be positive ({})",
                w.keep_alive_height
            )));
        }
        if w.platform_height <= 0.0 {
            return Err(invalid(format!(
                "world.platform_height must be positive ({})",
                w.platform_height
            )));
        }
        for (name, value) in [("world.coin_chance", w.coin_chance), ("world.jumpy_chance", w.jumpy_chance)] {
            if !(0.0..=1.0).contains(&value) {
                return Err(invalid(format!("{} must be a probability ({})", name, value)));
            }
        }
        if s.restart_delay < 0.0 {
            return Err(invalid(format!("session.restart_delay must not be negative ({})", s.restart_delay)));
        }
        if s.max_frame_dt <= 0.0 {
            return Err(invalid(format!("session.max_frame_dt must be positive ({})", s.max_frame_dt)));
        }
        Ok(())
    }
}

fn invalid(msg: String) -> ConfigError {
    ConfigError::Invalid(msg)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert!((config.player.max_jump_height() - 0.324).abs() < 1e-5);
    }

    #[test]
    fn test_partial_document_keeps_defaults() {
        let config = GameConfig::from_ron_str("(player: (jump_power: 2.0), session: (seed: Some(7)))")
            .unwrap();
        assert_eq!(config.player.jump_power, 2.0);
        assert_eq!(config.player.gravity, -5.0);
        assert_eq!(config.session.seed, Some(7));
        assert_eq!(config.world, WorldConfig::default());
    }

    #[test]
    fn test_empty_document() {
        let config = GameConfig::from_ron_str("()").unwrap();
        assert_eq!(config, GameConfig::default());
    }

    #[test]
    fn test_rejects_upward_gravity() {
        let err = GameConfig::from_ron_str("(player: (gravity: 3.0))").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));
    }

    #[test]
    fn test_rejects_bad_probability() {
        let err = GameConfig::from_ron_str("(world: (coin_chance: 1.5))").unwrap_err();
        assert!(err.to_string().contains("world.coin_chance"));
    }

    #[test]
    fn test_parse_error() {
        let err = GameConfig::from_ron_str("(player: (jump_power: fast))").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.ron");

        let mut config = GameConfig::default();
        config.world.keep_alive_height = 4.0;
        config.session.seed = Some(99);
        config.save(&path).unwrap();

        let loaded = GameConfig::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = GameConfig::load(dir.path().join("nope.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
