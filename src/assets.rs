//! Startup asset loading
//!
//! Everything is fetched through macroquad's file layer so the same paths
//! work natively (relative to the working directory) and on the web
//! (relative to the page). A missing asset is logged and replaced by
//! nothing: textures fall back to placeholder fills, sounds stay silent,
//! the config falls back to defaults.

use macroquad::audio::load_sound;
use macroquad::prelude::*;
use thiserror::Error;
use tracing::{info, warn};

use crate::audio::{SoundBank, SoundId};
use crate::config::{ConfigError, GameConfig};
use crate::render::Tileset;

pub const PLATFORMS_TILESET: &str = "assets/sprites/platforms.png";
pub const KNIGHT_TILESET: &str = "assets/sprites/knight.png";
pub const COIN_TILESET: &str = "assets/sprites/coin.png";

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("failed to load texture {path}: {message}")]
    Texture { path: String, message: String },
    #[error("failed to load sound {path}: {message}")]
    Sound { path: String, message: String },
    #[error("failed to read {path}: {message}")]
    File { path: String, message: String },
    #[error("bad config {path}: {source}")]
    Config {
        path: String,
        #[source]
        source: ConfigError,
    },
}

/// Everything the frontend needs before the first frame
pub struct Assets {
    pub platforms: Tileset,
    pub knight: Tileset,
    pub coin: Tileset,
    pub sounds: SoundBank,
}

pub async fn load_tileset_texture(path: &str) -> Result<Texture2D, AssetError> {
    load_texture(path).await.map_err(|e| AssetError::Texture {
        path: path.to_string(),
        message: e.to_string(),
    })
}

pub async fn load_sound_file(path: &str) -> Result<macroquad::audio::Sound, AssetError> {
    load_sound(path).await.map_err(|e| AssetError::Sound {
        path: path.to_string(),
        message: e.to_string(),
    })
}

pub async fn load_config(path: &str) -> Result<GameConfig, AssetError> {
    let text = load_string(path).await.map_err(|e| AssetError::File {
        path: path.to_string(),
        message: e.to_string(),
    })?;
    GameConfig::from_ron_str(&text).map_err(|source| AssetError::Config {
        path: path.to_string(),
        source,
    })
}

/// Config from `path`, or the defaults if it is missing or invalid.
pub async fn load_config_or_default(path: &str) -> GameConfig {
    match load_config(path).await {
        Ok(config) => {
            info!(path, "loaded config");
            config
        }
        Err(e) => {
            warn!(error = %e, "using default config");
            GameConfig::default()
        }
    }
}

async fn tileset(path: &str) -> Tileset {
    match load_tileset_texture(path).await {
        Ok(texture) => Tileset::new(Some(texture)),
        Err(e) => {
            warn!(error = %e, "tileset missing, drawing placeholders");
            Tileset::new(None)
        }
    }
}

/// Load every tileset and sound. Returns once all of them have resolved.
pub async fn load_all() -> Assets {
    let platforms = tileset(PLATFORMS_TILESET).await;
    let knight = tileset(KNIGHT_TILESET).await;
    let coin = tileset(COIN_TILESET).await;

    let mut sounds = SoundBank::default();
    let mut loaded = 0;
    for id in SoundId::ALL {
        match load_sound_file(id.path()).await {
            Ok(sound) => {
                sounds.insert(id, sound);
                loaded += 1;
            }
            Err(e) => warn!(error = %e, "sound missing"),
        }
    }

    info!(sounds = loaded, total = SoundId::ALL.len(), "assets ready");
    Assets { platforms, knight, coin, sounds }
}
