use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::layout::{Layout, LayoutError};
use super::pursuit::Cadence;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("tick_ms must be greater than zero")]
    ZeroTick,

    #[error("invalid cadence {moves}/{window}: need 0 <= moves <= window and window > 0")]
    InvalidCadence { moves: u32, window: u32 },

    #[error("cannot parse cadence {0:?}, expected <moves>/<window> such as 2/3")]
    CadenceSyntax(String),

    #[error("speed_ramp.min_ms must be greater than zero")]
    ZeroRampFloor,

    #[error("map {}: {source}", .path.display())]
    Map {
        path: PathBuf,
        #[source]
        source: LayoutError,
    },

    #[error("built-in map: {0}")]
    Builtin(#[source] LayoutError),
}

/// Optional "faster as the score rises" pacing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeedRampConfig {
    /// Milliseconds taken off the tick for each point scored
    pub step_ms: u64,
    /// The tick never gets shorter than this
    pub min_ms: u64,
}

/// Configuration for the game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Length of one tick in milliseconds
    pub tick_ms: u64,
    /// Share of ticks on which the pursuer moves
    pub cadence: Cadence,
    /// Shrink the tick as the score rises (off by default)
    pub speed_ramp: Option<SpeedRampConfig>,
    /// Layout file; the built-in maze when unset
    pub map: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            tick_ms: 200,
            cadence: Cadence::default(),
            speed_ramp: None,
            map: None,
        }
    }
}

impl GameConfig {
    /// Parse a TOML document; missing keys keep their defaults
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Read and parse a TOML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        self.cadence.validate()?;
        if let Some(ramp) = self.speed_ramp {
            if ramp.min_ms == 0 {
                return Err(ConfigError::ZeroRampFloor);
            }
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Load the configured map, or the built-in maze
    pub fn layout(&self) -> Result<Layout, ConfigError> {
        let Some(path) = &self.map else {
            return Layout::builtin().map_err(ConfigError::Builtin);
        };

        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.clone(),
            source,
        })?;
        Layout::parse(&text).map_err(|source| ConfigError::Map {
            path: path.clone(),
            source,
        })
    }
}
