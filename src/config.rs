use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::{GameError, Result};
use crate::snake::Snake;

/// Run configuration. Only `size` affects the simulation rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Playable side length N; the board is (N+2)x(N+2) with walls.
    pub size: usize,
    /// Food RNG seed. `None` seeds from entropy.
    pub seed: Option<u64>,
    /// Step cap for `Game::play` and rollouts.
    pub max_steps: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: 10,
            seed: None,
            max_steps: 1000,
        }
    }
}

impl GameConfig {
    /// Smallest board the starting snake fits on.
    pub const MIN_SIZE: usize = Snake::INITIAL_LENGTH;

    pub fn new(size: usize) -> Self {
        Self {
            size,
            ..Default::default()
        }
    }

    /// Reads a JSON config; missing fields fall back to defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| GameError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let config: GameConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        check_size(self.size)?;
        if self.max_steps == 0 {
            return Err(GameError::InvalidStepLimit);
        }
        Ok(())
    }
}

pub(crate) fn check_size(size: usize) -> Result<()> {
    if size < GameConfig::MIN_SIZE {
        return Err(GameError::InvalidSize {
            got: size,
            min: GameConfig::MIN_SIZE,
        });
    }
    Ok(())
}
