use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("playable size must be at least {min}, got {got}")]
    InvalidSize { got: usize, min: usize },

    #[error("max_steps must be at least 1")]
    InvalidStepLimit,

    #[error("no free cell left to place food")]
    BoardFull,

    #[error("failed to read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GameError>;
