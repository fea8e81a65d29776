//! Grid snake simulation used as a reinforcement-learning environment.
//!
//! [`Game`] owns the tick rules: `reset`, `step(action)` returning
//! observation, reward, terminal flag and a score string, plus optional
//! rendering through a [`Renderer`]. Agents plug in through [`Agent`].

pub mod agent;
pub mod border;
pub mod config;
pub mod error;
pub mod food;
pub mod game;
pub mod grid;
pub mod logger;
pub mod render;
pub mod rollout;
pub mod snake;
pub mod utils;

pub use agent::{Agent, GreedyAgent, RandomAgent, StraightAgent};
pub use config::GameConfig;
pub use error::{GameError, Result};
pub use game::{EpisodeSummary, Game, Status, StepResult, Termination};
pub use grid::{CellValue, Observation, StateGrid};
pub use render::{AsciiRenderer, Renderer};
pub use snake::{ACTION_COUNT, ACTIONS, Direction, Snake};
pub use utils::Cell;
