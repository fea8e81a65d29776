use log::debug;
use rand::Rng;
use rand::seq::SliceRandom;

use crate::error::{GameError, Result};
use crate::utils::Cell;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    pub position: Cell,
}

impl Food {
    pub fn new(position: Cell) -> Self {
        Self { position }
    }

    /// Moves the food to a uniformly chosen cell of `allowed`.
    ///
    /// The caller guarantees `allowed` holds no snake cell. An empty slice
    /// means the board is full and leaves the position untouched.
    pub fn replenish<R: Rng + ?Sized>(&mut self, allowed: &[Cell], rng: &mut R) -> Result<Cell> {
        let &pos = allowed.choose(rng).ok_or(GameError::BoardFull)?;
        self.position = pos;
        debug!("food placed at {pos}");
        Ok(pos)
    }
}
