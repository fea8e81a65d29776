//! Decision makers that drive an episode.
//!
//! Agents only ever see the observation tensor and answer with an action
//! index, or `None` to keep the current heading.

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::grid::{CellValue, Observation};
use crate::snake::{ACTIONS, ACTION_COUNT};
use crate::utils::Cell;

/// Object-safe so it can be used as `Box<dyn Agent>`.
pub trait Agent {
    fn select_action(&mut self, observation: &Observation) -> Option<usize>;
}

impl<A: Agent + ?Sized> Agent for Box<A> {
    fn select_action(&mut self, observation: &Observation) -> Option<usize> {
        (**self).select_action(observation)
    }
}

/// Never turns.
#[derive(Debug, Default, Clone, Copy)]
pub struct StraightAgent;

impl Agent for StraightAgent {
    fn select_action(&mut self, _observation: &Observation) -> Option<usize> {
        None
    }
}

/// Uniform over the whole action table, reversals included.
pub struct RandomAgent {
    rng: ChaCha8Rng,
}

impl RandomAgent {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, _observation: &Observation) -> Option<usize> {
        Some(self.rng.gen_range(0..ACTION_COUNT))
    }
}

/// Steps toward the food, skipping moves that land on a wall or body cell.
#[derive(Debug, Default, Clone, Copy)]
pub struct GreedyAgent;

impl GreedyAgent {
    fn find(observation: &Observation, target: CellValue) -> Option<Cell> {
        observation
            .indexed_iter()
            .find(|(_, v)| **v == target.value())
            .map(|((row, col, _), _)| Cell::new(row as i32, col as i32))
    }

    fn is_safe(observation: &Observation, cell: Cell) -> bool {
        if cell.row < 0 || cell.col < 0 {
            return false;
        }
        match observation.get((cell.row as usize, cell.col as usize, 0)) {
            Some(&v) => v == CellValue::Earth.value() || v == CellValue::Food.value(),
            None => false,
        }
    }
}

impl Agent for GreedyAgent {
    fn select_action(&mut self, observation: &Observation) -> Option<usize> {
        let head = Self::find(observation, CellValue::Head)?;
        let food = Self::find(observation, CellValue::Food);

        ACTIONS
            .iter()
            .enumerate()
            .map(|(index, dir)| (index, head.step(*dir)))
            .filter(|(_, next)| Self::is_safe(observation, *next))
            .min_by_key(|(_, next)| food.map_or(0, |f| next.manhattan(f)))
            .map(|(index, _)| index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::border::Border;
    use crate::food::Food;
    use crate::grid::GridPainter;
    use crate::snake::{Direction, Snake};

    fn observe(snake: &Snake, food: Cell) -> Observation {
        GridPainter::new(Border::new(5))
            .paint(snake, &Food::new(food))
            .into_observation()
    }

    #[test]
    fn straight_agent_never_turns() {
        let obs = observe(&Snake::new(), Cell::new(3, 3));
        assert_eq!(StraightAgent.select_action(&obs), None);
    }

    #[test]
    fn random_agent_stays_in_table() {
        let obs = observe(&Snake::new(), Cell::new(3, 3));
        let mut agent = RandomAgent::new(11);
        for _ in 0..100 {
            let a = agent.select_action(&obs).unwrap();
            assert!(a < ACTION_COUNT);
        }
    }

    #[test]
    fn greedy_heads_for_food() {
        // food straight below the head
        let obs = observe(&Snake::new(), Cell::new(4, 4));
        assert_eq!(GreedyAgent.select_action(&obs), Some(Direction::Down.action_index()));
    }

    #[test]
    fn greedy_avoids_walls() {
        // head in the top-right corner: RIGHT and UP are wall, LEFT is the neck
        let snake = Snake::from_body(
            [Cell::new(1, 5), Cell::new(1, 4), Cell::new(1, 3)],
            Direction::Right,
        )
        .unwrap();
        let obs = observe(&snake, Cell::new(5, 1));
        let action = GreedyAgent.select_action(&obs).unwrap();
        assert_eq!(action, Direction::Down.action_index());
    }

    #[test]
    fn greedy_gives_up_when_boxed_in() {
        // head in the top-left corner, only exit blocked by the body
        let snake = Snake::from_body(
            [Cell::new(1, 1), Cell::new(2, 1), Cell::new(2, 2), Cell::new(1, 2)],
            Direction::Up,
        )
        .unwrap();
        let obs = observe(&snake, Cell::new(5, 5));
        assert_eq!(GreedyAgent.select_action(&obs), None);
    }
}
