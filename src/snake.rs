use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};
use std::ops::Index;

use crate::utils::Cell;

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// Action index -> direction. Index 0 is LEFT, 1 RIGHT, 2 UP, 3 DOWN.
pub const ACTIONS: [Direction; 4] = [
    Direction::Left,
    Direction::Right,
    Direction::Up,
    Direction::Down,
];

/// Cardinality of the agent's action space.
pub const ACTION_COUNT: usize = ACTIONS.len();

impl Direction {
    /// Returns the opposite direction (180°).
    pub fn opposite(&self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// (row, col) offset of one step in this direction.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// Resolves an action index through [`ACTIONS`]; out-of-range indices give `None`.
    pub fn from_action(index: usize) -> Option<Direction> {
        ACTIONS.get(index).copied()
    }

    pub fn action_index(&self) -> usize {
        match self {
            Direction::Left => 0,
            Direction::Right => 1,
            Direction::Up => 2,
            Direction::Down => 3,
        }
    }
}

/// The snake: ordered body (index 0 = head, last = tail) plus a per-cell
/// occupancy count kept in lock-step with the body so membership is O(1).
///
/// Counts rather than a plain set because `eat` duplicates the tail cell for
/// one tick.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Cell>,
    occupancy: HashMap<Cell, u32>,
    direction: Direction,
}

impl Default for Snake {
    fn default() -> Self {
        Self::new()
    }
}

impl Snake {
    pub const INITIAL_HEAD: Cell = Cell::new(1, 4);
    pub const INITIAL_LENGTH: usize = 4;
    pub const INITIAL_DIRECTION: Direction = Direction::Right;

    /// Creates a snake already in its starting layout.
    pub fn new() -> Snake {
        let mut snake = Snake {
            body: VecDeque::with_capacity(Self::INITIAL_LENGTH),
            occupancy: HashMap::new(),
            direction: Self::INITIAL_DIRECTION,
        };
        snake.reset();
        snake
    }

    /// Builds a snake from an explicit head-first body. Used by scripted setups.
    ///
    /// Returns `None` for an empty body.
    pub fn from_body(cells: impl IntoIterator<Item = Cell>, direction: Direction) -> Option<Snake> {
        let mut snake = Snake {
            body: VecDeque::new(),
            occupancy: HashMap::new(),
            direction,
        };
        for cell in cells {
            snake.push_back(cell);
        }
        if snake.body.is_empty() {
            return None;
        }
        Some(snake)
    }

    /// Head at (1, 4), three segments trailing to the left, heading RIGHT.
    pub fn reset(&mut self) {
        self.body.clear();
        self.occupancy.clear();
        let (dr, dc) = Self::INITIAL_DIRECTION.opposite().delta();
        for i in 0..Self::INITIAL_LENGTH as i32 {
            self.push_back(Cell::new(
                Self::INITIAL_HEAD.row + dr * i,
                Self::INITIAL_HEAD.col + dc * i,
            ));
        }
        self.direction = Self::INITIAL_DIRECTION;
    }

    /// Applies an action index. Absent, out-of-range and reversing actions
    /// leave the heading unchanged.
    pub fn turn(&mut self, action: Option<usize>) {
        let Some(next) = action.and_then(Direction::from_action) else {
            return;
        };
        if next == self.direction.opposite() {
            return;
        }
        self.direction = next;
    }

    /// Shifts the body one cell along the heading; length is unchanged.
    pub fn move_forward(&mut self) {
        let new_head = self.head().step(self.direction);
        self.push_front(new_head);
        self.pop_back();
    }

    /// If the head sits on `food`, duplicates the tail and returns true.
    /// The copy separates from the tail on the next `move_forward`.
    pub fn eat(&mut self, food: Cell) -> bool {
        if self.head() != food {
            return false;
        }
        let tail = self.tail();
        self.push_back(tail);
        true
    }

    /// Action indices whose step would not land on the segment right behind the head.
    pub fn available_directions(&self) -> Vec<usize> {
        let neck = self.body.get(1).copied();
        ACTIONS
            .iter()
            .enumerate()
            .filter(|(_, dir)| Some(self.head().step(**dir)) != neck)
            .map(|(index, _)| index)
            .collect()
    }

    /// Materialised set of every occupied cell, head included.
    pub fn occupied_cells(&self) -> HashSet<Cell> {
        self.occupancy.keys().copied().collect()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.occupancy.contains_key(&cell)
    }

    /// true if the head shares its cell with any other segment
    pub fn head_hits_body(&self) -> bool {
        self.occupancy.get(&self.head()).copied().unwrap_or(0) > 1
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.body.iter().copied()
    }

    fn push_front(&mut self, cell: Cell) {
        self.body.push_front(cell);
        *self.occupancy.entry(cell).or_insert(0) += 1;
    }

    fn push_back(&mut self, cell: Cell) {
        self.body.push_back(cell);
        *self.occupancy.entry(cell).or_insert(0) += 1;
    }

    fn pop_back(&mut self) {
        let Some(cell) = self.body.pop_back() else {
            return;
        };
        if let Some(count) = self.occupancy.get_mut(&cell) {
            *count -= 1;
            if *count == 0 {
                self.occupancy.remove(&cell);
            }
        }
    }
}

impl Index<usize> for Snake {
    type Output = Cell;

    fn index(&self, index: usize) -> &Cell {
        &self.body[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cells(snake: &Snake) -> Vec<Cell> {
        snake.iter().collect()
    }

    #[test]
    fn reset_layout() {
        let snake = Snake::new();
        assert_eq!(
            cells(&snake),
            vec![Cell::new(1, 4), Cell::new(1, 3), Cell::new(1, 2), Cell::new(1, 1)]
        );
        assert_eq!(snake.direction(), Direction::Right);
        assert_eq!(snake.occupied_cells().len(), 4);
    }

    #[test]
    fn action_table_is_fixed() {
        assert_eq!(Direction::from_action(0), Some(Direction::Left));
        assert_eq!(Direction::from_action(1), Some(Direction::Right));
        assert_eq!(Direction::from_action(2), Some(Direction::Up));
        assert_eq!(Direction::from_action(3), Some(Direction::Down));
        assert_eq!(Direction::from_action(4), None);
        for (i, dir) in ACTIONS.iter().enumerate() {
            assert_eq!(dir.action_index(), i);
        }
    }

    #[test]
    fn turn_ignores_none_invalid_and_reversal() {
        let mut snake = Snake::new();
        snake.turn(None);
        assert_eq!(snake.direction(), Direction::Right);
        snake.turn(Some(17));
        assert_eq!(snake.direction(), Direction::Right);
        snake.turn(Some(0)); // LEFT reverses RIGHT
        assert_eq!(snake.direction(), Direction::Right);
        snake.turn(Some(3));
        assert_eq!(snake.direction(), Direction::Down);
        snake.turn(Some(2)); // UP reverses DOWN
        assert_eq!(snake.direction(), Direction::Down);
    }

    #[test]
    fn turn_does_not_move() {
        let mut snake = Snake::new();
        snake.turn(Some(3));
        assert_eq!(snake.head(), Cell::new(1, 4));
    }

    #[test]
    fn move_shifts_body() {
        let mut snake = Snake::new();
        snake.move_forward();
        assert_eq!(
            cells(&snake),
            vec![Cell::new(1, 5), Cell::new(1, 4), Cell::new(1, 3), Cell::new(1, 2)]
        );
        assert!(!snake.contains(Cell::new(1, 1)));
        assert!(snake.contains(Cell::new(1, 5)));
    }

    #[test]
    fn eat_duplicates_tail_until_next_move() {
        let mut snake = Snake::new();
        assert!(!snake.eat(Cell::new(3, 3)));
        assert_eq!(snake.len(), 4);

        assert!(snake.eat(Cell::new(1, 4)));
        assert_eq!(snake.len(), 5);
        assert_eq!(snake[3], snake[4]);
        assert_eq!(snake.occupied_cells().len(), 4);

        snake.move_forward();
        assert_eq!(snake.len(), 5);
        assert_eq!(snake.occupied_cells().len(), 5);
        assert_eq!(snake.tail(), Cell::new(1, 1));
    }

    #[test]
    fn available_directions_exclude_neck() {
        let snake = Snake::new();
        // neck at (1,3) is LEFT of the head
        assert_eq!(snake.available_directions(), vec![1, 2, 3]);

        let single = Snake::from_body([Cell::new(2, 2)], Direction::Up).unwrap();
        assert_eq!(single.available_directions(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn head_hits_body_detects_overlap() {
        let coiled = Snake::from_body(
            [
                Cell::new(2, 2),
                Cell::new(2, 3),
                Cell::new(3, 3),
                Cell::new(3, 2),
                Cell::new(2, 2),
            ],
            Direction::Up,
        )
        .unwrap();
        assert!(coiled.head_hits_body());
        assert!(!Snake::new().head_hits_body());
    }

    #[test]
    fn from_body_rejects_empty() {
        assert!(Snake::from_body(Vec::<Cell>::new(), Direction::Up).is_none());
    }
}
