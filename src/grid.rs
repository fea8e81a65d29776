//! Numeric view of the board consumed by agents and renderers.
//!
//! The grid is (N+2)x(N+2) with the wall ring written once into a template;
//! each request copies the template and paints food, body and head over the
//! playable interior.

use ndarray::{Array2, Array3, Axis};

use crate::border::Border;
use crate::food::Food;
use crate::snake::Snake;
use crate::utils::Cell;

/// Observation tensor laid out as height x width x 1 channel.
pub type Observation = Array3<f32>;

/// Symbolic cell values written into the state grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellValue {
    Earth,
    Head,
    Body,
    Food,
    Wall,
}

impl CellValue {
    pub fn value(self) -> f32 {
        match self {
            CellValue::Earth => 0.0,
            CellValue::Head => 1.0,
            CellValue::Body => -1.0,
            CellValue::Food => 2.0,
            CellValue::Wall => -2.0,
        }
    }

    /// Inverse of [`CellValue::value`]; unknown numbers give `None`.
    pub fn from_value(v: f32) -> Option<CellValue> {
        [
            CellValue::Earth,
            CellValue::Head,
            CellValue::Body,
            CellValue::Food,
            CellValue::Wall,
        ]
        .into_iter()
        .find(|c| c.value() == v)
    }
}

/// Snapshot of the board, indexed `[row, col]`.
#[derive(Debug, Clone, PartialEq)]
pub struct StateGrid {
    cells: Array2<f32>,
}

impl StateGrid {
    pub fn get(&self, cell: Cell) -> Option<CellValue> {
        if cell.row < 0 || cell.col < 0 {
            return None;
        }
        self.cells
            .get((cell.row as usize, cell.col as usize))
            .and_then(|&v| CellValue::from_value(v))
    }

    pub fn values(&self) -> &Array2<f32> {
        &self.cells
    }

    pub fn dim(&self) -> (usize, usize) {
        self.cells.dim()
    }

    /// Reshapes into the height x width x 1 tensor handed to agents.
    pub fn into_observation(self) -> Observation {
        self.cells.insert_axis(Axis(2))
    }
}

/// Builds state grids for one board size.
#[derive(Debug, Clone)]
pub struct GridPainter {
    border: Border,
    template: Array2<f32>,
}

impl GridPainter {
    pub fn new(border: Border) -> Self {
        let side = border.full_size();
        let last = side - 1;
        let mut template = Array2::from_elem((side, side), CellValue::Earth.value());
        let wall = CellValue::Wall.value();
        template.row_mut(0).fill(wall);
        template.row_mut(last).fill(wall);
        template.column_mut(0).fill(wall);
        template.column_mut(last).fill(wall);
        Self { border, template }
    }

    /// Fresh grid for the given snake and food. Cells outside the playable
    /// region are never painted, so the wall ring stays intact even when the
    /// head has just crashed into it.
    pub fn paint(&self, snake: &Snake, food: &Food) -> StateGrid {
        let mut cells = self.template.clone();
        let mut put = |cell: Cell, value: CellValue| {
            if self.border.is_inside(cell) {
                cells[(cell.row as usize, cell.col as usize)] = value.value();
            }
        };
        put(food.position, CellValue::Food);
        for segment in snake.iter() {
            put(segment, CellValue::Body);
        }
        put(snake.head(), CellValue::Head);
        StateGrid { cells }
    }
}
