use std::io::Write;

use crate::grid::{CellValue, StateGrid};

/// Passive display sink. Receives the numeric grid and nothing else.
pub trait Renderer {
    fn draw(&mut self, grid: &StateGrid);
}

/// Draws the board as text, one character per cell.
pub struct AsciiRenderer<W: Write> {
    out: W,
}

impl<W: Write> AsciiRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn glyph(value: f32) -> char {
        match CellValue::from_value(value) {
            Some(CellValue::Wall) => '#',
            Some(CellValue::Earth) => '.',
            Some(CellValue::Body) => 'o',
            Some(CellValue::Head) => '@',
            Some(CellValue::Food) => '*',
            None => '?',
        }
    }
}

impl<W: Write> Renderer for AsciiRenderer<W> {
    fn draw(&mut self, grid: &StateGrid) {
        let mut frame = String::new();
        for row in grid.values().rows() {
            frame.extend(row.iter().map(|&v| Self::glyph(v)));
            frame.push('\n');
        }
        frame.push('\n');
        // a broken sink must not stop the simulation
        let _ = self.out.write_all(frame.as_bytes());
        let _ = self.out.flush();
    }
}
