use crate::utils::Cell;

/// Playable region of an (N+2)x(N+2) board. Rows/columns 0 and N+1 are wall.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Border {
    pub size: usize,
}

impl Border {
    pub fn new(size: usize) -> Self {
        Self { size }
    }

    /// Side length of the board including both wall rows.
    pub fn full_size(&self) -> usize {
        self.size + 2
    }

    /// true if the cell lies in rows/columns [1, N]
    pub fn is_inside(&self, cell: Cell) -> bool {
        let n = self.size as i32;
        (1..=n).contains(&cell.row) && (1..=n).contains(&cell.col)
    }

    /// true if the cell is one of the wall cells around the playable region
    pub fn is_wall(&self, cell: Cell) -> bool {
        let last = self.size as i32 + 1;
        let on_board = (0..=last).contains(&cell.row) && (0..=last).contains(&cell.col);
        on_board && !self.is_inside(cell)
    }

    /// Every playable cell in row-major order.
    pub fn playable_cells(&self) -> impl Iterator<Item = Cell> + use<> {
        let n = self.size as i32;
        (1..=n).flat_map(move |row| (1..=n).map(move |col| Cell::new(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inside_excludes_walls() {
        let b = Border::new(5);
        assert!(b.is_inside(Cell::new(1, 1)));
        assert!(b.is_inside(Cell::new(5, 5)));
        assert!(!b.is_inside(Cell::new(0, 3)));
        assert!(!b.is_inside(Cell::new(3, 6)));
        assert!(!b.is_inside(Cell::new(-1, 2)));
    }

    #[test]
    fn walls_are_the_ring() {
        let b = Border::new(3);
        assert!(b.is_wall(Cell::new(0, 0)));
        assert!(b.is_wall(Cell::new(4, 2)));
        assert!(!b.is_wall(Cell::new(2, 2)));
        assert!(!b.is_wall(Cell::new(5, 5)));
    }

    #[test]
    fn playable_cells_row_major() {
        let cells: Vec<Cell> = Border::new(2).playable_cells().collect();
        assert_eq!(
            cells,
            vec![Cell::new(1, 1), Cell::new(1, 2), Cell::new(2, 1), Cell::new(2, 2)]
        );
        assert_eq!(Border::new(7).playable_cells().count(), 49);
    }
}
