use std::fmt;

use serde::{Deserialize, Serialize};

use super::gravity::Gravity;

pub const ROWS: usize = 6;
pub const COLS: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    fn symbol(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Red => 'R',
            Cell::Yellow => 'Y',
        }
    }
}

/// A cell coordinate. Row 0 is the top, column 0 is the left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Step by a signed offset, returning `None` when leaving the board.
    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Position> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        (row < ROWS && col < COLS).then_some(Position { row, col })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PlaceError {
    #[error("cell {0} is already occupied")]
    Occupied(Position),

    #[error("cell {0} is outside the board")]
    OutOfBounds(Position),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS],
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Board {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a specific position
    /// Row 0 is the top, row 5 is the bottom
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    pub fn at(&self, pos: Position) -> Cell {
        self.cells[pos.row][pos.col]
    }

    /// Claim an empty cell. Occupied cells are never overwritten.
    pub fn place(&mut self, pos: Position, cell: Cell) -> Result<(), PlaceError> {
        if pos.row >= ROWS || pos.col >= COLS {
            return Err(PlaceError::OutOfBounds(pos));
        }
        if self.cells[pos.row][pos.col] != Cell::Empty {
            return Err(PlaceError::Occupied(pos));
        }
        self.cells[pos.row][pos.col] = cell;
        Ok(())
    }

    /// Where a piece entering `line` would come to rest under `gravity`.
    pub fn landing_position(&self, line: usize, gravity: Gravity) -> Option<Position> {
        gravity.landing(self, line)
    }

    /// Check if a line (column or row, depending on gravity) accepts no more
    /// pieces. Out-of-range lines count as full.
    pub fn is_line_full(&self, line: usize, gravity: Gravity) -> bool {
        self.landing_position(line, gravity).is_none()
    }

    /// The edge opposite the gravity floor is fully occupied.
    pub fn is_entry_edge_full(&self, gravity: Gravity) -> bool {
        match gravity {
            Gravity::Down => (0..COLS).all(|col| self.cells[0][col] != Cell::Empty),
            Gravity::Up => (0..COLS).all(|col| self.cells[ROWS - 1][col] != Cell::Empty),
            Gravity::Left => (0..ROWS).all(|row| self.cells[row][COLS - 1] != Cell::Empty),
            Gravity::Right => (0..ROWS).all(|row| self.cells[row][0] != Cell::Empty),
        }
    }

    /// Check if every cell is occupied
    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&cell| cell != Cell::Empty)
    }

    pub fn piece_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    pub fn rows(&self) -> &[[Cell; COLS]; ROWS] {
        &self.cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.cells {
            let line: String = row
                .iter()
                .map(|cell| cell.symbol().to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{line}")?;
        }
        write!(f, "1 2 3 4 5 6 7")
    }
}
