use std::fmt;

use serde::{Deserialize, Serialize};

use super::board::{Board, Cell, Position, COLS, ROWS};

/// The direction new pieces fall towards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gravity {
    #[default]
    Down,
    Up,
    Left,
    Right,
}

impl Gravity {
    pub const ALL: [Gravity; 4] = [Gravity::Down, Gravity::Up, Gravity::Left, Gravity::Right];

    /// Vertical gravity selects columns, horizontal gravity selects rows.
    pub fn is_vertical(self) -> bool {
        matches!(self, Gravity::Down | Gravity::Up)
    }

    /// Number of selectable lines under this gravity.
    pub fn line_count(self) -> usize {
        if self.is_vertical() {
            COLS
        } else {
            ROWS
        }
    }

    /// Cell where a piece entering `line` settles: the first empty cell
    /// found scanning from the floor inward. `None` when the line is full
    /// or out of range.
    pub fn landing(self, board: &Board, line: usize) -> Option<Position> {
        if line >= self.line_count() {
            return None;
        }
        let empty = |pos: &Position| board.at(*pos) == Cell::Empty;
        match self {
            Gravity::Down => (0..ROWS).rev().map(|row| Position::new(row, line)).find(empty),
            Gravity::Up => (0..ROWS).map(|row| Position::new(row, line)).find(empty),
            Gravity::Left => (0..COLS).map(|col| Position::new(line, col)).find(empty),
            Gravity::Right => (0..COLS).rev().map(|col| Position::new(line, col)).find(empty),
        }
    }

    /// The cell of `line` on the edge pieces enter from, used by the UI to
    /// start a fall animation.
    pub fn entry_cell(self, line: usize) -> Position {
        match self {
            Gravity::Down => Position::new(0, line),
            Gravity::Up => Position::new(ROWS - 1, line),
            Gravity::Left => Position::new(line, COLS - 1),
            Gravity::Right => Position::new(line, 0),
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            Gravity::Down => "↓",
            Gravity::Up => "↑",
            Gravity::Left => "←",
            Gravity::Right => "→",
        }
    }
}

impl fmt::Display for Gravity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Gravity::Down => "down",
            Gravity::Up => "up",
            Gravity::Left => "left",
            Gravity::Right => "right",
        };
        f.write_str(name)
    }
}
