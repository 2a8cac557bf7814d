use serde::{Deserialize, Serialize};

use super::board::{Board, Cell, Position};
use super::player::Player;

/// Pieces in a row needed to win.
pub const WIN_LENGTH: usize = 4;

/// The four lines a run can lie on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
    /// Bottom-left to top-right, /
    DiagonalUp,
    /// Top-left to bottom-right, \
    DiagonalDown,
}

impl Axis {
    /// Evaluation order when several axes complete at once.
    pub const ORDER: [Axis; 4] = [
        Axis::Horizontal,
        Axis::Vertical,
        Axis::DiagonalUp,
        Axis::DiagonalDown,
    ];

    /// (row, col) step of the axis' positive sense.
    fn step(self) -> (isize, isize) {
        match self {
            Axis::Horizontal => (0, 1),
            Axis::Vertical => (1, 0),
            Axis::DiagonalUp => (-1, 1),
            Axis::DiagonalDown => (1, 1),
        }
    }
}

/// A completed run of at least [`WIN_LENGTH`] pieces.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinLine {
    pub player: Player,
    pub axis: Axis,
    /// The placed cell first, then the positive walk, then the negative walk.
    pub cells: Vec<Position>,
}

impl WinLine {
    pub fn contains(&self, pos: Position) -> bool {
        self.cells.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Check if the piece at `pos` completes a run. Returns the full run on the
/// first qualifying axis.
pub fn find_win(board: &Board, pos: Position) -> Option<WinLine> {
    let player = Player::from_cell(board.at(pos))?;
    let cell = player.to_cell();

    Axis::ORDER.into_iter().find_map(|axis| {
        let cells = run_through(board, pos, cell, axis);
        (cells.len() >= WIN_LENGTH).then(|| WinLine {
            player,
            axis,
            cells,
        })
    })
}

/// Collect `origin` plus every contiguous `cell` along `axis` in both senses.
fn run_through(board: &Board, origin: Position, cell: Cell, axis: Axis) -> Vec<Position> {
    let (d_row, d_col) = axis.step();
    let mut cells = vec![origin];
    for (dr, dc) in [(d_row, d_col), (-d_row, -d_col)] {
        let mut next = origin.offset(dr, dc);
        while let Some(pos) = next.filter(|&p| board.at(p) == cell) {
            cells.push(pos);
            next = pos.offset(dr, dc);
        }
    }
    cells
}
