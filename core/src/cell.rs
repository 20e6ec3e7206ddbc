use serde::{Deserialize, Serialize};

use crate::*;

/// Player-visible state of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellStatus {
    Hidden,
    Revealed,
    Flagged,
}

impl CellStatus {
    pub const fn is_hidden(self) -> bool {
        matches!(self, Self::Hidden)
    }
}

impl Default for CellStatus {
    fn default() -> Self {
        Self::Hidden
    }
}

/// One position of the board.
///
/// `neighbor_mines` is only meaningful for cells without a mine, and is fixed once mines are placed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    pub row: Coord,
    pub col: Coord,
    pub is_mine: bool,
    pub status: CellStatus,
    pub neighbor_mines: u8,
}

impl Cell {
    pub const fn new((row, col): Coord2) -> Self {
        Self {
            row,
            col,
            is_mine: false,
            status: CellStatus::Hidden,
            neighbor_mines: 0,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        (self.row, self.col)
    }

    /// Flagged without holding a mine, only conclusive once the game ended.
    pub const fn is_misplaced_flag(&self) -> bool {
        matches!(self.status, CellStatus::Flagged) && !self.is_mine
    }
}
