use alloc::vec;
use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular grid of cells, indexed by `(row, col)`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    mines_placed: bool,
}

impl Board {
    /// Empty board: every cell hidden, without mine, and with a zero count.
    pub fn new(rows: Coord, cols: Coord) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(GameError::InvalidDimensions);
        }

        let shape = (usize::from(rows), usize::from(cols));
        let cells = Array2::from_shape_fn(shape, |(row, col)| {
            Cell::new((row as Coord, col as Coord))
        });
        Ok(Self {
            cells,
            mine_count: 0,
            mines_placed: false,
        })
    }

    pub fn size(&self) -> Coord2 {
        let (rows, cols) = self.cells.dim();
        (rows as Coord, cols as Coord)
    }

    pub fn rows(&self) -> Coord {
        self.size().0
    }

    pub fn cols(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (rows, cols) = self.size();
        mult(rows, cols)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Whether placement already ran on this board, even if it placed zero mines.
    pub fn has_mines_placed(&self) -> bool {
        self.mines_placed
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if in_bounds(coords, self.size()) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.cells.get(coords.to_nd_index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Cells grouped by row, top to bottom.
    pub fn iter_rows(&self) -> impl Iterator<Item = impl Iterator<Item = &Cell>> {
        self.cells.outer_iter().map(|row| row.into_iter())
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Number of mines among the up-to-8 neighbors of `coords`.
    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        self.cells
            .iter_neighbor_cells(coords)
            .filter(|cell| cell.is_mine)
            .count() as u8
    }

    pub fn flagged_count(&self) -> CellCount {
        self.count_where(|cell| cell.status == CellStatus::Flagged)
    }

    /// Cells without a mine that are still hidden, zero means the board is cleared.
    pub fn hidden_safe_count(&self) -> CellCount {
        self.count_where(|cell| !cell.is_mine && cell.status.is_hidden())
    }

    pub fn is_cleared(&self) -> bool {
        self.hidden_safe_count() == 0
    }

    /// Flags placed on cells without a mine.
    pub fn misplaced_flags(&self) -> impl Iterator<Item = Coord2> {
        self.cells
            .iter()
            .filter(|cell| cell.is_misplaced_flag())
            .map(Cell::coords)
    }

    /// Places a mine at `coords`, returns `false` if there already was one.
    pub(crate) fn lay_mine(&mut self, coords: Coord2) -> bool {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.is_mine {
            return false;
        }
        cell.is_mine = true;
        self.mine_count += 1;
        true
    }

    /// Fills in every neighbor count, must run once after the last mine is laid.
    pub(crate) fn finish_placement(&mut self) {
        let counts = Array2::from_shape_fn(self.cells.dim(), |(row, col)| {
            let coords = (row as Coord, col as Coord);
            if self.cells[coords.to_nd_index()].is_mine {
                0
            } else {
                self.adjacent_mine_count(coords)
            }
        });
        self.cells
            .zip_mut_with(&counts, |cell, &count| cell.neighbor_mines = count);
        self.mines_placed = true;
    }

    /// Reveals `coords`, flooding through cells without adjacent mines.
    ///
    /// Anything but a hidden cell is left as is. Never reports [`RevealOutcome::Won`], winning is
    /// decided by the session.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        if !cell.status.is_hidden() {
            return Ok(RevealOutcome::NoChange);
        }

        if cell.is_mine {
            cell.status = CellStatus::Revealed;
            log::debug!("Revealed mine at {:?}", coords);
            return Ok(RevealOutcome::HitMine);
        }

        let opened = self.flood_reveal(coords);
        log::debug!("Revealed {} cell(s) from {:?}", opened, coords);
        Ok(RevealOutcome::Revealed)
    }

    fn flood_reveal(&mut self, start: Coord2) -> CellCount {
        let mut opened = 0;
        let mut to_visit = vec![start];

        while let Some(coords) = to_visit.pop() {
            let cell = &mut self.cells[coords.to_nd_index()];
            if !cell.status.is_hidden() {
                continue;
            }

            cell.status = CellStatus::Revealed;
            opened += 1;
            let count = cell.neighbor_mines;
            log::trace!("Flood opened cell at {:?}, mine count: {}", coords, count);

            if count == 0 {
                to_visit.extend(
                    self.cells
                        .iter_neighbor_cells_with_index(coords)
                        .filter(|(_, neighbor)| neighbor.status.is_hidden())
                        .map(|(pos, _)| pos),
                );
            }
        }

        opened
    }

    /// Switches a cell between hidden and flagged, revealed cells are left alone.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        Ok(match cell.status {
            CellStatus::Hidden => {
                cell.status = CellStatus::Flagged;
                MarkOutcome::Flagged
            }
            CellStatus::Flagged => {
                cell.status = CellStatus::Hidden;
                MarkOutcome::Unflagged
            }
            CellStatus::Revealed => MarkOutcome::NoChange,
        })
    }

    /// Shows every mine on the board, flagged ones included.
    pub fn reveal_all_mines(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine) {
            cell.status = CellStatus::Revealed;
        }
    }

    /// Marks every mine as flagged, regardless of what the player flagged.
    pub fn flag_all_mines(&mut self) {
        for cell in self.cells.iter_mut().filter(|cell| cell.is_mine) {
            cell.status = CellStatus::Flagged;
        }
    }

    fn count_where(&self, predicate: impl Fn(&Cell) -> bool) -> CellCount {
        self.cells.iter().filter(|&cell| predicate(cell)).count() as CellCount
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

/// Empty `rows` x `cols` board.
pub fn new_board(rows: Coord, cols: Coord) -> Result<Board> {
    Board::new(rows, cols)
}

/// Reveals `coords` on `board`, returning the updated board and whether a mine exploded.
pub fn reveal(mut board: Board, coords: Coord2) -> Result<(Board, bool)> {
    let outcome = board.reveal(coords)?;
    Ok((board, outcome.exploded()))
}

/// Toggles the flag at `coords` on `board`.
pub fn toggle_flag(mut board: Board, coords: Coord2) -> Result<Board> {
    board.toggle_flag(coords)?;
    Ok(board)
}
