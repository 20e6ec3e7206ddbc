use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use super::*;

/// Lays a predetermined set of mines, ignoring where the first reveal lands.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedPlacer {
    mines: Vec<Coord2>,
}

impl FixedPlacer {
    pub fn new(mines: impl IntoIterator<Item = Coord2>) -> Self {
        Self {
            mines: mines.into_iter().collect(),
        }
    }

    pub fn mines(&self) -> &[Coord2] {
        &self.mines
    }
}

impl MinePlacer for FixedPlacer {
    fn place(&mut self, board: &mut Board, difficulty: &Difficulty, safe: Coord2) -> Result<()> {
        check_fresh_board(board, difficulty, safe)?;
        for &coords in &self.mines {
            board.validate_coords(coords)?;
        }

        let mut scratch = board.clone();
        for &coords in &self.mines {
            scratch.lay_mine(coords);
        }
        if scratch.mine_count() != difficulty.mines {
            return Err(GameError::MineCountMismatch);
        }
        scratch.finish_placement();

        log::debug!("Placed fixed layout of {} mines", scratch.mine_count());
        *board = scratch;
        Ok(())
    }
}
