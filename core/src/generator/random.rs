use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Rejection sampling over the whole board, the first revealed cell and its neighbors are never mined.
#[derive(Clone, Debug)]
pub struct RandomPlacer<R = SmallRng> {
    rng: R,
}

impl<R: Rng> RandomPlacer<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RandomPlacer<SmallRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MinePlacer for RandomPlacer<R> {
    fn place(&mut self, board: &mut Board, difficulty: &Difficulty, safe: Coord2) -> Result<()> {
        scatter_mines(board, difficulty, safe, &mut self.rng)
    }
}

pub(super) fn scatter_mines<R: Rng + ?Sized>(
    board: &mut Board,
    difficulty: &Difficulty,
    safe: Coord2,
    rng: &mut R,
) -> Result<()> {
    check_fresh_board(board, difficulty, safe)?;

    let (rows, cols) = board.size();
    let free_cells = board
        .total_cells()
        .saturating_sub(zone_size(safe, board.size()));
    if difficulty.mines > free_cells {
        log::warn!(
            "Cannot keep {:?} clear, requested {} mines but only fits {}",
            safe,
            difficulty.mines,
            free_cells
        );
        return Err(GameError::TooManyMines);
    }

    let mut draws: u32 = 0;
    while board.mine_count() < difficulty.mines {
        let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
        draws += 1;
        if is_adjacent_or_same(safe, coords) {
            continue;
        }
        board.lay_mine(coords);
    }
    board.finish_placement();

    log::debug!(
        "Placed {} mines around {:?} in {} draws",
        board.mine_count(),
        safe,
        draws
    );
    Ok(())
}
