use crate::*;
pub use fixed::*;
pub use random::*;

mod fixed;
mod random;

/// Lays the mines of a fresh board once the first revealed cell is known.
pub trait MinePlacer {
    fn place(&mut self, board: &mut Board, difficulty: &Difficulty, safe: Coord2) -> Result<()>;
}

/// Places `difficulty.mines` mines at random on `board`, keeping `safe` and its neighbors clear.
pub fn place_mines<R: rand::Rng + ?Sized>(
    mut board: Board,
    difficulty: &Difficulty,
    safe: Coord2,
    rng: &mut R,
) -> Result<Board> {
    random::scatter_mines(&mut board, difficulty, safe, rng)?;
    Ok(board)
}

/// Checks shared by every placer before it touches the board.
fn check_fresh_board(board: &Board, difficulty: &Difficulty, safe: Coord2) -> Result<()> {
    if board.has_mines_placed() {
        return Err(GameError::MinesAlreadyPlaced);
    }
    if board.size() != difficulty.size() {
        return Err(GameError::DimensionMismatch);
    }
    board.validate_coords(safe)?;
    Ok(())
}
