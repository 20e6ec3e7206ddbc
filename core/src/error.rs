use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must have at least one row and one column")]
    InvalidDimensions,
    #[error("Too many mines to leave the first cell and its neighbors clear")]
    TooManyMines,
    #[error("Board shape does not match the difficulty")]
    DimensionMismatch,
    #[error("Mine layout does not hold the requested number of mines")]
    MineCountMismatch,
    #[error("Mines were already placed on this board")]
    MinesAlreadyPlaced,
}

pub type Result<T> = core::result::Result<T, GameError>;
