use core::num::Saturating;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Idle -> Playing
/// - Playing -> Won
/// - Playing -> Lost
/// - any -> Idle (reset)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    /// Board is empty, mines are placed by the first reveal
    Idle,
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }

    /// Only a reset is accepted once finished.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::Idle
    }
}

/// Owned, read-only copy of a session for the presentation layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub difficulty: Difficulty,
    pub status: GameStatus,
    pub elapsed: u32,
    pub flags_used: CellCount,
    pub mines_remaining: i32,
    pub triggered_mine: Option<Coord2>,
    pub board: Board,
}

/// One game at a time on a board it owns exclusively.
#[derive(Clone, Debug)]
pub struct Session<P = RandomPlacer> {
    difficulty: Difficulty,
    board: Board,
    status: GameStatus,
    elapsed: u32,
    flags_used: Saturating<CellCount>,
    triggered_mine: Option<Coord2>,
    placer: P,
}

impl<P: MinePlacer> Session<P> {
    pub fn new(difficulty: Difficulty, placer: P) -> Result<Self> {
        difficulty.validate()?;
        let board = Board::new(difficulty.rows, difficulty.cols)?;
        Ok(Self {
            difficulty,
            board,
            status: GameStatus::Idle,
            elapsed: 0,
            flags_used: Saturating(0),
            triggered_mine: None,
            placer,
        })
    }

    pub fn difficulty(&self) -> &Difficulty {
        &self.difficulty
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn cell(&self, coords: Coord2) -> Option<&Cell> {
        self.board.get(coords)
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    /// Ticks counted while playing.
    pub fn elapsed(&self) -> u32 {
        self.elapsed
    }

    pub fn flags_used(&self) -> CellCount {
        self.flags_used.0
    }

    /// Mines minus flags, negative when the player over-flags.
    pub fn mines_remaining(&self) -> i32 {
        i32::from(self.difficulty.mines) - i32::from(self.flags_used.0)
    }

    /// The mine whose reveal lost the game.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            difficulty: self.difficulty.clone(),
            status: self.status,
            elapsed: self.elapsed,
            flags_used: self.flags_used(),
            mines_remaining: self.mines_remaining(),
            triggered_mine: self.triggered_mine,
            board: self.board.clone(),
        }
    }

    /// Reveals a cell, placing the mines first if this is the opening move.
    pub fn on_reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if self.status.is_finished() {
            return Ok(RevealOutcome::NoChange);
        }

        if self.status.is_idle() {
            self.placer
                .place(&mut self.board, &self.difficulty, coords)?;
            self.status = GameStatus::Playing;
            log::debug!("Game started at {:?}", coords);
        }

        let outcome = self.board.reveal(coords)?;
        match outcome {
            RevealOutcome::HitMine => {
                self.triggered_mine = Some(coords);
                self.board.reveal_all_mines();
                self.end_game(false);
            }
            RevealOutcome::Revealed if self.board.is_cleared() => {
                self.board.flag_all_mines();
                self.flags_used = Saturating(self.difficulty.mines);
                self.end_game(true);
                return Ok(RevealOutcome::Won);
            }
            _ => {}
        }
        Ok(outcome)
    }

    /// Flags or unflags a cell, only while playing.
    pub fn on_flag_toggle(&mut self, coords: Coord2) -> Result<MarkOutcome> {
        let coords = self.board.validate_coords(coords)?;
        if !self.status.is_playing() {
            log::trace!("Ignored flag at {:?} while {:?}", coords, self.status);
            return Ok(MarkOutcome::NoChange);
        }

        let outcome = self.board.toggle_flag(coords)?;
        match outcome {
            MarkOutcome::Flagged => self.flags_used += 1,
            MarkOutcome::Unflagged => self.flags_used -= 1,
            MarkOutcome::NoChange => {}
        }
        Ok(outcome)
    }

    /// Starts over with `difficulty`; an invalid one leaves the session untouched.
    pub fn reset(&mut self, difficulty: Difficulty) -> Result<()> {
        difficulty.validate()?;
        let board = Board::new(difficulty.rows, difficulty.cols)?;
        log::debug!(
            "Reset to {} ({}x{}, {} mines)",
            difficulty.name,
            difficulty.rows,
            difficulty.cols,
            difficulty.mines
        );

        self.difficulty = difficulty;
        self.board = board;
        self.status = GameStatus::Idle;
        self.elapsed = 0;
        self.flags_used = Saturating(0);
        self.triggered_mine = None;
        Ok(())
    }

    /// Starts over with the current difficulty.
    pub fn restart(&mut self) -> Result<()> {
        self.reset(self.difficulty.clone())
    }

    /// Advances the timer by one unit, returns whether it was running.
    pub fn tick(&mut self) -> bool {
        if self.status.is_playing() {
            self.elapsed = self.elapsed.saturating_add(1);
            true
        } else {
            false
        }
    }

    /// Applies `ticks` timer ticks at once, returns how many counted.
    pub fn advance(&mut self, ticks: u32) -> u32 {
        if self.status.is_playing() {
            self.elapsed = self.elapsed.saturating_add(ticks);
            ticks
        } else {
            0
        }
    }

    fn end_game(&mut self, won: bool) {
        self.status = if won {
            GameStatus::Won
        } else {
            GameStatus::Lost
        };
        log::debug!("Game {:?} after {} ticks", self.status, self.elapsed);
    }
}

impl Session<RandomPlacer> {
    /// Session with a deterministic mine layout for `seed`.
    pub fn seeded(difficulty: Difficulty, seed: u64) -> Result<Self> {
        Self::new(difficulty, RandomPlacer::seeded(seed))
    }
}
