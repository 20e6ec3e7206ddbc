use alloc::borrow::Cow;
use serde::{Deserialize, Serialize};

use crate::*;

/// Board dimensions and mine count for one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Difficulty {
    pub name: Cow<'static, str>,
    pub rows: Coord,
    pub cols: Coord,
    pub mines: CellCount,
}

impl Difficulty {
    pub const BEGINNER: Self = Self::new_unchecked("Beginner", 9, 9, 10);
    pub const INTERMEDIATE: Self = Self::new_unchecked("Intermediate", 16, 16, 40);
    pub const EXPERT: Self = Self::new_unchecked("Expert", 16, 30, 99);

    pub const PRESETS: [Self; 3] = [Self::BEGINNER, Self::INTERMEDIATE, Self::EXPERT];

    const fn new_unchecked(name: &'static str, rows: Coord, cols: Coord, mines: CellCount) -> Self {
        Self {
            name: Cow::Borrowed(name),
            rows,
            cols,
            mines,
        }
    }

    /// Builds a difficulty, rejecting any that could leave no room for mines around a first reveal.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        rows: Coord,
        cols: Coord,
        mines: CellCount,
    ) -> Result<Self> {
        let difficulty = Self {
            name: name.into(),
            rows,
            cols,
            mines,
        };
        difficulty.validate()?;
        Ok(difficulty)
    }

    pub fn custom(rows: Coord, cols: Coord, mines: CellCount) -> Result<Self> {
        Self::new("Custom", rows, cols, mines)
    }

    /// Case-insensitive lookup among [`Difficulty::PRESETS`].
    pub fn preset(name: &str) -> Option<Self> {
        Self::PRESETS
            .into_iter()
            .find(|preset| preset.name.eq_ignore_ascii_case(name))
    }

    pub const fn size(&self) -> Coord2 {
        (self.rows, self.cols)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.rows, self.cols)
    }

    /// Most mines a board of this size can hold wherever the first reveal lands.
    pub const fn max_mines(&self) -> CellCount {
        self.total_cells()
            .saturating_sub(max_zone_size(self.size()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.rows == 0 || self.cols == 0 {
            return Err(GameError::InvalidDimensions);
        }
        if self.mines > self.max_mines() {
            log::warn!(
                "Rejected difficulty {:?}, requested {} mines but only fits {}",
                self.name,
                self.mines,
                self.max_mines()
            );
            return Err(GameError::TooManyMines);
        }
        Ok(())
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::BEGINNER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_are_valid() {
        for preset in Difficulty::PRESETS {
            assert_eq!(preset.validate(), Ok(()));
        }
        assert_eq!(Difficulty::EXPERT.size(), (16, 30));
        assert_eq!(Difficulty::EXPERT.total_cells(), 480);
    }

    #[test]
    fn preset_lookup_ignores_case() {
        assert_eq!(Difficulty::preset("expert"), Some(Difficulty::EXPERT));
        assert_eq!(Difficulty::preset("BEGINNER"), Some(Difficulty::BEGINNER));
        assert_eq!(Difficulty::preset("nightmare"), None);
    }

    #[test]
    fn custom_rejects_zero_dimensions() {
        assert_eq!(
            Difficulty::custom(0, 5, 1),
            Err(GameError::InvalidDimensions)
        );
        assert_eq!(
            Difficulty::custom(5, 0, 1),
            Err(GameError::InvalidDimensions)
        );
    }

    #[test]
    fn custom_leaves_room_for_safe_zone() {
        // 3x3 safe zone on a 4x4 board leaves 7 cells
        assert!(Difficulty::custom(4, 4, 7).is_ok());
        assert_eq!(Difficulty::custom(4, 4, 8), Err(GameError::TooManyMines));
        // a single row only ever clears 3 cells
        assert!(Difficulty::custom(1, 5, 2).is_ok());
        assert_eq!(Difficulty::custom(1, 5, 3), Err(GameError::TooManyMines));
    }

    #[test]
    fn zero_mines_is_allowed() {
        let difficulty = Difficulty::custom(1, 1, 0).unwrap();
        assert_eq!(difficulty.max_mines(), 0);
    }
}
