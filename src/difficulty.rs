use serde::{Deserialize, Serialize};

use crate::*;

/// Bounds applied to free-form board dimensions.
pub const MIN_DIMENSION: Coord = 5;
pub const MAX_DIMENSION: Coord = 18;

/// A named or custom board setup the difficulty selector hands to the
/// engine on start or restart.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Difficulty {
    pub size: Pos,
    pub mines: CellCount,
}

impl Difficulty {
    pub const DEFAULT_PRESETS: &'static [(&'static str, Difficulty)] = &[
        ("Beginner", Difficulty::beginner()),
        ("Intermediate", Difficulty::intermediate()),
        ("Expert", Difficulty::expert()),
    ];

    pub const fn beginner() -> Self {
        Self {
            size: (8, 8),
            mines: 10,
        }
    }

    pub const fn intermediate() -> Self {
        Self {
            size: (16, 16),
            mines: 40,
        }
    }

    pub const fn expert() -> Self {
        Self {
            size: (16, 30),
            mines: 99,
        }
    }

    /// Free-form entry: dimensions clamp to 5-18 and the mine count to at
    /// most a third of the board, so the result is always a valid config.
    pub fn custom(rows: Coord, cols: Coord, mines: CellCount) -> Self {
        let rows = rows.clamp(MIN_DIMENSION, MAX_DIMENSION);
        let cols = cols.clamp(MIN_DIMENSION, MAX_DIMENSION);
        let mines = mines.clamp(1, area(rows, cols) / 3);
        Self {
            size: (rows, cols),
            mines,
        }
    }

    pub const fn config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size, self.mines)
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::beginner()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn custom_clamps_dimensions() {
        let difficulty = Difficulty::custom(2, 40, 5);
        assert_eq!(difficulty.size, (5, 18));
    }

    #[test]
    fn custom_caps_mines_at_a_third_of_the_board() {
        let difficulty = Difficulty::custom(9, 9, 500);
        assert_eq!(difficulty.mines, 27);
    }

    #[test]
    fn custom_keeps_at_least_one_mine() {
        let difficulty = Difficulty::custom(8, 8, 0);
        assert_eq!(difficulty.mines, 1);
    }

    #[test]
    fn presets_produce_valid_configs() {
        for (_, difficulty) in Difficulty::DEFAULT_PRESETS {
            let config = difficulty.config();
            assert!(GameConfig::new(config.size(), config.mines()).is_ok());
        }
    }

    #[test]
    fn default_matches_beginner() {
        assert_eq!(Difficulty::default(), Difficulty::beginner());
        assert_eq!(Difficulty::beginner().config().safe_cells(), 54);
    }
}
