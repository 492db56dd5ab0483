use serde::{Deserialize, Serialize};

/// Player-visible state of one grid cell.
///
/// Mine membership is only observable through the `Mine` variant, which
/// appears when the board is force-revealed at game end. During play a mine
/// looks like any other `Hidden` or `Flagged` cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellState {
    Hidden,
    Flagged,
    /// Revealed safe cell carrying its adjacent-mine count (0-8).
    Revealed(u8),
    /// Revealed mine, shown only once the game has ended.
    Mine,
}

impl CellState {
    pub const fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed(_) | Self::Mine)
    }

    pub const fn is_flagged(self) -> bool {
        matches!(self, Self::Flagged)
    }

    /// Revealed with no adjacent mines; the center of a flood-fill region.
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Revealed(0))
    }
}

impl Default for CellState {
    fn default() -> Self {
        Self::Hidden
    }
}
