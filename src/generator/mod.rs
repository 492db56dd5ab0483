use crate::*;
pub use random::*;

mod random;

pub trait FieldGenerator {
    fn generate(self, config: GameConfig) -> MineField;
}

/// How much of the board around the starting cell is kept mine-free.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SafeZone {
    /// No exclusion, the starting cell may be a mine.
    None,
    /// Only the starting cell is excluded.
    SeedOnly,
    /// The starting cell and its up-to-8 neighbors are excluded, so the
    /// first reveal always opens a flood-fill region when it fits.
    Neighborhood,
}
