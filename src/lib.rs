#![no_std]

extern crate alloc;

use core::ops::Index;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

pub use cell::*;
pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod cell;
mod difficulty;
mod engine;
mod error;
mod generator;
mod types;

/// Board shape plus how many mines it holds, validated at construction.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    size: Pos,
    mines: CellCount,
}

impl GameConfig {
    /// Requires `rows, cols >= 1` and `0 <= mines < rows * cols`, so at
    /// least one safe cell always exists.
    pub fn new(size: Pos, mines: CellCount) -> Result<Self> {
        if size.0 == 0 || size.1 == 0 || mines >= area(size.0, size.1) {
            return Err(GameError::InvalidConfig);
        }
        Ok(Self { size, mines })
    }

    /// Skips validation; for configurations known valid by construction,
    /// such as the difficulty presets.
    pub const fn new_unchecked(size: Pos, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub const fn size(&self) -> Pos {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        area(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}

/// Immutable mine layout: the mask plus per-cell adjacency counts, both
/// fixed once the field is materialized.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MineField {
    mine_mask: Array2<bool>,
    adjacency: Array2<u8>,
    mine_count: CellCount,
}

impl MineField {
    pub fn from_mask(mine_mask: Array2<bool>) -> Self {
        let mine_count = mine_mask
            .iter()
            .filter(|&&is_mine| is_mine)
            .count()
            .try_into()
            .unwrap();

        let dim = mine_mask.dim();
        let size: Pos = (dim.0.try_into().unwrap(), dim.1.try_into().unwrap());
        let adjacency = Array2::from_shape_fn(dim, |(row, col)| {
            let pos = (row as Coord, col as Coord);
            neighbors(pos, size)
                .filter(|&adjacent| mine_mask[adjacent.to_nd_index()])
                .count() as u8
        });

        Self {
            mine_mask,
            adjacency,
            mine_count,
        }
    }

    pub fn from_mine_positions(size: Pos, mine_positions: &[Pos]) -> Result<Self> {
        let mut mine_mask: Array2<bool> =
            Array2::default((size.0 as usize, size.1 as usize));

        for &pos in mine_positions {
            if pos.0 >= size.0 || pos.1 >= size.1 {
                return Err(GameError::InvalidCoords);
            }
            mine_mask[pos.to_nd_index()] = true;
        }

        Ok(Self::from_mask(mine_mask))
    }

    pub fn validate_pos(&self, pos: Pos) -> Result<Pos> {
        let size = self.size();
        if pos.0 < size.0 && pos.1 < size.1 {
            Ok(pos)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    pub fn size(&self) -> Pos {
        let dim = self.mine_mask.dim();
        (dim.0.try_into().unwrap(), dim.1.try_into().unwrap())
    }

    pub fn total_cells(&self) -> CellCount {
        self.mine_mask.len().try_into().unwrap()
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, pos: Pos) -> bool {
        self[pos]
    }

    pub fn adjacent_mines(&self, pos: Pos) -> u8 {
        self.adjacency[pos.to_nd_index()]
    }
}

impl Index<Pos> for MineField {
    type Output = bool;

    fn index(&self, pos: Pos) -> &Self::Output {
        &self.mine_mask[pos.to_nd_index()]
    }
}
