use alloc::vec::Vec;
use ndarray::Array2;
use smallvec::SmallVec;

use super::*;

/// Seeded uniform mine placement that excludes a safe zone around the
/// starting cell.
///
/// Draws without replacement from an explicit index pool, so generation
/// takes one pass regardless of density: no retry loops.
#[derive(Clone, Debug, PartialEq)]
pub struct RandomFieldGenerator {
    seed: u64,
    start: Pos,
    safe_zone: SafeZone,
}

impl RandomFieldGenerator {
    pub fn new(seed: u64, start: Pos, safe_zone: SafeZone) -> Self {
        Self {
            seed,
            start,
            safe_zone,
        }
    }

    /// Indices excluded from the pool under the given policy.
    fn excluded_indices(&self, zone: SafeZone, size: Pos) -> SmallVec<[usize; 9]> {
        let cols = size.1 as usize;
        let flatten = |pos: Pos| pos.0 as usize * cols + pos.1 as usize;

        match zone {
            SafeZone::None => SmallVec::new(),
            SafeZone::SeedOnly => SmallVec::from_elem(flatten(self.start), 1),
            SafeZone::Neighborhood => core::iter::once(self.start)
                .chain(neighbors(self.start, size))
                .map(flatten)
                .collect(),
        }
    }
}

impl FieldGenerator for RandomFieldGenerator {
    fn generate(self, config: GameConfig) -> MineField {
        use rand::prelude::*;

        let size = config.size();
        let total = config.total_cells() as usize;
        let mines = config.mines() as usize;
        let cols = size.1 as usize;

        // Shrink the safe zone until the pool can still hold every mine.
        // Seed-only always fits because a config never fills the board.
        let mut zone = self.safe_zone;
        let mut excluded = self.excluded_indices(zone, size);
        while total - excluded.len() < mines {
            zone = match zone {
                SafeZone::Neighborhood => SafeZone::SeedOnly,
                SafeZone::SeedOnly | SafeZone::None => SafeZone::None,
            };
            log::warn!(
                "safe zone too large for {} mines in {} cells, shrinking to {:?}",
                mines,
                total,
                zone
            );
            excluded = self.excluded_indices(zone, size);
        }

        let mut pool: Vec<usize> = (0..total)
            .filter(|idx| !excluded.contains(idx))
            .collect();

        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut mine_mask: Array2<bool> = Array2::default((size.0 as usize, size.1 as usize));
        for _ in 0..mines {
            let drawn = pool.swap_remove(rng.random_range(0..pool.len()));
            mine_mask[[drawn / cols, drawn % cols]] = true;
        }

        MineField::from_mask(mine_mask)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(size: Pos, mines: CellCount) -> GameConfig {
        GameConfig::new(size, mines).unwrap()
    }

    #[test]
    fn places_exactly_the_requested_mines() {
        for seed in 0..20 {
            let field = RandomFieldGenerator::new(seed, (4, 4), SafeZone::Neighborhood)
                .generate(config((8, 8), 10));
            assert_eq!(field.mine_count(), 10);
        }
    }

    #[test]
    fn neighborhood_zone_keeps_start_area_clear() {
        for seed in 0..20 {
            let start = (3, 5);
            let field = RandomFieldGenerator::new(seed, start, SafeZone::Neighborhood)
                .generate(config((8, 8), 10));

            assert!(!field.contains_mine(start));
            assert_eq!(field.adjacent_mines(start), 0);
            for pos in neighbors(start, field.size()) {
                assert!(!field.contains_mine(pos));
            }
        }
    }

    #[test]
    fn dense_board_falls_back_to_seed_only() {
        // A 3x3 board with 7 mines cannot spare a 3x3 safe zone, but the
        // seed cell itself must still never hold a mine.
        for seed in 0..20 {
            let field = RandomFieldGenerator::new(seed, (1, 1), SafeZone::Neighborhood)
                .generate(config((3, 3), 7));

            assert_eq!(field.mine_count(), 7);
            assert!(!field.contains_mine((1, 1)));
        }
    }

    #[test]
    fn corner_seed_excludes_only_existing_neighbors() {
        for seed in 0..20 {
            let field = RandomFieldGenerator::new(seed, (0, 0), SafeZone::Neighborhood)
                .generate(config((5, 5), 12));

            assert!(!field.contains_mine((0, 0)));
            assert_eq!(field.adjacent_mines((0, 0)), 0);
        }
    }

    #[test]
    fn same_seed_reproduces_the_same_field() {
        let make = || {
            RandomFieldGenerator::new(42, (2, 2), SafeZone::Neighborhood)
                .generate(config((9, 9), 15))
        };
        assert_eq!(make(), make());
    }

    #[test]
    fn zero_mines_yields_an_empty_field() {
        let field =
            RandomFieldGenerator::new(7, (0, 0), SafeZone::None).generate(config((4, 4), 0));
        assert_eq!(field.mine_count(), 0);
        assert_eq!(field.safe_cell_count(), 16);
    }
}
