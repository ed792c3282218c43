use ndarray::Array2;
use rand::prelude::*;

use super::BoardGenerator;
use crate::board::Minefield;
use crate::types::{CellCount, ToNdIndex};
use crate::GameConfig;

/// Purely random layout: rejection-samples uniform coordinates until the
/// requested number of distinct mines has been placed. Retries stay cheap at
/// the mine densities of the supported difficulties.
///
/// The layout is fully determined by the seed, so callers wanting a fresh
/// board every time inject an entropy-derived seed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RandomBoardGenerator {
    seed: u64,
}

impl RandomBoardGenerator {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }
}

impl BoardGenerator for RandomBoardGenerator {
    fn generate(self, config: GameConfig) -> Minefield {
        let (rows, cols) = config.size();
        let mut mine_mask: Array2<bool> = Array2::default(config.size().to_nd_index());

        // config guarantees at least one safe cell, so this terminates
        let mut rng = SmallRng::seed_from_u64(self.seed);
        let mut placed: CellCount = 0;
        while placed < config.mines() {
            let coords = (rng.random_range(0..rows), rng.random_range(0..cols));
            let slot = &mut mine_mask[coords.to_nd_index()];
            if !*slot {
                *slot = true;
                placed += 1;
            }
        }

        let minefield = Minefield::from_mine_mask(&mine_mask);
        if minefield.mine_count() != config.mines() {
            log::warn!(
                "Generated minefield count mismatch, actual: {}, requested: {}",
                minefield.mine_count(),
                config.mines()
            );
        }
        minefield
    }
}
