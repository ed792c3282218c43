#![no_std]

extern crate alloc;

use serde::{Deserialize, Serialize};

pub use board::{Minefield, Square};
pub use cell::CellView;
pub use error::{GameError, Result};
pub use generator::{BoardGenerator, RandomBoardGenerator};
pub use session::{ClickOutcome, FlagOutcome, GameSession, GameStatus};
pub use types::{CellCount, Coord, Coord2};

mod board;
mod cell;
mod error;
mod generator;
mod reveal;
mod session;
mod types;

use types::cell_product;

/// Board dimensions and mine count of one game. Constructing a config
/// validates it, so generation downstream can no longer fail.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

impl GameConfig {
    /// Validates `(rows, cols)` and the mine count: both dimensions at least
    /// one, and at least one safe cell left over.
    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let (rows, cols) = size;
        if rows < 1 || cols < 1 || mines >= cell_product(rows, cols) {
            return Err(GameError::InvalidConfiguration);
        }
        Ok(Self { size, mines })
    }

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

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        cell_product(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }
}
