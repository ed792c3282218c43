use crate::board::Minefield;
use crate::GameConfig;

pub use random::RandomBoardGenerator;

mod random;

/// Strategy for laying out the mines of a fresh session.
pub trait BoardGenerator {
    fn generate(self, config: GameConfig) -> Minefield;
}
