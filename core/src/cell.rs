use serde::{Deserialize, Serialize};

/// Player-visible state of a single grid cell.
///
/// The first three variants are the only ones that occur while a game is in
/// progress. The rest are written by the end-of-game disclosure pass so the
/// presentation can redraw the final board without touching the hidden layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// The mine that ended the game.
    Exploded,
    /// A mine left uncovered and unflagged when the game was lost.
    Mine,
    /// A mine flagged automatically on a won board.
    AutoFlagged,
    /// A flag that turned out to sit on a safe cell.
    WrongFlag,
}

impl CellView {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }

    // whether the cell still renders as a covered square
    pub const fn is_covered(self) -> bool {
        matches!(
            self,
            Self::Hidden | Self::Flagged | Self::AutoFlagged | Self::WrongFlag
        )
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
