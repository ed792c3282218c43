use alloc::collections::{BTreeSet, VecDeque};
use core::ops::AddAssign;
use ndarray::Array2;

use crate::board::{Minefield, Square};
use crate::cell::CellView;
use crate::types::{CellCount, Coord2, ToNdIndex};

/// Net effect of a reveal or chord action on the player grid.
///
/// `revealed` counts newly uncovered safe cells only; an exposed mine is
/// reported through `triggered_mine` instead so the win-by-clearing counter
/// never includes it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct RevealDelta {
    pub revealed: CellCount,
    pub flags_cleared: CellCount,
    pub triggered_mine: Option<Coord2>,
}

impl RevealDelta {
    pub const fn hit_mine(&self) -> bool {
        self.triggered_mine.is_some()
    }
}

/// Used to merge the per-neighbor deltas of a chord.
impl AddAssign for RevealDelta {
    fn add_assign(&mut self, rhs: Self) {
        self.revealed += rhs.revealed;
        self.flags_cleared += rhs.flags_cleared;
        self.triggered_mine = self.triggered_mine.or(rhs.triggered_mine);
    }
}

/// Reveal operations over one session's hidden board and player grid.
pub(crate) struct RevealEngine<'a> {
    minefield: &'a Minefield,
    grid: &'a mut Array2<CellView>,
}

impl<'a> RevealEngine<'a> {
    pub fn new(minefield: &'a Minefield, grid: &'a mut Array2<CellView>) -> Self {
        Self { minefield, grid }
    }

    /// Uncovers a safe cell, cascading through connected zero regions.
    ///
    /// No-op on an already revealed cell. Revealing a flagged cell clears its
    /// flag; the cleared flag is reported in the delta. Mine clicks are
    /// intercepted by the session before this path, so a mine square reached
    /// here is a caller bug.
    pub fn reveal(&mut self, coords: Coord2) -> RevealDelta {
        let mut delta = RevealDelta::default();
        if !self.uncover(coords, &mut delta) {
            return delta;
        }

        if self.near_count(coords) == 0 {
            self.flood_from(coords, &mut delta);
        }
        delta
    }

    /// Chord on a revealed numbered cell: uncovers every hidden, unflagged
    /// neighbor. A mine among them is exposed rather than skipped and reported
    /// through the delta; wrong flags make chording lose the game by design of
    /// the rules, not by accident.
    pub fn chord(&mut self, coords: Coord2) -> RevealDelta {
        let mut delta = RevealDelta::default();

        // chording only acts on a revealed cell with a nonzero count
        let CellView::Revealed(near) = self.grid[coords.to_nd_index()] else {
            return delta;
        };
        if near == 0 {
            return delta;
        }

        for neighbor in self.minefield.neighbors(coords) {
            if self.grid[neighbor.to_nd_index()] != CellView::Hidden {
                continue;
            }
            if self.minefield.is_mine(neighbor) {
                self.grid[neighbor.to_nd_index()] = CellView::Exploded;
                delta.triggered_mine.get_or_insert(neighbor);
                log::debug!("Chord at {:?} exposed a mine at {:?}", coords, neighbor);
            } else {
                delta += self.reveal(neighbor);
            }
        }
        delta
    }

    /// Expands the zero region around `origin` with an explicit work list;
    /// recursion depth must not scale with board size.
    fn flood_from(&mut self, origin: Coord2, delta: &mut RevealDelta) {
        let mut visited = BTreeSet::from([origin]);
        let mut to_visit: VecDeque<_> = self.minefield.neighbors(origin).collect();
        log::trace!("Starting flood fill from {:?}", origin);

        while let Some(visit_coords) = to_visit.pop_front() {
            if !visited.insert(visit_coords) {
                continue;
            }
            if !self.uncover(visit_coords, delta) {
                continue;
            }

            // only zero cells expand further; their neighbors are never mines
            if self.near_count(visit_coords) == 0 {
                to_visit.extend(
                    self.minefield
                        .neighbors(visit_coords)
                        .filter(|pos| !visited.contains(pos)),
                );
            }
        }
    }

    /// Reveals a single safe cell, clearing any flag on it. Returns whether
    /// the cell was newly uncovered.
    fn uncover(&mut self, coords: Coord2, delta: &mut RevealDelta) -> bool {
        match self.grid[coords.to_nd_index()] {
            CellView::Hidden => {}
            CellView::Flagged => delta.flags_cleared += 1,
            _ => return false,
        }

        let near = self.near_count(coords);
        self.grid[coords.to_nd_index()] = CellView::Revealed(near);
        delta.revealed += 1;
        log::trace!("Revealed cell at {:?}, adjacent mines: {}", coords, near);
        true
    }

    fn near_count(&self, coords: Coord2) -> u8 {
        match self.minefield.square_at(coords) {
            Square::Safe(near) => near,
            Square::Mine => {
                debug_assert!(false, "mine reached through the safe reveal path");
                0
            }
        }
    }
}
