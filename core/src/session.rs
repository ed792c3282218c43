use core::num::Saturating;
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::board::Minefield;
use crate::cell::CellView;
use crate::error::Result;
use crate::generator::BoardGenerator;
use crate::reveal::{RevealDelta, RevealEngine};
use crate::types::{CellCount, Coord2, ToNdIndex};
use crate::GameConfig;

/// Valid transitions:
/// - InProgress -> Won
/// - InProgress -> Lost
///
/// Won and Lost are terminal; the only way out is a fresh session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    InProgress,
    Won,
    Lost,
}

impl GameStatus {
    /// Indicates the game has ended and no moves are accepted anymore.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        Self::InProgress
    }
}

/// Outcome of a primary click as seen by the presentation layer.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    Continue,
    HitMine,
    Win,
}

/// Outcome of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    Flagged,
    Unflagged,
    Rejected,
}

impl FlagOutcome {
    /// Whether this outcome changed the grid and warrants a redraw.
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

/// One game from difficulty selection to win or loss: the hidden board, the
/// player-visible grid, and the termination bookkeeping. Restart means
/// dropping the session and building a new one.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    minefield: Minefield,
    grid: Array2<CellView>,
    revealed_count: Saturating<CellCount>,
    flagged_count: Saturating<CellCount>,
    flagged_mine_count: Saturating<CellCount>,
    status: GameStatus,
    triggered_mine: Option<Coord2>,
}

impl GameSession {
    /// Starts a fresh session from a validated config and a layout strategy.
    pub fn new(config: GameConfig, generator: impl BoardGenerator) -> Self {
        Self::from_minefield(generator.generate(config))
    }

    /// Starts a session over a pre-built layout (fixed boards, tests).
    pub fn from_minefield(minefield: Minefield) -> Self {
        let size = minefield.size();
        Self {
            minefield,
            grid: Array2::default(size.to_nd_index()),
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            flagged_mine_count: Saturating(0),
            status: Default::default(),
            triggered_mine: None,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_finished(&self) -> bool {
        self.status.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.minefield.size()
    }

    pub fn config(&self) -> GameConfig {
        self.minefield.config()
    }

    pub fn total_mines(&self) -> CellCount {
        self.minefield.mine_count()
    }

    /// How many mines the flag counter still claims are unaccounted for.
    pub fn mines_left(&self) -> isize {
        (self.minefield.mine_count() as isize) - (self.flagged_count.0 as isize)
    }

    /// The cell that ended a lost game, if any.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Peeks at the hidden layout. Meant for presentation code that draws a
    /// finished board, not for gameplay decisions.
    pub fn has_mine_at(&self, coords: Coord2) -> Result<bool> {
        let coords = self.minefield.validate_coords(coords)?;
        Ok(self.minefield.is_mine(coords))
    }

    /// Redraw query for a single cell.
    pub fn cell_at(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.minefield.validate_coords(coords)?;
        Ok(self.grid[coords.to_nd_index()])
    }

    /// Primary (left) click: reveal a hidden cell, or chord on an already
    /// revealed one. Clicks on a finished game or on a flag change nothing.
    pub fn primary_click(&mut self, coords: Coord2) -> Result<ClickOutcome> {
        let coords = self.minefield.validate_coords(coords)?;

        if self.status.is_finished() {
            return Ok(ClickOutcome::Continue);
        }

        Ok(match self.grid[coords.to_nd_index()] {
            CellView::Revealed(_) => {
                let delta = RevealEngine::new(&self.minefield, &mut self.grid).chord(coords);
                self.absorb(delta)
            }
            // a flag blocks the accidental reveal
            CellView::Flagged => ClickOutcome::Continue,
            CellView::Hidden if self.minefield.is_mine(coords) => {
                self.grid[coords.to_nd_index()] = CellView::Exploded;
                self.triggered_mine = Some(coords);
                self.end_game(false);
                ClickOutcome::HitMine
            }
            CellView::Hidden => {
                let delta = RevealEngine::new(&self.minefield, &mut self.grid).reveal(coords);
                self.absorb(delta)
            }
            // disclosure views only exist once the game is finished
            _ => ClickOutcome::Continue,
        })
    }

    /// Secondary (right) click: toggle the flag on a hidden cell. Rejected on
    /// revealed cells and finished games.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.minefield.validate_coords(coords)?;

        if self.status.is_finished() {
            return Ok(FlagOutcome::Rejected);
        }

        let outcome = match self.grid[coords.to_nd_index()] {
            CellView::Hidden => {
                self.grid[coords.to_nd_index()] = CellView::Flagged;
                self.flagged_count += 1;
                if self.minefield.is_mine(coords) {
                    self.flagged_mine_count += 1;
                }
                FlagOutcome::Flagged
            }
            CellView::Flagged => {
                self.grid[coords.to_nd_index()] = CellView::Hidden;
                self.flagged_count -= 1;
                if self.minefield.is_mine(coords) {
                    self.flagged_mine_count -= 1;
                }
                FlagOutcome::Unflagged
            }
            _ => FlagOutcome::Rejected,
        };

        if outcome.has_update() && self.check_win() {
            self.end_game(true);
        }
        Ok(outcome)
    }

    /// Folds a reveal delta into the session counters and evaluates the
    /// termination conditions.
    fn absorb(&mut self, delta: RevealDelta) -> ClickOutcome {
        self.revealed_count += delta.revealed;
        self.flagged_count -= delta.flags_cleared;

        if let Some(mine) = delta.triggered_mine {
            self.triggered_mine = Some(mine);
            self.end_game(false);
            return ClickOutcome::HitMine;
        }

        if self.check_win() {
            self.end_game(true);
            ClickOutcome::Win
        } else {
            ClickOutcome::Continue
        }
    }

    /// Dual win condition: every safe cell revealed, or the flags matching
    /// the mines exactly. A superset of flags never wins: any flag on a safe
    /// cell keeps the counts from lining up.
    fn check_win(&self) -> bool {
        let mines = self.minefield.mine_count();
        self.revealed_count.0 == self.minefield.safe_cell_count()
            || (self.flagged_count.0 == mines && self.flagged_mine_count.0 == mines)
    }

    fn end_game(&mut self, won: bool) {
        if self.status.is_finished() {
            return;
        }

        self.status = if won { GameStatus::Won } else { GameStatus::Lost };
        log::debug!(
            "Game over, won: {}, revealed: {}, flagged: {}",
            won,
            self.revealed_count.0,
            self.flagged_count.0
        );
        self.disclose_mines(won);
    }

    /// Rewrites covered cells once the game ends: unflagged mines become
    /// visible on a lost board and auto-flagged on a won one, flags sitting on
    /// safe cells are called out.
    fn disclose_mines(&mut self, won: bool) {
        let (rows, cols) = self.minefield.size();
        for row in 0..rows {
            for col in 0..cols {
                let coords = (row, col);
                match (self.minefield.is_mine(coords), self.grid[coords.to_nd_index()]) {
                    (true, CellView::Hidden) => {
                        if won {
                            self.grid[coords.to_nd_index()] = CellView::AutoFlagged;
                            self.flagged_count += 1;
                        } else {
                            self.grid[coords.to_nd_index()] = CellView::Mine;
                        }
                    }
                    (false, CellView::Flagged) => {
                        self.grid[coords.to_nd_index()] = CellView::WrongFlag;
                    }
                    _ => {}
                }
            }
        }
    }
}
