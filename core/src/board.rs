use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};
use crate::types::{CellCount, Coord, Coord2, NeighborIter, ToNdIndex};
use crate::GameConfig;

/// Hidden content of a single board square, fixed at generation time.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Square {
    Mine,
    /// Safe square carrying the number of mines in its Moore neighborhood.
    Safe(u8),
}

impl Square {
    pub const fn is_mine(self) -> bool {
        matches!(self, Self::Mine)
    }
}

/// The immutable hidden board: every square is either a mine or a safe square
/// with its adjacent-mine count precomputed. Owned exclusively by one session
/// and discarded wholesale on restart.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Minefield {
    squares: Array2<Square>,
    mine_count: CellCount,
}

impl Minefield {
    /// Numbers every safe square of a raw mine mask.
    pub fn from_mine_mask(mine_mask: &Array2<bool>) -> Self {
        let dim = mine_mask.dim();
        let size: Coord2 = (
            dim.0.try_into().expect("board rows fit the coordinate type"),
            dim.1.try_into().expect("board columns fit the coordinate type"),
        );

        let mut mine_count: CellCount = 0;
        let squares = Array2::from_shape_fn(dim, |(row, col)| {
            if mine_mask[(row, col)] {
                mine_count += 1;
                Square::Mine
            } else {
                let near = NeighborIter::new((row as Coord, col as Coord), size)
                    .filter(|&pos| mine_mask[pos.to_nd_index()])
                    .count() as u8;
                Square::Safe(near)
            }
        });

        Self { squares, mine_count }
    }

    /// Builds a board with mines at exactly the given coordinates. Duplicates
    /// collapse into a single mine.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(GameError::OutOfBounds);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Ok(Self::from_mine_mask(&mine_mask))
    }

    pub fn config(&self) -> GameConfig {
        GameConfig {
            size: self.size(),
            mines: self.mine_count,
        }
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds)
        }
    }

    pub fn size(&self) -> Coord2 {
        let dim = self.squares.dim();
        (
            dim.0.try_into().expect("board rows fit the coordinate type"),
            dim.1.try_into().expect("board columns fit the coordinate type"),
        )
    }

    pub fn total_cells(&self) -> CellCount {
        self.squares.len() as CellCount
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn square_at(&self, coords: Coord2) -> Square {
        self.squares[coords.to_nd_index()]
    }

    pub fn is_mine(&self, coords: Coord2) -> bool {
        self.square_at(coords).is_mine()
    }

    pub(crate) fn neighbors(&self, coords: Coord2) -> NeighborIter {
        NeighborIter::new(coords, self.size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_mines_and_safe_cells() {
        let field = Minefield::from_mine_coords((4, 4), &[(0, 0), (3, 3)]).unwrap();

        assert_eq!(field.mine_count(), 2);
        assert_eq!(field.total_cells(), 16);
        assert_eq!(field.safe_cell_count(), 14);
        assert!(field.is_mine((0, 0)));
        assert!(!field.is_mine((2, 2)));
    }

    #[test]
    fn duplicate_mine_coords_collapse() {
        let field = Minefield::from_mine_coords((3, 3), &[(1, 1), (1, 1)]).unwrap();
        assert_eq!(field.mine_count(), 1);
    }

    #[test]
    fn rejects_out_of_bounds_mine() {
        assert_eq!(
            Minefield::from_mine_coords((3, 3), &[(3, 0)]),
            Err(GameError::OutOfBounds)
        );
    }

    #[test]
    fn adjacency_counts_match_brute_force() {
        let mines = [(0, 1), (1, 1), (2, 0), (4, 4)];
        let field = Minefield::from_mine_coords((5, 5), &mines).unwrap();

        for row in 0..5 {
            for col in 0..5 {
                let coords = (row, col);
                if field.is_mine(coords) {
                    continue;
                }
                let expected = mines
                    .iter()
                    .filter(|&&(m_row, m_col)| {
                        m_row.abs_diff(row) <= 1
                            && m_col.abs_diff(col) <= 1
                            && (m_row, m_col) != coords
                    })
                    .count() as u8;
                assert_eq!(field.square_at(coords), Square::Safe(expected));
            }
        }
    }

    #[test]
    fn validate_coords_checks_both_axes() {
        let field = Minefield::from_mine_coords((2, 5), &[]).unwrap();

        assert_eq!(field.validate_coords((1, 4)), Ok((1, 4)));
        assert_eq!(field.validate_coords((2, 0)), Err(GameError::OutOfBounds));
        assert_eq!(field.validate_coords((0, 5)), Err(GameError::OutOfBounds));
    }
}
