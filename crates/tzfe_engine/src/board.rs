//! Board state: the flattened tile grid and its derived counters.

use crate::config::BLANK_TILE;
use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Largest tile a board holds. Tiles of this value never merge.
pub const MAX_TILE: u32 = 1 << 31;

/// Checks if two neighbouring tiles would merge.
pub fn mergeable(a: u32, b: u32) -> bool {
    a != BLANK_TILE && a == b && a < MAX_TILE
}

/// Square grid of tile magnitudes.
///
/// Tiles are stored column-major: `index = row + column * dimension`, so
/// consecutive indices walk down a column before moving to the next one.
///
/// ```text
/// | 0 | 3 | 6 |
/// | 1 | 4 | 7 |
/// | 2 | 5 | 8 |
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    tiles: Vec<u32>,
    dimension: usize,
    score: u64,
    num_empty: usize,
    max_tile: u32,
}

impl Board {
    /// Creates an all-blank board.
    #[instrument]
    pub fn new(dimension: usize) -> Self {
        let cells = dimension * dimension;
        Self {
            tiles: vec![BLANK_TILE; cells],
            dimension,
            score: 0,
            num_empty: cells,
            max_tile: BLANK_TILE,
        }
    }

    /// Builds a board from rows listed top to bottom, each left to right.
    ///
    /// Score starts at zero and the max tile is the largest tile present.
    ///
    /// # Errors
    ///
    /// Fails when the rows do not form a square of at least 2x2, or when a
    /// tile is neither blank nor a power of two of at least 2.
    #[instrument(skip(rows), fields(rows = rows.len()))]
    pub fn from_rows(rows: &[Vec<u32>]) -> Result<Self, EngineError> {
        let dimension = rows.len();
        if dimension < 2 {
            return Err(EngineError::invalid_board(format!(
                "need at least 2 rows, got {}",
                dimension
            )));
        }

        let mut board = Self::new(dimension);
        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != dimension {
                return Err(EngineError::invalid_board(format!(
                    "row {} has {} cells, expected {}",
                    row,
                    cells.len(),
                    dimension
                )));
            }
            for (column, &value) in cells.iter().enumerate() {
                if value != BLANK_TILE && (value < 2 || !value.is_power_of_two()) {
                    return Err(EngineError::invalid_board(format!(
                        "tile {} at row {}, column {} is not a power of two",
                        value, row, column
                    )));
                }
                let index = board.index_of(row, column);
                board.tiles[index] = value;
            }
        }

        board.num_empty = board.tiles.iter().filter(|&&t| t == BLANK_TILE).count();
        board.max_tile = board.tiles.iter().copied().max().unwrap_or(BLANK_TILE);
        Ok(board)
    }

    /// Board edge length.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.tiles.len()
    }

    /// All tiles in index order.
    pub fn tiles(&self) -> &[u32] {
        &self.tiles
    }

    /// Sum of every merge result since the board was created.
    pub fn score(&self) -> u64 {
        self.score
    }

    /// Count of blank cells.
    pub fn num_empty(&self) -> usize {
        self.num_empty
    }

    /// Largest tile reached.
    pub fn max_tile(&self) -> u32 {
        self.max_tile
    }

    /// Tile at a flat index, or `None` when out of range.
    pub fn tile(&self, index: usize) -> Option<u32> {
        self.tiles.get(index).copied()
    }

    /// Tile at `(row, column)`, or `None` when out of range.
    pub fn tile_at(&self, row: usize, column: usize) -> Option<u32> {
        if row >= self.dimension || column >= self.dimension {
            return None;
        }
        self.tile(self.index_of(row, column))
    }

    /// Flat index of `(row, column)`.
    pub fn index_of(&self, row: usize, column: usize) -> usize {
        row + column * self.dimension
    }

    /// `(row, column)` of a flat index.
    pub fn coordinates_of(&self, index: usize) -> (usize, usize) {
        (index % self.dimension, index / self.dimension)
    }

    /// Checks if the cell at `index` is blank.
    pub fn is_blank(&self, index: usize) -> bool {
        matches!(self.tile(index), Some(BLANK_TILE))
    }

    /// Count of non-blank cells.
    pub fn occupied(&self) -> usize {
        self.tiles.iter().filter(|&&t| t != BLANK_TILE).count()
    }

    /// Renders tiles in index order as `|t0|t1|...|`.
    pub fn linear(&self) -> String {
        let mut line = String::from("|");
        for tile in &self.tiles {
            line.push_str(&tile.to_string());
            line.push('|');
        }
        line
    }

    // Mutators used by the resolver, spawner and session. They keep the
    // derived counters in step with the tiles.

    /// Moves the tile at `from` onto the blank cell `to`.
    pub(crate) fn shift(&mut self, from: usize, to: usize) {
        self.tiles[to] = self.tiles[from];
        self.tiles[from] = BLANK_TILE;
    }

    /// Doubles the tile at `into`, blanks `from`, and returns the new value.
    ///
    /// Returns `None` and leaves the board alone if the tile is already at
    /// [`MAX_TILE`].
    pub(crate) fn merge(&mut self, into: usize, from: usize) -> Option<u32> {
        let value = self.tiles[into].checked_mul(2)?;
        self.tiles[into] = value;
        self.tiles[from] = BLANK_TILE;
        self.score += u64::from(value);
        self.num_empty += 1;
        self.raise_max_tile(value);
        Some(value)
    }

    /// Places `value` on the blank cell at `index`.
    pub(crate) fn place(&mut self, index: usize, value: u32) {
        self.tiles[index] = value;
        self.num_empty -= 1;
        self.raise_max_tile(value);
    }

    /// Overwrites tiles and counters wholesale.
    pub(crate) fn restore(&mut self, tiles: &[u32], score: u64, num_empty: usize, max_tile: u32) {
        self.tiles.clear();
        self.tiles.extend_from_slice(tiles);
        self.score = score;
        self.num_empty = num_empty;
        self.max_tile = max_tile;
    }

    fn raise_max_tile(&mut self, value: u32) {
        if value > self.max_tile {
            self.max_tile = value;
        }
    }

    #[cfg(test)]
    pub(crate) fn tiles_mut(&mut self) -> &mut [u32] {
        &mut self.tiles
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let bar = format!("-{}", "-----".repeat(self.dimension));
        writeln!(f, "{}", bar)?;
        for row in 0..self.dimension {
            for column in 0..self.dimension {
                write!(f, "|{:>4}", self.tiles[self.index_of(row, column)])?;
            }
            writeln!(f, "|")?;
            writeln!(f, "{}", bar)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_blank() {
        let board = Board::new(4);
        assert_eq!(board.cell_count(), 16);
        assert_eq!(board.num_empty(), 16);
        assert_eq!(board.occupied(), 0);
        assert_eq!(board.max_tile(), 0);
        assert_eq!(board.score(), 0);
    }

    #[test]
    fn test_column_major_indexing() {
        let board = Board::new(3);
        assert_eq!(board.index_of(0, 0), 0);
        assert_eq!(board.index_of(1, 0), 1);
        assert_eq!(board.index_of(0, 1), 3);
        assert_eq!(board.index_of(2, 2), 8);
        assert_eq!(board.coordinates_of(7), (1, 2));
    }

    #[test]
    fn test_from_rows_places_tiles() {
        let board = Board::from_rows(&[vec![2, 0], vec![0, 8]]).unwrap();
        assert_eq!(board.tile_at(0, 0), Some(2));
        assert_eq!(board.tile_at(1, 1), Some(8));
        assert_eq!(board.tiles(), &[2, 0, 0, 8]);
        assert_eq!(board.num_empty(), 2);
        assert_eq!(board.max_tile(), 8);
    }

    #[test]
    fn test_from_rows_rejects_bad_input() {
        assert!(Board::from_rows(&[vec![2]]).is_err());
        assert!(Board::from_rows(&[vec![2, 0], vec![0]]).is_err());
        assert!(Board::from_rows(&[vec![3, 0], vec![0, 0]]).is_err());
        assert!(Board::from_rows(&[vec![1, 0], vec![0, 0]]).is_err());
    }

    #[test]
    fn test_out_of_range_lookup() {
        let board = Board::new(2);
        assert_eq!(board.tile(4), None);
        assert_eq!(board.tile_at(2, 0), None);
    }

    #[test]
    fn test_merge_updates_counters() {
        let mut board = Board::from_rows(&[vec![2, 2], vec![0, 0]]).unwrap();
        let value = board.merge(0, 2);
        assert_eq!(value, Some(4));
        assert_eq!(board.score(), 4);
        assert_eq!(board.num_empty(), 3);
        assert_eq!(board.max_tile(), 4);
    }

    #[test]
    fn test_largest_tile_does_not_merge() {
        let mut board = Board::from_rows(&[vec![MAX_TILE, MAX_TILE], vec![0, 0]]).unwrap();
        let before = board.clone();
        assert_eq!(board.merge(0, 2), None);
        assert_eq!(board, before);
        assert!(!mergeable(MAX_TILE, MAX_TILE));
        assert!(mergeable(MAX_TILE / 2, MAX_TILE / 2));
        assert!(!mergeable(BLANK_TILE, BLANK_TILE));
    }

    #[test]
    fn test_display_rows_top_down() {
        let board = Board::from_rows(&[vec![2, 4], vec![0, 8]]).unwrap();
        let text = board.to_string();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[1], "|   2|   4|");
        assert_eq!(lines[3], "|   0|   8|");
        assert_eq!(board.linear(), "|2|0|4|8|");
    }
}
