//! Compaction hints for external move pickers.

use crate::board::{Board, mergeable};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Adjacent equal pairs along one axis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompactHint {
    /// Number of adjacent equal non-blank pairs.
    pub count: usize,
    /// Sum of `value²` over those pairs; bigger tiles weigh more.
    pub factor: u64,
}

impl CompactHint {
    fn record(&mut self, value: u32) {
        self.count += 1;
        self.factor = self.factor.saturating_add(u64::from(value).pow(2));
    }
}

/// Equal neighbours within each column (an up or down move would merge them).
#[instrument(skip(board), fields(dimension = board.dimension()))]
pub fn compact_vertically_hint(board: &Board) -> CompactHint {
    let n = board.dimension();
    let mut hint = CompactHint::default();
    for column in 0..n {
        for row in 0..n - 1 {
            let here = board.tiles()[board.index_of(row, column)];
            let below = board.tiles()[board.index_of(row + 1, column)];
            if mergeable(here, below) {
                hint.record(here);
            }
        }
    }
    hint
}

/// Equal neighbours within each row (a left or right move would merge them).
#[instrument(skip(board), fields(dimension = board.dimension()))]
pub fn compact_horizontally_hint(board: &Board) -> CompactHint {
    let n = board.dimension();
    let mut hint = CompactHint::default();
    for row in 0..n {
        for column in 0..n - 1 {
            let here = board.tiles()[board.index_of(row, column)];
            let right = board.tiles()[board.index_of(row, column + 1)];
            if mergeable(here, right) {
                hint.record(here);
            }
        }
    }
    hint
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_has_no_hints() {
        let board = Board::new(4);
        assert_eq!(compact_vertically_hint(&board), CompactHint::default());
        assert_eq!(compact_horizontally_hint(&board), CompactHint::default());
    }

    #[test]
    fn test_counts_pairs_per_axis() {
        let board = Board::from_rows(&[
            vec![4, 4, 2],
            vec![8, 0, 2],
            vec![8, 0, 0],
        ])
        .unwrap();

        let horizontal = compact_horizontally_hint(&board);
        assert_eq!(horizontal, CompactHint { count: 1, factor: 16 });

        let vertical = compact_vertically_hint(&board);
        assert_eq!(vertical, CompactHint { count: 2, factor: 64 + 4 });
    }

    #[test]
    fn test_pairs_do_not_wrap_between_lines() {
        // Bottom of column 0 and top of column 1 are consecutive indices.
        let board = Board::from_rows(&[vec![0, 2], vec![2, 0]]).unwrap();
        assert_eq!(compact_vertically_hint(&board).count, 0);
        assert_eq!(compact_horizontally_hint(&board).count, 0);
    }
}
