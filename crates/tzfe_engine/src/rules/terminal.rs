//! Terminal-state detection for tzfe.

use super::hint::{compact_horizontally_hint, compact_vertically_hint};
use crate::board::Board;
use tracing::instrument;

/// Checks if any move could still change the board.
///
/// True while a blank cell exists or two equal tiles sit side by side in a
/// row or a column.
#[instrument(skip(board), fields(num_empty = board.num_empty()))]
pub fn has_moves_remaining(board: &Board) -> bool {
    board.num_empty() > 0
        || compact_vertically_hint(board).count > 0
        || compact_horizontally_hint(board).count > 0
}

/// Checks if the board has reached the win target.
pub fn is_win(board: &Board, win_target: u32) -> bool {
    board.max_tile() >= win_target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_cell_means_moves_remain() {
        let board = Board::from_rows(&[vec![2, 4], vec![8, 0]]).unwrap();
        assert!(has_moves_remaining(&board));
    }

    #[test]
    fn test_full_board_without_pairs_is_terminal() {
        let board = Board::from_rows(&[
            vec![2, 4, 2],
            vec![4, 2, 4],
            vec![2, 4, 2],
        ])
        .unwrap();
        assert!(!has_moves_remaining(&board));
    }

    #[test]
    fn test_full_board_with_row_pair_is_live() {
        let board = Board::from_rows(&[vec![2, 2], vec![4, 8]]).unwrap();
        assert!(has_moves_remaining(&board));
    }

    #[test]
    fn test_full_board_with_column_pair_is_live() {
        let board = Board::from_rows(&[vec![2, 4], vec![2, 8]]).unwrap();
        assert!(has_moves_remaining(&board));
    }

    #[test]
    fn test_pairs_of_largest_tile_are_terminal() {
        use crate::board::MAX_TILE;
        let board = Board::from_rows(&[vec![MAX_TILE, MAX_TILE], vec![2, 4]]).unwrap();
        assert!(!has_moves_remaining(&board));
    }

    #[test]
    fn test_win_threshold() {
        let board = Board::from_rows(&[vec![2048, 0], vec![0, 0]]).unwrap();
        assert!(is_win(&board, 2048));
        assert!(!is_win(&board, 4096));
    }
}
