//! Max tile invariant: the recorded maximum covers every tile.

use super::Invariant;
use crate::Board;

/// Invariant: no tile exceeds the recorded max tile.
pub struct MaxTileInvariant;

impl Invariant<Board> for MaxTileInvariant {
    fn holds(board: &Board) -> bool {
        board.tiles().iter().all(|&t| t <= board.max_tile())
    }

    fn description() -> &'static str {
        "Max tile is at least every tile on the board"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixture_holds() {
        let board = Board::from_rows(&[vec![2, 16], vec![0, 4]]).unwrap();
        assert!(MaxTileInvariant::holds(&board));
    }

    #[test]
    fn test_untracked_tile_violates() {
        let mut board = Board::from_rows(&[vec![2, 0], vec![0, 0]]).unwrap();
        board.tiles_mut()[1] = 32;
        assert!(!MaxTileInvariant::holds(&board));
    }
}
