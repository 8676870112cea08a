//! Power-of-two invariant: every tile is blank or a power of two.

use super::Invariant;
use crate::Board;
use crate::config::BLANK_TILE;

/// Invariant: non-blank tiles are powers of two of at least 2.
pub struct PowerOfTwoInvariant;

impl Invariant<Board> for PowerOfTwoInvariant {
    fn holds(board: &Board) -> bool {
        board
            .tiles()
            .iter()
            .all(|&t| t == BLANK_TILE || (t >= 2 && t.is_power_of_two()))
    }

    fn description() -> &'static str {
        "Every non-blank tile is a power of two"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_powers_hold() {
        let board = Board::from_rows(&[vec![2, 1024], vec![0, 4]]).unwrap();
        assert!(PowerOfTwoInvariant::holds(&board));
    }

    #[test]
    fn test_one_violates() {
        let mut board = Board::new(2);
        board.tiles_mut()[3] = 1;
        assert!(!PowerOfTwoInvariant::holds(&board));
    }
}
