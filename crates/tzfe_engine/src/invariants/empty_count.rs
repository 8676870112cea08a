//! Empty count invariant: the blank counter matches the tiles.

use super::Invariant;
use crate::Board;

/// Invariant: `num_empty + occupied == dimension²`.
pub struct EmptyCountInvariant;

impl Invariant<Board> for EmptyCountInvariant {
    fn holds(board: &Board) -> bool {
        let cells = board.dimension() * board.dimension();
        board.cell_count() == cells && board.num_empty() + board.occupied() == cells
    }

    fn description() -> &'static str {
        "Blank count plus occupied count equals the number of cells"
    }
}
