//! Weighted random tile spawning.

use crate::board::Board;
use crate::transition::{Transition, TransitionLog};
use rand::Rng;
use tracing::{debug, instrument};

/// Draws the value of a new tile.
///
/// A seed of 2 or 4 is used as-is. Anything else falls back to a draw in
/// `[0, 100)`: samples at or above `random_ratio` give a 4, the rest a 2.
pub fn draw_value<R: Rng + ?Sized>(rng: &mut R, random_ratio: u32, seed: Option<u32>) -> u32 {
    match seed {
        Some(value @ (2 | 4)) => value,
        _ => {
            let sample: u32 = rng.gen_range(0..100);
            if sample >= random_ratio { 4 } else { 2 }
        }
    }
}

/// Places a new tile on a random blank cell.
///
/// The cell is the n-th blank in index order for a uniform `n` in
/// `[0, num_empty)`. Returns false if the board is full.
#[instrument(skip(board, rng, log), fields(num_empty = board.num_empty()))]
pub fn spawn<R: Rng + ?Sized>(
    board: &mut Board,
    rng: &mut R,
    random_ratio: u32,
    seed: Option<u32>,
    log: &mut TransitionLog,
) -> bool {
    if board.num_empty() == 0 {
        debug!("No blank cell to spawn into");
        return false;
    }

    let value = draw_value(rng, random_ratio, seed);
    let pick = rng.gen_range(0..board.num_empty());

    let site = (0..board.cell_count())
        .filter(|&index| board.is_blank(index))
        .nth(pick);

    match site {
        Some(index) => {
            board.place(index, value);
            log.push(Transition::add(value, index));
            debug!(value, index, "Spawned tile");
            true
        }
        None => false,
    }
}
