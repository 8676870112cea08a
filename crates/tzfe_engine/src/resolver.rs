//! Move resolution: slide, merge, slide along every line.
//!
//! A direction is turned into one index sequence per row or column, ordered
//! so position 0 sits against the wall the tiles travel toward. Each line is
//! then slid, compacted once, and slid again to close the gaps merges leave.

use crate::action::Direction;
use crate::board::{Board, mergeable};
use crate::transition::{Transition, TransitionLog};
use tracing::{debug, instrument, trace};

/// Index sequences for every line of a move, upstream cell first.
#[instrument]
pub fn line_indices(direction: Direction, dimension: usize) -> Vec<Vec<usize>> {
    let index = |row: usize, column: usize| row + column * dimension;
    (0..dimension)
        .map(|line| {
            (0..dimension)
                .map(|step| {
                    let back = dimension - 1 - step;
                    match direction {
                        Direction::Left => index(line, step),
                        Direction::Right => index(line, back),
                        Direction::Up => index(step, line),
                        Direction::Down => index(back, line),
                    }
                })
                .collect()
        })
        .collect()
}

/// Applies `direction` to the board.
///
/// Returns true if any tile moved or merged. Deterministic: the board and
/// direction fully decide the result.
#[instrument(skip(board, log), fields(dimension = board.dimension()))]
pub fn resolve(board: &mut Board, direction: Direction, log: &mut TransitionLog) -> bool {
    let mut changed = false;
    for line in line_indices(direction, board.dimension()) {
        let slid = slide_line(board, &line, log);
        let merged = compact_line(board, &line, log);
        let closed = slide_line(board, &line, log);
        changed |= slid | merged | closed;
    }
    debug!(changed, score = board.score(), "Resolved move");
    changed
}

/// Packs the line's non-blank tiles toward position 0, keeping their order.
pub(crate) fn slide_line(board: &mut Board, line: &[usize], log: &mut TransitionLog) -> bool {
    let mut moved = false;
    let mut cursor = 0;
    for position in 0..line.len() {
        let from = line[position];
        if board.is_blank(from) {
            continue;
        }
        if position != cursor {
            let to = line[cursor];
            board.shift(from, to);
            let value = board.tiles()[to];
            trace!(value, from, to, "Slide");
            log.push(Transition::slide(value, to, from));
            moved = true;
        }
        cursor += 1;
    }
    moved
}

/// Merges each adjacent equal pair once, scanning from position 0.
///
/// The second tile of a merged pair is left blank, so the scan can never
/// merge the same tile twice in one pass.
pub(crate) fn compact_line(board: &mut Board, line: &[usize], log: &mut TransitionLog) -> bool {
    let mut compacted = false;
    for pair in line.windows(2) {
        let (into, from) = (pair[0], pair[1]);
        if !mergeable(board.tiles()[into], board.tiles()[from]) {
            continue;
        }
        if let Some(value) = board.merge(into, from) {
            trace!(value, into, from, "Merge");
            log.push(Transition::merge(value, into, from));
            compacted = true;
        }
    }
    compacted
}
