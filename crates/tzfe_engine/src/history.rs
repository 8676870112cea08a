//! Bounded undo history.

use crate::action::GameMove;
use crate::board::Board;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Immutable point-in-time copy of the board.
///
/// Snapshots own their tiles; they never alias the live board.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
pub struct Snapshot {
    /// Tiles in index order.
    tiles: Vec<u32>,
    /// Score at the time.
    score: u64,
    /// Blank cell count at the time.
    num_empty: usize,
    /// Largest tile at the time.
    max_tile: u32,
    /// The move that produced this board.
    requested_move: GameMove,
    /// Whether that move changed the board.
    move_succeeded: bool,
}

impl Snapshot {
    /// Copies the board's current state.
    pub fn capture(board: &Board, requested_move: GameMove, move_succeeded: bool) -> Self {
        Self {
            tiles: board.tiles().to_vec(),
            score: board.score(),
            num_empty: board.num_empty(),
            max_tile: board.max_tile(),
            requested_move,
            move_succeeded,
        }
    }

    /// Writes this snapshot back over `board`.
    pub(crate) fn restore_into(&self, board: &mut Board) {
        board.restore(&self.tiles, self.score, self.num_empty, self.max_tile);
    }
}

/// Most-recent-first list of snapshots.
///
/// Index 0 is the current board; up to `max_undos` earlier boards follow it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    snapshots: VecDeque<Snapshot>,
    max_undos: usize,
}

impl History {
    /// Creates an empty history that keeps `max_undos` prior boards.
    pub fn new(max_undos: usize) -> Self {
        Self {
            snapshots: VecDeque::with_capacity(max_undos + 1),
            max_undos,
        }
    }

    /// Maximum number of snapshots held.
    pub fn capacity(&self) -> usize {
        self.max_undos + 1
    }

    /// Number of snapshots held.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Checks if no snapshot is held.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Number of undos currently available.
    pub fn undos_available(&self) -> usize {
        self.snapshots.len().saturating_sub(1)
    }

    /// Snapshot at `index`, 0 being the most recent.
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// Snapshots from newest to oldest.
    pub fn iter(&self) -> impl Iterator<Item = &Snapshot> {
        self.snapshots.iter()
    }

    /// Records a new current snapshot, dropping the oldest past capacity.
    #[instrument(skip(self, snapshot), fields(held = self.snapshots.len()))]
    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push_front(snapshot);
        if self.snapshots.len() > self.capacity() {
            self.snapshots.pop_back();
            debug!("Evicted oldest snapshot");
        }
    }

    /// Drops the current snapshot and returns the one before it.
    ///
    /// Returns `None`, leaving the history untouched, when there is no
    /// earlier snapshot.
    pub fn step_back(&mut self) -> Option<&Snapshot> {
        if self.snapshots.len() < 2 {
            return None;
        }
        self.snapshots.pop_front();
        self.snapshots.front()
    }

    /// Drops every snapshot.
    pub fn clear(&mut self) {
        self.snapshots.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(score: u64) -> Snapshot {
        let board = Board::new(2);
        let mut snap = Snapshot::capture(&board, GameMove::Left, true);
        snap.score = score;
        snap
    }

    #[test]
    fn test_most_recent_first() {
        let mut history = History::new(5);
        history.push(snapshot(1));
        history.push(snapshot(2));
        assert_eq!(*history.get(0).unwrap().score(), 2);
        assert_eq!(*history.get(1).unwrap().score(), 1);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut history = History::new(2);
        for score in 0..5 {
            history.push(snapshot(score));
        }
        assert_eq!(history.len(), 3);
        let scores: Vec<u64> = history.iter().map(|s| *s.score()).collect();
        assert_eq!(scores, vec![4, 3, 2]);
        assert_eq!(history.undos_available(), 2);
    }

    #[test]
    fn test_step_back_needs_two_snapshots() {
        let mut history = History::new(5);
        assert!(history.step_back().is_none());

        history.push(snapshot(1));
        assert!(history.step_back().is_none());
        assert_eq!(history.len(), 1);

        history.push(snapshot(2));
        assert_eq!(*history.step_back().unwrap().score(), 1);
        assert_eq!(history.len(), 1);
    }

    #[test]
    fn test_snapshot_is_an_independent_copy() {
        let mut board = Board::from_rows(&[vec![2, 0], vec![0, 0]]).unwrap();
        let snap = Snapshot::capture(&board, GameMove::New, true);
        board.place(1, 4);
        assert_eq!(snap.tiles(), &vec![2, 0, 0, 0]);
        assert_eq!(*snap.num_empty(), 3);
    }
}
