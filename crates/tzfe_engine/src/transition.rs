//! Atomic tile operations emitted for rendering.
//!
//! Transitions are write-only: the engine appends them while it works and
//! hands them to the observer, but never reads them back.

use serde::{Deserialize, Serialize};

/// What happened to a tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum TileMoveType {
    /// A tile was spawned.
    Add,
    /// A tile moved to a blank cell.
    Slide,
    /// Two tiles combined.
    Merge,
    /// A cell was blanked for a new game.
    Clear,
    /// A cell was redrawn after an undo.
    Reset,
}

/// One atomic, replayable tile operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    kind: TileMoveType,
    value: u32,
    target: usize,
    source: Option<usize>,
}

impl Transition {
    /// A tile of `value` appeared at `target`.
    pub fn add(value: u32, target: usize) -> Self {
        Self {
            kind: TileMoveType::Add,
            value,
            target,
            source: None,
        }
    }

    /// A tile of `value` moved from `source` to `target`.
    pub fn slide(value: u32, target: usize, source: usize) -> Self {
        Self {
            kind: TileMoveType::Slide,
            value,
            target,
            source: Some(source),
        }
    }

    /// The tile at `source` merged into `target`, producing `value`.
    pub fn merge(value: u32, target: usize, source: usize) -> Self {
        Self {
            kind: TileMoveType::Merge,
            value,
            target,
            source: Some(source),
        }
    }

    /// The cell at `target` was cleared to `value`.
    pub fn clear(value: u32, target: usize) -> Self {
        Self {
            kind: TileMoveType::Clear,
            value,
            target,
            source: None,
        }
    }

    /// The cell at `target` was redrawn as `value`.
    pub fn reset(value: u32, target: usize) -> Self {
        Self {
            kind: TileMoveType::Reset,
            value,
            target,
            source: None,
        }
    }

    /// Operation kind.
    pub fn kind(&self) -> TileMoveType {
        self.kind
    }

    /// Tile value after the operation.
    pub fn value(&self) -> u32 {
        self.value
    }

    /// Cell the operation lands on.
    pub fn target(&self) -> usize {
        self.target
    }

    /// Cell the tile came from, for slides and merges.
    pub fn source(&self) -> Option<usize> {
        self.source
    }
}

impl std::fmt::Display for Transition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.source {
            Some(source) => write!(f, "{} {} {} -> {}", self.kind, self.value, source, self.target),
            None => write!(f, "{} {} @ {}", self.kind, self.value, self.target),
        }
    }
}

/// Ordered transitions produced by the most recent action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionLog {
    entries: Vec<Transition>,
}

impl TransitionLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a transition.
    pub fn push(&mut self, transition: Transition) {
        self.entries.push(transition);
    }

    /// Drops every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Entries in emission order.
    pub fn entries(&self) -> &[Transition] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Checks if the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates entries of one kind.
    pub fn of_kind(&self, kind: TileMoveType) -> impl Iterator<Item = &Transition> {
        self.entries.iter().filter(move |t| t.kind == kind)
    }
}

impl<'a> IntoIterator for &'a TransitionLog {
    type Item = &'a Transition;
    type IntoIter = std::slice::Iter<'a, Transition>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
