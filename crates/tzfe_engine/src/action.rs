//! Move requests and their reported outcomes.

use chrono::{DateTime, Utc};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// Direction a player can push the tiles.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(ascii_case_insensitive)]
pub enum Direction {
    /// Toward row 0.
    Up,
    /// Toward the last row.
    Down,
    /// Toward column 0.
    Left,
    /// Toward the last column.
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];
}

/// A move as recorded in outcomes and history.
///
/// `New` marks the opening board of a game; it is never requested by a caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum GameMove {
    /// Tiles pushed up.
    Up,
    /// Tiles pushed down.
    Down,
    /// Tiles pushed left.
    Left,
    /// Tiles pushed right.
    Right,
    /// A new game was dealt.
    New,
}

impl From<Direction> for GameMove {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => GameMove::Up,
            Direction::Down => GameMove::Down,
            Direction::Left => GameMove::Left,
            Direction::Right => GameMove::Right,
        }
    }
}

/// What the session reports after every move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, new)]
pub struct MoveOutcome {
    /// The move that was requested (or restored by undo).
    pub game_move: GameMove,
    /// Move counter after the action.
    pub moves: u32,
    /// Whether the move changed the board.
    pub succeeded: bool,
    /// When the outcome was reported.
    pub timestamp: DateTime<Utc>,
}

impl std::fmt::Display for MoveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let verdict = if self.succeeded { "ok" } else { "no change" };
        write!(f, "#{} {} ({})", self.moves, self.game_move, verdict)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_direction_parses_case_insensitively() {
        assert_eq!(Direction::from_str("left").unwrap(), Direction::Left);
        assert_eq!(Direction::from_str("UP").unwrap(), Direction::Up);
        assert!(Direction::from_str("sideways").is_err());
    }

    #[test]
    fn test_direction_maps_to_game_move() {
        for direction in Direction::ALL {
            assert_eq!(GameMove::from(direction).to_string(), direction.to_string());
        }
    }
}
