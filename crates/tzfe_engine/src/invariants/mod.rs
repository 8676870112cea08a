//! First-class invariants for tzfe boards.
//!
//! Invariants are logical properties that must hold for every reachable
//! board. The session checks them after each state change; tests can check
//! them independently.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns Ok(()) if all invariants hold, or Err with every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

fn check<S, I: Invariant<S>>(state: &S, violations: &mut Vec<InvariantViolation>) {
    if !I::holds(state) {
        violations.push(InvariantViolation::new(I::description()));
    }
}

fn finish(violations: Vec<InvariantViolation>) -> Result<(), Vec<InvariantViolation>> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(violations)
    }
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        check::<S, I3>(state, &mut violations);
        finish(violations)
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        check::<S, I1>(state, &mut violations);
        check::<S, I2>(state, &mut violations);
        finish(violations)
    }
}

pub mod empty_count;
pub mod max_tile;
pub mod power_of_two;

pub use empty_count::EmptyCountInvariant;
pub use max_tile::MaxTileInvariant;
pub use power_of_two::PowerOfTwoInvariant;

/// All board invariants as a composable set.
pub type BoardInvariants = (EmptyCountInvariant, PowerOfTwoInvariant, MaxTileInvariant);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Board;

    #[test]
    fn test_invariant_set_holds_for_fixture() {
        let board = Board::from_rows(&[vec![2, 4], vec![0, 8]]).unwrap();
        assert!(BoardInvariants::check_all(&board).is_ok());
    }

    #[test]
    fn test_invariant_set_reports_every_violation() {
        let mut board = Board::from_rows(&[vec![2, 4], vec![0, 8]]).unwrap();
        // A 3 in a blank cell breaks the count, the power rule and the max.
        board.tiles_mut()[1] = 3;
        board.tiles_mut()[2] = 64;

        let violations = BoardInvariants::check_all(&board).unwrap_err();
        assert_eq!(violations.len(), 3);
    }

    #[test]
    fn test_two_invariants_as_set() {
        type TwoInvariants = (EmptyCountInvariant, PowerOfTwoInvariant);
        let board = Board::new(3);
        assert!(TwoInvariants::check_all(&board).is_ok());
    }
}
