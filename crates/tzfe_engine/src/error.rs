//! Engine error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Kinds of failure the engine can report.
///
/// Only construction can fail. Everything that happens during play
/// (rejected undo, a move that changes nothing) is an outcome, not an error.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum EngineErrorKind {
    /// Session parameters are out of range, or no observer was supplied.
    #[display("Invalid configuration: {}", _0)]
    InvalidConfiguration(String),

    /// A board fixture is malformed.
    #[display("Invalid board: {}", _0)]
    InvalidBoard(String),
}

/// Engine error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Engine error: {} at {}:{}", kind, file, line)]
pub struct EngineError {
    /// What went wrong.
    pub kind: EngineErrorKind,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl EngineError {
    /// Creates a new engine error with caller location tracking.
    #[track_caller]
    #[instrument]
    pub fn new(kind: EngineErrorKind) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            kind,
            line: loc.line(),
            file: loc.file(),
        }
    }

    /// Shorthand for an [`EngineErrorKind::InvalidConfiguration`] error.
    #[track_caller]
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        Self::new(EngineErrorKind::InvalidConfiguration(message.into()))
    }

    /// Shorthand for an [`EngineErrorKind::InvalidBoard`] error.
    #[track_caller]
    pub fn invalid_board(message: impl Into<String>) -> Self {
        Self::new(EngineErrorKind::InvalidBoard(message.into()))
    }

    /// Returns the error kind.
    pub fn kind(&self) -> &EngineErrorKind {
        &self.kind
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_records_caller_location() {
        let err = EngineError::invalid_configuration("dimension too small");
        assert_eq!(err.file, file!());
        assert!(err.line > 0);
    }

    #[test]
    fn test_display_includes_kind() {
        let err = EngineError::invalid_board("ragged rows");
        let text = err.to_string();
        assert!(text.contains("Invalid board: ragged rows"));
    }
}
