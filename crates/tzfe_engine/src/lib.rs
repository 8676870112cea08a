//! tzfe engine - 2048-style tile-merging game logic
//!
//! The engine resolves directional moves on a square board of power-of-two
//! tiles, spawns new tiles, tracks score and terminal state, and keeps a
//! bounded undo history. It performs no I/O: callers drive it synchronously
//! and receive results through a [`GameObserver`].
//!
//! # Architecture
//!
//! - **Board**: flattened column-major tile grid plus derived counters
//! - **Resolver**: slide, merge, slide along every line of a move
//! - **Spawner**: weighted random tile placement
//! - **History**: most-recent-first snapshots for undo
//! - **Rules**: terminal-state test and merge hints
//! - **Session**: orchestrates a game and reports to the observer
//!
//! # Example
//!
//! ```
//! use tzfe_engine::{Direction, EventRecorder, SessionBuilder, SessionConfig};
//!
//! # fn example() -> Result<(), tzfe_engine::EngineError> {
//! let mut session = SessionBuilder::new(SessionConfig::default())
//!     .observer(EventRecorder::new())
//!     .seed(7)
//!     .build()?;
//!
//! session.new_game(0);
//! session.action_move(Direction::Left);
//! println!("{}", session);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod config;
mod error;
mod history;
mod observer;
mod session;
mod transition;

// Public modules: free functions over a board
pub mod invariants;
pub mod resolver;
pub mod rules;
pub mod spawner;

// Crate-level exports - Board state
pub use board::{Board, MAX_TILE, mergeable};

// Crate-level exports - Configuration
pub use config::{BLANK_TILE, MAX_DIMENSION, MIN_DIMENSION, SessionConfig};

// Crate-level exports - Errors
pub use error::{EngineError, EngineErrorKind};

// Crate-level exports - Moves and transitions
pub use action::{Direction, GameMove, MoveOutcome};
pub use transition::{TileMoveType, Transition, TransitionLog};

// Crate-level exports - History
pub use history::{History, Snapshot};

// Crate-level exports - Observer contract
pub use observer::{EventRecorder, GameEvent, GameObserver};

// Crate-level exports - Session control
pub use rules::CompactHint;
pub use session::{Session, SessionBuilder};
