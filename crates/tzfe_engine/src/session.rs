//! Session controller: one full game from deal to terminal board.
//!
//! The session owns the board, the transition log, the undo history, the
//! random source and the observer. Every public operation runs to completion
//! and reports through the observer before returning.

use crate::action::{Direction, GameMove, MoveOutcome};
use crate::board::Board;
use crate::config::{BLANK_TILE, SessionConfig};
use crate::error::EngineError;
use crate::history::{History, Snapshot};
use crate::invariants::{BoardInvariants, InvariantSet};
use crate::observer::GameObserver;
use crate::resolver::resolve;
use crate::rules::{self, CompactHint};
use crate::spawner::spawn;
use crate::transition::{Transition, TransitionLog};
use chrono::{DateTime, Duration, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, error, info, instrument, warn};

/// Value of the two tiles dealt by a new game.
const OPENING_TILE: u32 = 2;

/// Builder for [`Session`].
///
/// The observer is mandatory; `build` fails without one.
pub struct SessionBuilder<O, R = StdRng> {
    config: SessionConfig,
    observer: Option<O>,
    rng: R,
}

impl<O: GameObserver> SessionBuilder<O, StdRng> {
    /// Starts a builder with an entropy-seeded random source.
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            observer: None,
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeds the random source so the whole game is reproducible.
    pub fn seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }
}

impl<O: GameObserver, R: Rng> SessionBuilder<O, R> {
    /// Sets the observer.
    pub fn observer(mut self, observer: O) -> Self {
        self.observer = Some(observer);
        self
    }

    /// Replaces the random source.
    pub fn rng<R2: Rng>(self, rng: R2) -> SessionBuilder<O, R2> {
        SessionBuilder {
            config: self.config,
            observer: self.observer,
            rng,
        }
    }

    /// Validates the configuration and creates the session.
    ///
    /// The board starts blank; call [`Session::new_game`] to deal.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfiguration` if a parameter is out of range or no
    /// observer was set.
    #[instrument(skip(self), fields(dimension = *self.config.dimension()))]
    pub fn build(self) -> Result<Session<O, R>, EngineError> {
        self.config.validate()?;
        let observer = self
            .observer
            .ok_or_else(|| EngineError::invalid_configuration("an observer is required"))?;

        info!("Creating game session");
        Ok(Session {
            board: Board::new(*self.config.dimension()),
            log: TransitionLog::new(),
            history: History::new(*self.config.max_undos()),
            config: self.config,
            observer,
            rng: self.rng,
            moves: 0,
            previous_high_score: 0,
            started_at: None,
        })
    }
}

/// One game of tzfe.
pub struct Session<O, R = StdRng> {
    config: SessionConfig,
    board: Board,
    log: TransitionLog,
    history: History,
    observer: O,
    rng: R,
    moves: u32,
    previous_high_score: u64,
    started_at: Option<DateTime<Utc>>,
}

impl<O: GameObserver, R: Rng> Session<O, R> {
    /// Deals a fresh board with two 2-tiles.
    ///
    /// `previous_high_score` is the score a personal best must beat.
    #[instrument(skip(self), fields(dimension = self.board.dimension()))]
    pub fn new_game(&mut self, previous_high_score: u64) {
        info!("Starting new game");
        self.previous_high_score = previous_high_score;
        self.board = Board::new(*self.config.dimension());
        self.moves = 1;
        self.started_at = Some(Utc::now());
        self.history.clear();
        self.log.clear();

        for index in 0..self.board.cell_count() {
            self.log.push(Transition::clear(BLANK_TILE, index));
        }
        for _ in 0..2 {
            spawn(
                &mut self.board,
                &mut self.rng,
                *self.config.random_ratio(),
                Some(OPENING_TILE),
                &mut self.log,
            );
        }

        self.history.push(Snapshot::capture(&self.board, GameMove::New, true));
        self.check_invariants();
        self.replay_transitions();
        self.report_outcome(GameMove::New, true);
    }

    /// Pushes the tiles in `direction`.
    ///
    /// Returns true if the board changed and the game goes on. Returns false
    /// for a move that changed nothing, and whenever the board is terminal
    /// after the move, even if the move itself changed it.
    #[instrument(skip(self), fields(moves = self.moves))]
    pub fn action_move(&mut self, direction: Direction) -> bool {
        let score_before = self.board.score();
        self.log.clear();

        let changed = resolve(&mut self.board, direction, &mut self.log);
        if changed {
            self.moves += 1;
            spawn(
                &mut self.board,
                &mut self.rng,
                *self.config.random_ratio(),
                None,
                &mut self.log,
            );
            self.history
                .push(Snapshot::capture(&self.board, direction.into(), true));
            self.check_invariants();
            self.replay_transitions();
        }

        self.report_outcome(direction.into(), changed);

        let score = self.board.score();
        if score != score_before {
            debug!(score, "Score changed");
            self.observer.on_score_changed(score);
        }

        if !self.has_moves_remaining() {
            if self.achieved_target() {
                info!(score, max_tile = self.board.max_tile(), "Game won");
                self.observer.on_win();
            } else {
                info!(score, max_tile = self.board.max_tile(), "Game over");
                self.observer.on_fail();
            }
            if changed && score > self.previous_high_score {
                info!(score, previous = self.previous_high_score, "Personal best");
                self.observer.on_personal_best(score);
            }
            return false;
        }

        changed
    }

    /// Returns the board to the state before the last successful move.
    ///
    /// Returns false, and reports a rejected undo, when no earlier board is
    /// held.
    #[instrument(skip(self), fields(undos = self.history.undos_available()))]
    pub fn go_back_one_move(&mut self) -> bool {
        let Some(snapshot) = self.history.step_back() else {
            warn!("No earlier board to go back to");
            self.observer.on_undo_rejected();
            return false;
        };

        snapshot.restore_into(&mut self.board);
        let game_move = *snapshot.requested_move();
        let succeeded = *snapshot.move_succeeded();
        self.moves = self.moves.saturating_sub(1);

        self.log.clear();
        for (index, &value) in self.board.tiles().iter().enumerate() {
            self.log.push(Transition::reset(value, index));
        }

        debug!(%game_move, score = self.board.score(), "Restored earlier board");
        self.check_invariants();
        self.replay_transitions();
        self.report_outcome(game_move, succeeded);
        true
    }

    /// Checks if any move could still change the board.
    pub fn has_moves_remaining(&self) -> bool {
        rules::has_moves_remaining(&self.board)
    }

    /// Equal neighbours within columns.
    pub fn compact_vertically_hint(&self) -> CompactHint {
        rules::compact_vertically_hint(&self.board)
    }

    /// Equal neighbours within rows.
    pub fn compact_horizontally_hint(&self) -> CompactHint {
        rules::compact_horizontally_hint(&self.board)
    }

    fn replay_transitions(&mut self) {
        for transition in &self.log {
            self.observer.on_tile_transition(transition);
        }
    }

    fn report_outcome(&mut self, game_move: GameMove, succeeded: bool) {
        let outcome = MoveOutcome::new(game_move, self.moves, succeeded, Utc::now());
        self.observer.on_move_outcome(&outcome);
    }

    fn check_invariants(&self) {
        if let Err(violations) = BoardInvariants::check_all(&self.board) {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            error!(%descriptions, board = %self.board.linear(), "Board invariant violated");
            debug_assert!(false, "Board invariant violated: {}", descriptions);
        }
    }
}

impl<O, R> Session<O, R> {
    /// Session parameters.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The live board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Transitions produced by the most recent action.
    pub fn transitions(&self) -> &TransitionLog {
        &self.log
    }

    /// Undo history, current board first.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The observer.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// The observer, mutably.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Move counter. The opening board counts as 1.
    pub fn moves(&self) -> u32 {
        self.moves
    }

    /// Current score.
    pub fn score(&self) -> u64 {
        self.board.score()
    }

    /// Largest tile reached.
    pub fn max_tile(&self) -> u32 {
        self.board.max_tile()
    }

    /// Count of blank cells.
    pub fn num_empty(&self) -> usize {
        self.board.num_empty()
    }

    /// Tile at a flat index, or `None` when out of range.
    pub fn tile(&self, index: usize) -> Option<u32> {
        self.board.tile(index)
    }

    /// High score passed to the last `new_game`.
    pub fn previous_high_score(&self) -> u64 {
        self.previous_high_score
    }

    /// When the current game was dealt.
    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Time since the current game was dealt.
    pub fn elapsed(&self) -> Option<Duration> {
        self.started_at.map(|start| Utc::now() - start)
    }

    /// Checks if the win target has been reached.
    pub fn achieved_target(&self) -> bool {
        rules::is_win(&self.board, *self.config.win_target())
    }
}

impl<O, R> std::fmt::Display for Session<O, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[[[ {} ]]]", self.config.win_target())?;
        writeln!(f, "   Score: {}", self.board.score())?;
        writeln!(f, "Hi-Score: {}", self.previous_high_score)?;
        writeln!(f, "Max Tile: {}", self.board.max_tile())?;
        writeln!(f, "   Moves: {}", self.moves)?;
        let elapsed = self.elapsed().unwrap_or_else(Duration::zero);
        writeln!(f, "    Time: {}", format_elapsed(elapsed))?;
        write!(f, "{}", self.board)
    }
}

/// Renders a duration as `mm:ss`, minutes uncapped.
fn format_elapsed(elapsed: Duration) -> String {
    let seconds = elapsed.num_seconds().max(0);
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
