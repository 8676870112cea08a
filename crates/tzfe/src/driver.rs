//! Headless game driver: picks moves and feeds them to a session.

use crate::config::DriverConfig;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace};
use tzfe_engine::{
    Direction, EngineError, GameMove, GameObserver, MoveOutcome, Session, SessionBuilder,
    Transition,
};

/// How the driver chooses its next move.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Strategy {
    /// Any direction, skipping the last one if it changed nothing.
    #[default]
    Random,
    /// Prefer the axis whose merges are worth more.
    Hinted,
}

/// Observer that logs callbacks and remembers how the game is going.
#[derive(Debug, Default)]
pub struct DriverObserver {
    last_outcome: Option<MoveOutcome>,
    transitions: usize,
    personal_best: Option<u64>,
    won: bool,
    failed: bool,
}

impl DriverObserver {
    /// The most recent move outcome.
    pub fn last_outcome(&self) -> Option<&MoveOutcome> {
        self.last_outcome.as_ref()
    }

    /// Checks if the game has ended.
    pub fn finished(&self) -> bool {
        self.won || self.failed
    }
}

impl GameObserver for DriverObserver {
    fn on_tile_transition(&mut self, transition: &Transition) {
        trace!(%transition, "Tile transition");
        self.transitions += 1;
    }

    fn on_score_changed(&mut self, score: u64) {
        debug!(score, "Score changed");
    }

    fn on_personal_best(&mut self, score: u64) {
        info!(score, "New personal best");
        self.personal_best = Some(score);
    }

    fn on_win(&mut self) {
        info!("Win target reached");
        self.won = true;
    }

    fn on_fail(&mut self) {
        info!("No more moves possible");
        self.failed = true;
    }

    fn on_undo_rejected(&mut self) {
        debug!("Undo rejected");
    }

    fn on_move_outcome(&mut self, outcome: &MoveOutcome) {
        debug!(%outcome, "Move outcome");
        self.last_outcome = Some(*outcome);
    }
}

/// Result of one driven game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    /// Final score.
    pub score: u64,
    /// Largest tile reached.
    pub max_tile: u32,
    /// Engine move counter at the end.
    pub moves: u32,
    /// Move requests sent, including ones that changed nothing.
    pub requests: u32,
    /// Whether the win target was reached.
    pub won: bool,
    /// Whether the board ended terminal.
    pub finished: bool,
    /// Personal best reported at the end, if any.
    pub personal_best: Option<u64>,
    /// Tile transitions delivered to the observer.
    pub transitions: usize,
    /// Final tiles in index order.
    pub tiles: Vec<u32>,
}

/// Picks the next direction.
///
/// A direction whose last request changed nothing is never picked again
/// straight away.
pub fn pick_move<R: Rng + ?Sized>(
    strategy: Strategy,
    session: &Session<DriverObserver>,
    rng: &mut R,
) -> Direction {
    let blocked = session
        .observer()
        .last_outcome()
        .filter(|outcome| !outcome.succeeded)
        .map(|outcome| outcome.game_move);

    let mut candidates: Vec<Direction> = match strategy {
        Strategy::Random => Direction::ALL.to_vec(),
        Strategy::Hinted => {
            let vertical = session.compact_vertically_hint();
            let horizontal = session.compact_horizontally_hint();
            if vertical.factor > horizontal.factor {
                vec![Direction::Up, Direction::Down]
            } else if horizontal.factor > vertical.factor {
                vec![Direction::Left, Direction::Right]
            } else {
                Direction::ALL.to_vec()
            }
        }
    };
    candidates.retain(|&d| Some(GameMove::from(d)) != blocked);
    if candidates.is_empty() {
        candidates = Direction::ALL
            .into_iter()
            .filter(|&d| Some(GameMove::from(d)) != blocked)
            .collect();
    }

    candidates
        .choose(rng)
        .copied()
        .unwrap_or(Direction::Left)
}

/// Plays one game to the end or to the move limit.
#[instrument(skip(config), fields(dimension = *config.session().dimension(), strategy = %config.strategy()))]
pub fn run_game(config: &DriverConfig) -> Result<(GameSummary, String), EngineError> {
    let builder = SessionBuilder::new(config.session().clone()).observer(DriverObserver::default());
    let (builder, mut picker) = match config.seed() {
        Some(seed) => (builder.seed(*seed), StdRng::seed_from_u64(seed.wrapping_add(1))),
        None => (builder, StdRng::from_entropy()),
    };
    let mut session = builder.build()?;
    session.new_game(*config.previous_high_score());

    let mut requests = 0;
    while requests < *config.max_moves() && !session.observer().finished() {
        let direction = pick_move(*config.strategy(), &session, &mut picker);
        session.action_move(direction);
        requests += 1;
    }

    info!(
        score = session.score(),
        max_tile = session.max_tile(),
        requests,
        "Game finished"
    );

    let observer = session.observer();
    let summary = GameSummary {
        score: session.score(),
        max_tile: session.max_tile(),
        moves: session.moves(),
        requests,
        won: observer.won,
        finished: observer.finished(),
        personal_best: observer.personal_best,
        transitions: observer.transitions,
        tiles: session.board().tiles().to_vec(),
    };
    Ok((summary, session.to_string()))
}
