//! Observer contract the session reports through.
//!
//! Callbacks run synchronously inside `new_game`, `action_move` and
//! `go_back_one_move`, never at any other time.

use crate::action::MoveOutcome;
use crate::transition::Transition;
use serde::{Deserialize, Serialize};

/// Receiver of everything a session reports.
pub trait GameObserver {
    /// A tile operation to render, in emission order.
    fn on_tile_transition(&mut self, transition: &Transition);

    /// The score differs from its value when the action started.
    fn on_score_changed(&mut self, score: u64);

    /// The game ended with a score above the previous high score.
    fn on_personal_best(&mut self, score: u64);

    /// The game ended with the win target reached.
    fn on_win(&mut self);

    /// The game ended without reaching the win target.
    fn on_fail(&mut self);

    /// An undo was asked for with no earlier board to return to.
    fn on_undo_rejected(&mut self);

    /// Result of a move request, reported once per request.
    fn on_move_outcome(&mut self, outcome: &MoveOutcome);
}

impl<O: GameObserver + ?Sized> GameObserver for Box<O> {
    fn on_tile_transition(&mut self, transition: &Transition) {
        (**self).on_tile_transition(transition);
    }

    fn on_score_changed(&mut self, score: u64) {
        (**self).on_score_changed(score);
    }

    fn on_personal_best(&mut self, score: u64) {
        (**self).on_personal_best(score);
    }

    fn on_win(&mut self) {
        (**self).on_win();
    }

    fn on_fail(&mut self) {
        (**self).on_fail();
    }

    fn on_undo_rejected(&mut self) {
        (**self).on_undo_rejected();
    }

    fn on_move_outcome(&mut self, outcome: &MoveOutcome) {
        (**self).on_move_outcome(outcome);
    }
}

/// One observer callback, captured as a value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// `on_tile_transition`.
    Transition(Transition),
    /// `on_score_changed`.
    ScoreChanged(u64),
    /// `on_personal_best`.
    PersonalBest(u64),
    /// `on_win`.
    Win,
    /// `on_fail`.
    Fail,
    /// `on_undo_rejected`.
    UndoRejected,
    /// `on_move_outcome`.
    MoveOutcome(MoveOutcome),
}

/// Observer that records every callback in order.
#[derive(Debug, Clone, Default)]
pub struct EventRecorder {
    events: Vec<GameEvent>,
}

impl EventRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Events in the order they were reported.
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Removes and returns all recorded events.
    pub fn drain(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Recorded transitions only.
    pub fn transitions(&self) -> impl Iterator<Item = &Transition> {
        self.events.iter().filter_map(|e| match e {
            GameEvent::Transition(t) => Some(t),
            _ => None,
        })
    }

    /// Recorded move outcomes only.
    pub fn outcomes(&self) -> impl Iterator<Item = &MoveOutcome> {
        self.events.iter().filter_map(|e| match e {
            GameEvent::MoveOutcome(o) => Some(o),
            _ => None,
        })
    }

    /// Counts events equal to `event`.
    pub fn count(&self, event: &GameEvent) -> usize {
        self.events.iter().filter(|e| *e == event).count()
    }
}

impl GameObserver for EventRecorder {
    fn on_tile_transition(&mut self, transition: &Transition) {
        self.events.push(GameEvent::Transition(*transition));
    }

    fn on_score_changed(&mut self, score: u64) {
        self.events.push(GameEvent::ScoreChanged(score));
    }

    fn on_personal_best(&mut self, score: u64) {
        self.events.push(GameEvent::PersonalBest(score));
    }

    fn on_win(&mut self) {
        self.events.push(GameEvent::Win);
    }

    fn on_fail(&mut self) {
        self.events.push(GameEvent::Fail);
    }

    fn on_undo_rejected(&mut self) {
        self.events.push(GameEvent::UndoRejected);
    }

    fn on_move_outcome(&mut self, outcome: &MoveOutcome) {
        self.events.push(GameEvent::MoveOutcome(*outcome));
    }
}
