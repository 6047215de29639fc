//! Quiz session management.
//!
//! This module provides the round state machine, the scoreboard with its
//! adaptive difficulty rules, and the engine that drives the puzzle
//! generator and snippet executor.

mod engine;
mod quiz;
mod round;
mod scoreboard;
mod snapshot;
mod state;

pub use engine::QuizEngine;
pub use quiz::Session;
pub use round::{Round, SubmitOutcome};
pub use scoreboard::{
    DifficultyChange, ScoreUpdate, Scoreboard, CORRECT_POINTS, DEFAULT_MAX_DIFFICULTY,
    DEMOTION_THRESHOLD, MIN_DIFFICULTY, PROMOTION_INTERVAL, WRONG_PENALTY,
};
pub use snapshot::SessionSnapshot;
pub use state::RoundState;
