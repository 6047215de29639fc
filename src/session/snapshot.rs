//! Presentation view of a session.

use serde::Serialize;

use super::{RoundState, Session, SubmitOutcome};

/// Everything a presentation layer needs to render the session.
///
/// The expected output of the current round only appears through
/// `last_outcome`, i.e. after a guess has been scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSnapshot {
    /// Source text of the loaded round.
    pub puzzle: Option<String>,
    pub round_state: RoundState,
    /// Whether a guess may be submitted now.
    pub can_submit: bool,
    /// Whether a new round may be requested now.
    pub can_advance: bool,
    /// Outcome of the last scored guess in this round.
    pub last_outcome: Option<SubmitOutcome>,
    pub score: i64,
    pub correct_attempts: u32,
    pub total_attempts: u32,
    /// Percentage of correct answers; absent before the first attempt.
    pub accuracy: Option<f64>,
    pub difficulty: u32,
    pub max_difficulty: u32,
}

impl From<&Session> for SessionSnapshot {
    fn from(session: &Session) -> Self {
        let board = session.scoreboard();
        Self {
            puzzle: session.round().map(|r| r.source().to_string()),
            round_state: session.round_state(),
            can_submit: session.can_submit(),
            can_advance: session.can_advance(),
            last_outcome: session.last_outcome().cloned(),
            score: board.score(),
            correct_attempts: board.correct_attempts(),
            total_attempts: board.total_attempts(),
            accuracy: board.accuracy(),
            difficulty: board.difficulty(),
            max_difficulty: board.max_difficulty(),
        }
    }
}
