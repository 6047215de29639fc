//! Session value: scoreboard, current round and round state.

use tracing::debug;

use super::{Round, RoundState, Scoreboard, SubmitOutcome};
use crate::error::QuizError;
use crate::Result;

/// All state belonging to one player's quiz session.
///
/// Every operation either commits all of its changes or returns an error
/// without touching any field.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    scoreboard: Scoreboard,
    round: Option<Round>,
    round_state: RoundState,
    last_outcome: Option<SubmitOutcome>,
}

impl Session {
    /// Create a new session with the given difficulty ceiling.
    pub fn new(max_difficulty: u32) -> Self {
        Self {
            scoreboard: Scoreboard::new(max_difficulty),
            round: None,
            round_state: RoundState::AwaitingGuess,
            last_outcome: None,
        }
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    /// The currently loaded round, if any.
    pub fn round(&self) -> Option<&Round> {
        self.round.as_ref()
    }

    pub fn round_state(&self) -> RoundState {
        self.round_state
    }

    /// Outcome of the last scored guess in the current round.
    pub fn last_outcome(&self) -> Option<&SubmitOutcome> {
        self.last_outcome.as_ref()
    }

    /// Whether a guess may be submitted right now.
    pub fn can_submit(&self) -> bool {
        self.round.is_some() && self.round_state.accepts_guess()
    }

    /// Whether the session may move on to a new round.
    pub fn can_advance(&self) -> bool {
        self.round.is_none() || self.round_state.can_transition_to(RoundState::AwaitingGuess)
    }

    /// Replace the current round with a freshly generated one.
    pub fn install_round(&mut self, round: Round) {
        self.round = Some(round);
        self.round_state.reopen();
        self.last_outcome = None;
    }

    /// Score a guess against the current round.
    pub fn submit_guess(&mut self, guess: &str) -> Result<SubmitOutcome> {
        let round = self.round.as_ref().ok_or(QuizError::NoRoundLoaded)?;

        if !self.round_state.accepts_guess() {
            return Err(QuizError::InvalidState {
                operation: "submit a guess",
                state: self.round_state,
            });
        }

        let guess = guess.trim();
        if guess.is_empty() {
            return Err(QuizError::EmptyGuess);
        }

        let correct = round.matches(guess);
        let expected_output = round.expected_output().to_string();
        self.round_state
            .transition_to(RoundState::Submitted, "submit a guess")?;
        let update = self.scoreboard.record(correct);

        debug!(
            correct,
            score = self.scoreboard.score(),
            difficulty = self.scoreboard.difficulty(),
            "guess scored"
        );

        let outcome = SubmitOutcome {
            correct,
            guess: guess.to_string(),
            expected_output,
            score_delta: update.score_delta,
            difficulty_change: update.difficulty_change,
        };
        self.last_outcome = Some(outcome.clone());
        Ok(outcome)
    }

    /// Reject advancing while the current round still awaits a guess.
    pub fn ensure_can_advance(&self) -> Result<()> {
        if self.can_advance() {
            Ok(())
        } else {
            Err(QuizError::InvalidState {
                operation: "advance to the next round",
                state: self.round_state,
            })
        }
    }

    /// Restore defaults and drop the current round.
    pub fn reset(&mut self) {
        self.scoreboard.reset();
        self.round = None;
        self.round_state.reopen();
        self.last_outcome = None;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(super::DEFAULT_MAX_DIFFICULTY)
    }
}
