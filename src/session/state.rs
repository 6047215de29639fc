//! Round state machine.

use serde::Serialize;

/// Lifecycle state of the current round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundState {
    /// No guess has been scored for the current round yet.
    #[default]
    AwaitingGuess,
    /// A guess has been scored; the round is closed.
    Submitted,
}

impl RoundState {
    /// Check if transition to target state is valid.
    ///
    /// Valid transitions:
    /// - AwaitingGuess -> Submitted
    /// - Submitted -> AwaitingGuess
    ///
    /// A freshly loaded round always starts in `AwaitingGuess`, which is
    /// handled by [`RoundState::reopen`] rather than a transition.
    pub fn can_transition_to(&self, target: RoundState) -> bool {
        use RoundState::*;
        matches!(
            (*self, target),
            (AwaitingGuess, Submitted) | (Submitted, AwaitingGuess)
        )
    }

    /// Attempt to transition to a new state.
    ///
    /// Returns `Ok(())` if the transition is valid, or an error otherwise.
    pub fn transition_to(
        &mut self,
        target: RoundState,
        operation: &'static str,
    ) -> crate::Result<()> {
        if self.can_transition_to(target) {
            *self = target;
            Ok(())
        } else {
            Err(crate::error::QuizError::InvalidState {
                operation,
                state: *self,
            })
        }
    }

    /// Start a new round regardless of the previous state.
    pub fn reopen(&mut self) {
        *self = RoundState::AwaitingGuess;
    }

    /// Check if a guess may be scored.
    pub fn accepts_guess(&self) -> bool {
        matches!(self, RoundState::AwaitingGuess)
    }
}
