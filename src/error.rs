//! Error types for snippet-quiz.

use thiserror::Error;

use crate::session::RoundState;

/// Main error type for quiz operations.
#[derive(Error, Debug)]
pub enum QuizError {
    /// The puzzle generator failed or returned unusable text.
    #[error("puzzle generation failed: {0}")]
    Generation(String),

    /// A guess was submitted with no content.
    #[error("guess is empty")]
    EmptyGuess,

    /// Operation invoked in a round state that does not allow it.
    #[error("cannot {operation} while round is {state:?}")]
    InvalidState {
        operation: &'static str,
        state: RoundState,
    },

    /// No round has been loaded yet.
    #[error("no round loaded")]
    NoRoundLoaded,

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be turned into a running quiz.
    #[error("configuration error: {0}")]
    Config(String),
}

impl QuizError {
    /// Whether this error is a rejected call rather than a collaborator failure.
    ///
    /// Rejected calls never change session state.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            Self::EmptyGuess | Self::InvalidState { .. } | Self::NoRoundLoaded
        )
    }
}

impl From<reqwest::Error> for QuizError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            Self::Generation("request timed out".into())
        } else {
            Self::Generation(e.to_string())
        }
    }
}

/// Convenience Result type for quiz operations.
pub type Result<T> = std::result::Result<T, QuizError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_display() {
        let err = QuizError::Generation("rate limited".into());
        assert!(err.to_string().contains("generation failed"));
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn test_invalid_state_display() {
        let err = QuizError::InvalidState {
            operation: "submit a guess",
            state: RoundState::Submitted,
        };
        assert_eq!(
            err.to_string(),
            "cannot submit a guess while round is Submitted"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdin closed");
        let quiz_err: QuizError = io_err.into();
        assert!(matches!(quiz_err, QuizError::Io(_)));
        assert!(quiz_err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_is_rejection() {
        assert!(QuizError::EmptyGuess.is_rejection());
        assert!(QuizError::NoRoundLoaded.is_rejection());
        assert!(QuizError::InvalidState {
            operation: "advance",
            state: RoundState::AwaitingGuess,
        }
        .is_rejection());
        assert!(!QuizError::Generation("boom".into()).is_rejection());
        assert!(!QuizError::Config("missing key".into()).is_rejection());
    }
}
