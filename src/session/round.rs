//! Round data and submission outcomes.

use serde::Serialize;

use super::DifficultyChange;

/// One generated puzzle together with its captured output.
///
/// Both fields are set at construction so a round's expected output always
/// belongs to its source text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Round {
    source: String,
    expected_output: String,
}

impl Round {
    /// Create a round from plain source text and the executor's output.
    pub fn new(source: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            expected_output: expected_output.into(),
        }
    }

    /// Plain source text shown to the player.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Captured output the guess is compared against.
    pub fn expected_output(&self) -> &str {
        &self.expected_output
    }

    /// Compare a guess against the expected output.
    ///
    /// Only the guess is trimmed; the stored output is compared as-is.
    pub fn matches(&self, guess: &str) -> bool {
        guess.trim() == self.expected_output
    }
}

/// Result of a scored guess.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubmitOutcome {
    /// Whether the guess matched.
    pub correct: bool,
    /// The guess as submitted, trimmed.
    pub guess: String,
    /// The round's expected output.
    pub expected_output: String,
    /// Points added to or removed from the score.
    pub score_delta: i64,
    /// Difficulty adjustment caused by this guess.
    pub difficulty_change: Option<DifficultyChange>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_accessors() {
        let round = Round::new("print(6 * 7)", "42");
        assert_eq!(round.source(), "print(6 * 7)");
        assert_eq!(round.expected_output(), "42");
    }

    #[test]
    fn test_matches_trims_guess() {
        let round = Round::new("print(6 * 7)", "42");
        assert!(round.matches("42"));
        assert!(round.matches("  42\n"));
        assert!(!round.matches("4 2"));
        assert!(!round.matches("43"));
    }

    #[test]
    fn test_matches_multiline() {
        let round = Round::new("print(1)\nprint(2)", "1\n2");
        assert!(round.matches("1\n2\n"));
        assert!(!round.matches("1 2"));
    }

    #[test]
    fn test_matches_error_output() {
        let round = Round::new("print(1 / 0)", "Error: division by zero");
        assert!(round.matches("Error: division by zero"));
    }
}
