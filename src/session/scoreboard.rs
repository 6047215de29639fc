//! Score, attempt counters and adaptive difficulty.

use serde::Serialize;

/// Lowest difficulty level.
pub const MIN_DIFFICULTY: u32 = 1;

/// Default difficulty ceiling.
pub const DEFAULT_MAX_DIFFICULTY: u32 = 30;

/// Points awarded for a correct guess.
pub const CORRECT_POINTS: i64 = 10;

/// Points deducted for a wrong guess.
pub const WRONG_PENALTY: i64 = 5;

/// Every this many correct answers the difficulty goes up by one.
pub const PROMOTION_INTERVAL: u32 = 5;

/// Cumulative wrong answers at which a wrong guess lowers the difficulty.
pub const DEMOTION_THRESHOLD: u32 = 3;

/// A difficulty adjustment caused by a scored guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "direction", content = "level")]
pub enum DifficultyChange {
    /// Difficulty went up to the contained level.
    Increased(u32),
    /// Difficulty went down to the contained level.
    Decreased(u32),
}

/// Effect of scoring a single guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScoreUpdate {
    /// Points added to (or removed from) the score.
    pub score_delta: i64,
    /// Difficulty adjustment, if any.
    pub difficulty_change: Option<DifficultyChange>,
}

/// Cumulative performance for a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Scoreboard {
    score: i64,
    total_attempts: u32,
    correct_attempts: u32,
    difficulty: u32,
    max_difficulty: u32,
}

impl Scoreboard {
    /// Create a fresh scoreboard. A ceiling below 1 is raised to 1.
    pub fn new(max_difficulty: u32) -> Self {
        Self {
            score: 0,
            total_attempts: 0,
            correct_attempts: 0,
            difficulty: MIN_DIFFICULTY,
            max_difficulty: max_difficulty.max(MIN_DIFFICULTY),
        }
    }

    pub fn score(&self) -> i64 {
        self.score
    }

    pub fn total_attempts(&self) -> u32 {
        self.total_attempts
    }

    pub fn correct_attempts(&self) -> u32 {
        self.correct_attempts
    }

    /// Cumulative wrong answers (never reset by a difficulty drop).
    pub fn wrong_attempts(&self) -> u32 {
        self.total_attempts - self.correct_attempts
    }

    pub fn difficulty(&self) -> u32 {
        self.difficulty
    }

    pub fn max_difficulty(&self) -> u32 {
        self.max_difficulty
    }

    /// Percentage of correct answers, or `None` before the first attempt.
    pub fn accuracy(&self) -> Option<f64> {
        if self.total_attempts == 0 {
            None
        } else {
            Some(f64::from(self.correct_attempts) / f64::from(self.total_attempts) * 100.0)
        }
    }

    /// Score one guess.
    ///
    /// A correct guess promotes when the correct count reaches a multiple of
    /// [`PROMOTION_INTERVAL`]. A wrong guess demotes whenever the cumulative
    /// wrong count is at least [`DEMOTION_THRESHOLD`], so once that count is
    /// reached every further wrong guess lowers the difficulty again until
    /// the floor.
    pub fn record(&mut self, correct: bool) -> ScoreUpdate {
        self.total_attempts += 1;

        if correct {
            self.score += CORRECT_POINTS;
            self.correct_attempts += 1;

            let promote = self.correct_attempts % PROMOTION_INTERVAL == 0
                && self.difficulty < self.max_difficulty;
            if promote {
                self.difficulty += 1;
            }

            ScoreUpdate {
                score_delta: CORRECT_POINTS,
                difficulty_change: promote.then_some(DifficultyChange::Increased(self.difficulty)),
            }
        } else {
            self.score -= WRONG_PENALTY;

            let demote =
                self.difficulty > MIN_DIFFICULTY && self.wrong_attempts() >= DEMOTION_THRESHOLD;
            if demote {
                self.difficulty -= 1;
            }

            ScoreUpdate {
                score_delta: -WRONG_PENALTY,
                difficulty_change: demote.then_some(DifficultyChange::Decreased(self.difficulty)),
            }
        }
    }

    /// Restore defaults, keeping the configured ceiling.
    pub fn reset(&mut self) {
        *self = Self::new(self.max_difficulty);
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DIFFICULTY)
    }
}
