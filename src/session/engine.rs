//! Quiz engine driving the generator and executor.

use tracing::{info, warn};

use super::{Round, Session, SessionSnapshot, SubmitOutcome};
use crate::error::QuizError;
use crate::execution::SnippetExecutor;
use crate::generator::{strip_code_fences, PuzzleGenerator};
use crate::Result;

/// Owns a [`Session`] and the collaborators that produce its rounds.
///
/// Operations run to completion one at a time; `&mut self` on every
/// mutating call enforces that.
pub struct QuizEngine<G, E> {
    session: Session,
    generator: G,
    executor: E,
}

impl<G, E> QuizEngine<G, E>
where
    G: PuzzleGenerator,
    E: SnippetExecutor,
{
    /// Create an engine with a fresh session. No round is loaded yet.
    pub fn new(generator: G, executor: E, max_difficulty: u32) -> Self {
        Self {
            session: Session::new(max_difficulty),
            generator,
            executor,
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Current presentation view.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::from(&self.session)
    }

    /// Generate, clean and execute a new puzzle, then make it current.
    ///
    /// On failure the session is left exactly as it was.
    pub async fn load_new_round(&mut self) -> Result<()> {
        let difficulty = self.session.scoreboard().difficulty();

        let raw = self.generator.generate(difficulty).await.map_err(|e| {
            warn!(difficulty, error = %e, "puzzle generation failed");
            e
        })?;

        let source = strip_code_fences(&raw);
        if source.is_empty() {
            warn!(difficulty, "generator returned no code");
            return Err(QuizError::Generation(
                "generated text contained no code".into(),
            ));
        }

        let expected_output = self.executor.execute(&source).await;
        info!(difficulty, lines = source.lines().count(), "new round loaded");

        self.session.install_round(Round::new(source, expected_output));
        Ok(())
    }

    /// Score a guess against the current round.
    pub fn submit_guess(&mut self, guess: &str) -> Result<SubmitOutcome> {
        let outcome = self.session.submit_guess(guess)?;
        info!(
            correct = outcome.correct,
            score = self.session.scoreboard().score(),
            difficulty = self.session.scoreboard().difficulty(),
            "guess submitted"
        );
        Ok(outcome)
    }

    /// Move on to a new round after the current one has been scored.
    ///
    /// Also allowed when no round is loaded, which retries a failed load.
    pub async fn advance_round(&mut self) -> Result<()> {
        self.session.ensure_can_advance()?;
        self.load_new_round().await
    }

    /// Restore all counters and difficulty to defaults, then load a round.
    ///
    /// The reset itself always sticks; if the following load fails the
    /// session has no round until [`QuizEngine::advance_round`] succeeds.
    pub async fn reset(&mut self) -> Result<()> {
        self.session.reset();
        info!("session reset");
        self.load_new_round().await
    }
}
