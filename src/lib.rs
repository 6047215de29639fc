//! # snippet-quiz
//!
//! Terminal quiz that asks you to predict the output of Python snippets.
//!
//! Each round a text-generation service writes a short program, a local
//! interpreter runs it to capture what it prints, and the player guesses
//! that output. Correct answers score points and raise the difficulty;
//! wrong ones cost points and eventually lower it.
//!
//! ## Features
//!
//! - **Explicit session state**: score, counters, difficulty and round
//!   state live in a [`Session`] value with all-or-nothing operations
//! - **Pluggable collaborators**: [`PuzzleGenerator`] and [`SnippetExecutor`]
//!   traits, with OpenAI-compatible and subprocess Python implementations
//! - **Async I/O**: Non-blocking HTTP and process handling using tokio
//!
//! ## Quick Start
//!
//! ```no_run
//! use snippet_quiz::{GeneratorSettings, OpenAiGenerator, PythonExecutor, QuizEngine};
//!
//! #[tokio::main]
//! async fn main() -> snippet_quiz::Result<()> {
//!     snippet_quiz::logging::try_init().ok();
//!
//!     let generator = OpenAiGenerator::new(GeneratorSettings::new("sk-..."))?;
//!     let mut engine = QuizEngine::new(generator, PythonExecutor::new(), 30);
//!
//!     engine.load_new_round().await?;
//!     if let Some(round) = engine.session().round() {
//!         println!("{}", round.source());
//!     }
//!
//!     let outcome = engine.submit_guess("42")?;
//!     println!("correct: {}", outcome.correct);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod console;
pub mod error;
pub mod execution;
pub mod generator;
pub mod logging;
pub mod session;

// Re-export commonly used types
pub use error::{QuizError, Result};
pub use execution::{ExecutionResult, PythonExecutor, SnippetExecutor};
pub use generator::{GeneratorSettings, OpenAiGenerator, PuzzleGenerator};
pub use session::{
    DifficultyChange, QuizEngine, Round, RoundState, Scoreboard, Session, SessionSnapshot,
    SubmitOutcome,
};
