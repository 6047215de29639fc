//! Puzzle generation.
//!
//! A [`PuzzleGenerator`] turns a difficulty level into program source text.
//! The text may still carry Markdown code fences; callers strip them with
//! [`strip_code_fences`] before running it.
//!
//! # Example
//!
//! ```no_run
//! use snippet_quiz::generator::{GeneratorSettings, OpenAiGenerator, PuzzleGenerator};
//!
//! # async fn demo() -> snippet_quiz::Result<()> {
//! let settings = GeneratorSettings::new("sk-...");
//! let generator = OpenAiGenerator::new(settings)?;
//! let text = generator.generate(3).await?;
//! println!("{}", snippet_quiz::generator::strip_code_fences(&text));
//! # Ok(())
//! # }
//! ```

mod fence;
mod openai;
mod prompt;

use async_trait::async_trait;

pub use fence::strip_code_fences;
pub use openai::{GeneratorSettings, OpenAiGenerator, DEFAULT_BASE_URL, DEFAULT_MODEL};
pub use prompt::{system_prompt, user_prompt};

use crate::Result;

/// Source of puzzle programs.
#[async_trait]
pub trait PuzzleGenerator: Send + Sync {
    /// Produce program source text for the given difficulty.
    ///
    /// Fails with [`crate::QuizError::Generation`] when no usable text
    /// could be obtained.
    async fn generate(&self, difficulty: u32) -> Result<String>;
}
