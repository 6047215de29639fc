//! Snippet execution.
//!
//! This module provides the executor side of a round:
//! - A [`SnippetExecutor`] trait whose `execute` never fails
//! - A subprocess-based [`PythonExecutor`] with timeout handling
//! - [`ExecutionResult`], which turns a run into the text a player must predict
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use snippet_quiz::execution::{PythonExecutor, SnippetExecutor};
//!
//! # async fn demo() {
//! let executor = PythonExecutor::new().timeout(Duration::from_secs(5));
//! let output = executor.execute("print(sorted('bca'))").await;
//! println!("Output: {}", output);
//! # }
//! ```

mod executor;
mod result;

use async_trait::async_trait;

pub use executor::{PythonExecutor, DEFAULT_INTERPRETER, DEFAULT_TIMEOUT};
pub use result::{ExecutionResult, ERROR_PREFIX, FAULT_MARKER};

/// Runs program source text and reports what it printed.
#[async_trait]
pub trait SnippetExecutor: Send + Sync {
    /// Run `source` in an empty namespace and return its trimmed stdout.
    ///
    /// Faults are never propagated; they come back as text starting with
    /// [`ERROR_PREFIX`].
    async fn execute(&self, source: &str) -> String;
}
