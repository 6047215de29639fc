//! Execution result types.

use std::time::Duration;

/// Prefix placed in front of every runtime fault description.
pub const ERROR_PREFIX: &str = "Error: ";

/// Written to stderr right before the message of an uncaught exception.
pub const FAULT_MARKER: &str = "\u{1f}snippet-quiz-fault\u{1f}";

/// Result of running one snippet.
#[derive(Debug, Clone, Default)]
pub struct ExecutionResult {
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error.
    pub stderr: String,
    /// Exit code (if the process completed).
    pub exit_code: Option<i32>,
    /// Execution duration.
    pub duration: Duration,
    /// Whether execution timed out.
    pub timed_out: bool,
}

impl ExecutionResult {
    /// Create a new execution result.
    pub fn new(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            stdout,
            stderr,
            exit_code: None,
            duration,
            timed_out: false,
        }
    }

    /// Create a result indicating timeout.
    pub fn timeout(duration: Duration) -> Self {
        Self {
            duration,
            timed_out: true,
            ..Self::default()
        }
    }

    /// Set the exit code.
    pub fn with_exit_code(mut self, code: i32) -> Self {
        self.exit_code = Some(code);
        self
    }

    /// Check if the snippet ran to completion (exit code 0).
    pub fn success(&self) -> bool {
        !self.timed_out && self.exit_code == Some(0)
    }

    /// Get stdout, trimmed.
    pub fn output_trimmed(&self) -> &str {
        self.stdout.trim()
    }

    /// Description of the runtime fault.
    ///
    /// An uncaught exception is reported by the bootstrap as
    /// [`FAULT_MARKER`] followed by `str(exc)`, or the exception name when
    /// the message is empty. Anything else falls back to the last stderr
    /// line or the exit status.
    pub fn fault_description(&self) -> String {
        if self.timed_out {
            return format!("execution timed out after {}s", self.duration.as_secs());
        }

        if let Some((_, message)) = self.stderr.rsplit_once(FAULT_MARKER) {
            return message.to_string();
        }

        let last_line = self
            .stderr
            .lines()
            .map(str::trim)
            .rev()
            .find(|line| !line.is_empty());

        match (last_line, self.exit_code) {
            (Some(line), _) => line.to_string(),
            (None, Some(code)) => format!("exit status {}", code),
            (None, None) => "terminated by signal".to_string(),
        }
    }

    /// The text a player has to predict for this run.
    ///
    /// Trimmed stdout on success, otherwise [`ERROR_PREFIX`] followed by the
    /// fault description. Output printed before a fault is discarded.
    pub fn expected_output(&self) -> String {
        if self.success() {
            self.output_trimmed().to_string()
        } else {
            format!("{}{}", ERROR_PREFIX, self.fault_description())
        }
    }
}
