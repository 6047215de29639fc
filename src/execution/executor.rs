//! Snippet execution engine.

use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};

use super::result::{ExecutionResult, FAULT_MARKER};
use super::SnippetExecutor;
use crate::Result;

/// Default execution timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default interpreter executable.
pub const DEFAULT_INTERPRETER: &str = "python3";

/// Program passed to `-c`. Compiles stdin as `<string>`, runs it in an
/// empty namespace and reports an uncaught `Exception` after [`FAULT_MARKER`].
const BOOTSTRAP: &str = r#"import sys
source = sys.stdin.buffer.read()
try:
    exec(compile(source, '<string>', 'exec'), {})
except Exception as exc:
    sys.stdout.flush()
    sys.stderr.write('\x1fsnippet-quiz-fault\x1f' + (str(exc) or type(exc).__name__))
    sys.stderr.flush()
    sys.exit(1)
"#;

/// Runs snippets in a fresh Python interpreter process.
///
/// Each snippet is piped to a small `python -I -c` bootstrap, so it starts
/// with an empty namespace and no user site-packages or `PYTHON*`
/// environment influence.
#[derive(Debug, Clone)]
pub struct PythonExecutor {
    interpreter: String,
    timeout: Duration,
}

impl PythonExecutor {
    /// Create an executor using [`DEFAULT_INTERPRETER`] and [`DEFAULT_TIMEOUT`].
    pub fn new() -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Set the interpreter executable.
    pub fn interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    /// Set the execution timeout.
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = duration;
        self
    }

    pub fn interpreter_name(&self) -> &str {
        &self.interpreter
    }

    pub fn timeout_duration(&self) -> Duration {
        self.timeout
    }

    /// Run a snippet and collect its output.
    ///
    /// Only spawn and pipe failures are returned as errors; runtime faults
    /// and timeouts are reported through the [`ExecutionResult`].
    pub async fn run(&self, source: &str) -> Result<ExecutionResult> {
        let start = Instant::now();

        let mut child = Command::new(&self.interpreter)
            .arg("-I")
            .arg("-c")
            .arg(BOOTSTRAP)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(source.as_bytes()).await?;
            stdin.shutdown().await?;
        }

        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(output) => output?,
            Err(_) => {
                warn!(timeout = ?self.timeout, "snippet timed out");
                return Ok(ExecutionResult::timeout(self.timeout));
            }
        };

        let mut result = ExecutionResult::new(
            String::from_utf8_lossy(&output.stdout).into_owned(),
            String::from_utf8_lossy(&output.stderr).into_owned(),
            start.elapsed(),
        );
        if let Some(code) = output.status.code() {
            result = result.with_exit_code(code);
        }

        debug!(
            exit_code = ?result.exit_code,
            duration = ?result.duration,
            "snippet finished"
        );
        Ok(result)
    }
}

impl Default for PythonExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SnippetExecutor for PythonExecutor {
    async fn execute(&self, source: &str) -> String {
        match self.run(source).await {
            Ok(result) => result.expected_output(),
            Err(e) => {
                warn!(interpreter = %self.interpreter, error = %e, "failed to run snippet");
                format!("Error executing code: {}", e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_executor_defaults() {
        let executor = PythonExecutor::new();
        assert_eq!(executor.interpreter_name(), "python3");
        assert_eq!(executor.timeout_duration(), Duration::from_secs(10));
    }

    #[test]
    fn test_executor_builder() {
        let executor = PythonExecutor::new()
            .interpreter("/usr/bin/python3.12")
            .timeout(Duration::from_secs(2));

        assert_eq!(executor.interpreter_name(), "/usr/bin/python3.12");
        assert_eq!(executor.timeout_duration(), Duration::from_secs(2));
    }

    #[test]
    fn test_bootstrap_writes_fault_marker() {
        let python_marker = FAULT_MARKER.replace('\u{1f}', "\\x1f");
        assert!(BOOTSTRAP.contains(&python_marker));
    }

    #[tokio::test]
    async fn test_missing_interpreter_is_reported_as_output() {
        let executor = PythonExecutor::new().interpreter("snippet-quiz-no-such-python");
        let output = executor.execute("print(1)").await;
        assert!(output.starts_with("Error executing code: "));
    }

    #[tokio::test]
    #[ignore] // requires python3 on PATH
    async fn test_execute_print() {
        let output = PythonExecutor::new()
            .execute("x = [1, 2, 3]\nprint(sum(x))\n")
            .await;
        assert_eq!(output, "6");
    }

    #[tokio::test]
    #[ignore] // requires python3 on PATH
    async fn test_execute_runtime_fault() {
        let output = PythonExecutor::new()
            .execute("print('before')\nprint(1 / 0)")
            .await;
        assert_eq!(output, "Error: division by zero");
    }

    #[tokio::test]
    #[ignore] // requires python3 on PATH
    async fn test_execute_multiline_exception_message() {
        let output = PythonExecutor::new()
            .execute("raise ValueError('a\\nb')")
            .await;
        assert_eq!(output, "Error: a\nb");
    }

    #[tokio::test]
    #[ignore] // requires python3 on PATH
    async fn test_execute_syntax_error() {
        let output = PythonExecutor::new().execute("print(1 +)").await;
        assert_eq!(output, "Error: invalid syntax (<string>, line 1)");
    }

    #[tokio::test]
    #[ignore] // requires python3 on PATH
    async fn test_execute_exception_without_message() {
        let output = PythonExecutor::new().execute("raise StopIteration").await;
        assert_eq!(output, "Error: StopIteration");
    }

    #[tokio::test]
    #[ignore] // requires python3 on PATH
    async fn test_execute_fresh_namespace() {
        let executor = PythonExecutor::new();
        executor.execute("leak = 5\nprint(leak)").await;
        let output = executor.execute("print(leak)").await;
        assert_eq!(output, "Error: name 'leak' is not defined");
    }

    #[tokio::test]
    #[ignore] // requires python3 on PATH
    async fn test_execute_timeout() {
        let output = PythonExecutor::new()
            .timeout(Duration::from_secs(1))
            .execute("while True:\n    pass\n")
            .await;
        assert_eq!(output, "Error: execution timed out after 1s");
    }
}
