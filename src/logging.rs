//! Logging initialization and configuration.
//!
//! Log lines go to stderr so they never interleave with the quiz on stdout.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when neither `RUST_LOG` nor a configured level is present.
pub const DEFAULT_FILTER: &str = "snippet_quiz=warn";

fn build_filter(level: Option<&str>) -> EnvFilter {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(level, env.as_deref())
}

/// Pick the configured level, then the environment, then [`DEFAULT_FILTER`].
fn filter_from(level: Option<&str>, env: Option<&str>) -> EnvFilter {
    let directive = level
        .filter(|l| !l.trim().is_empty())
        .or_else(|| env.filter(|l| !l.trim().is_empty()))
        .unwrap_or(DEFAULT_FILTER);

    EnvFilter::try_new(directive)
        .or_else(|_| EnvFilter::try_new(format!("snippet_quiz={}", directive)))
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
}

/// Initialize the logging system with an explicit filter directive.
///
/// A bare level such as `debug` applies to every target; pass
/// `snippet_quiz=debug` to scope it. When `level` is `None` the
/// `RUST_LOG` environment variable is consulted, then [`DEFAULT_FILTER`].
///
/// # Panics
///
/// Panics if called more than once, or if another tracing subscriber
/// has already been set.
pub fn init(level: Option<&str>) {
    tracing_subscriber::registry()
        .with(build_filter(level))
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Try to initialize the logging system.
///
/// Returns `Ok(())` if successful, or `Err` if logging has already been
/// initialized.
pub fn try_init() -> Result<(), tracing_subscriber::util::TryInitError> {
    tracing_subscriber::registry()
        .with(build_filter(None))
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(std::io::stderr),
        )
        .try_init()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_try_init_idempotent() {
        let _ = try_init();
        let _ = try_init();
    }

    #[test]
    fn test_logging_works() {
        let _ = try_init();

        tracing::info!(difficulty = 3, "test info message");
        tracing::debug!("test debug message");
        tracing::warn!("test warn message");
    }

    #[test]
    fn test_default_filter_when_unconfigured() {
        assert_eq!(filter_from(None, None).to_string(), DEFAULT_FILTER);
        assert_eq!(filter_from(Some(""), Some(" ")).to_string(), DEFAULT_FILTER);
    }

    #[test]
    fn test_configured_level_beats_env() {
        assert_eq!(filter_from(None, Some("debug")).to_string(), "debug");
        assert_eq!(filter_from(Some("trace"), Some("debug")).to_string(), "trace");
    }

    #[test]
    fn test_build_filter_accepts_bare_level() {
        let filter = build_filter(Some("debug"));
        assert_eq!(filter.to_string(), "debug");
    }

    #[test]
    fn test_build_filter_accepts_directive() {
        let filter = build_filter(Some("snippet_quiz=trace"));
        assert_eq!(filter.to_string(), "snippet_quiz=trace");
    }
}
