//! Configuration management for snippet-quiz.
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. Command-line arguments
//! 2. Environment variables
//! 3. Configuration file (JSON)
//! 4. Default values

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cli::Args;
use crate::execution::{PythonExecutor, DEFAULT_INTERPRETER};
use crate::generator::{GeneratorSettings, DEFAULT_BASE_URL, DEFAULT_MODEL};
use crate::session::DEFAULT_MAX_DIFFICULTY;

/// Application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Puzzle generator configuration.
    pub generator: GeneratorSection,
    /// Snippet executor configuration.
    pub executor: ExecutorSection,
    /// Game rules.
    pub game: GameSection,
    /// Logging configuration.
    pub logging: LoggingSection,
}

/// Puzzle generator section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSection {
    /// OpenAI-compatible API base URL.
    pub base_url: String,
    /// Model name.
    pub model: String,
    /// API key. Usually supplied through the environment instead.
    pub api_key: Option<String>,
    /// Completion token limit.
    pub max_tokens: u32,
    /// Sampling temperature.
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeneratorSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: None,
            max_tokens: 150,
            temperature: 0.7,
            timeout_secs: 60,
        }
    }
}

/// Snippet executor section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecutorSection {
    /// Python interpreter executable.
    pub interpreter: String,
    /// Per-snippet timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for ExecutorSection {
    fn default() -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.to_string(),
            timeout_secs: 10,
        }
    }
}

/// When a new round starts after a guess is scored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdvancePolicy {
    /// The player asks for the next puzzle.
    #[default]
    Manual,
    /// The next puzzle loads right after every scored guess.
    Auto,
}

/// Game rules section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSection {
    /// Highest difficulty level.
    pub max_difficulty: u32,
    /// Round advance policy.
    pub advance: AdvancePolicy,
}

impl Default for GameSection {
    fn default() -> Self {
        Self {
            max_difficulty: DEFAULT_MAX_DIFFICULTY,
            advance: AdvancePolicy::Manual,
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level or filter directive (error, warn, info, debug, trace).
    /// Unset means `RUST_LOG`, then [`crate::logging::DEFAULT_FILTER`].
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
}

impl Config {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        serde_json::from_str(&content).map_err(ConfigError::Json)
    }

    /// Apply environment variable overrides.
    pub fn apply_env(&mut self) {
        if let Ok(url) = std::env::var("SNIPPET_QUIZ_BASE_URL") {
            self.generator.base_url = url;
        }

        if let Ok(model) = std::env::var("SNIPPET_QUIZ_MODEL") {
            self.generator.model = model;
        }

        let key = std::env::var("OPENAI_API_KEY").or_else(|_| std::env::var("OPENAI_KEY"));
        if let Ok(key) = key {
            if !key.is_empty() {
                self.generator.api_key = Some(key);
            }
        }

        if let Ok(python) = std::env::var("SNIPPET_QUIZ_PYTHON") {
            self.executor.interpreter = python;
        }

        if let Ok(max) = std::env::var("SNIPPET_QUIZ_MAX_DIFFICULTY") {
            if let Ok(max) = max.parse() {
                self.game.max_difficulty = max;
            }
        }

        if let Ok(level) = std::env::var("SNIPPET_QUIZ_LOG_LEVEL") {
            self.logging.level = Some(level);
        }
    }

    /// Apply CLI argument overrides.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(ref url) = args.base_url {
            self.generator.base_url = url.clone();
        }

        if let Some(ref model) = args.model {
            self.generator.model = model.clone();
        }

        if let Some(ref key) = args.api_key {
            self.generator.api_key = Some(key.clone());
        }

        if let Some(ref python) = args.python {
            self.executor.interpreter = python.clone();
        }

        if let Some(max) = args.max_difficulty {
            self.game.max_difficulty = max;
        }

        if args.auto_advance {
            self.game.advance = AdvancePolicy::Auto;
        }

        if let Some(ref level) = args.log_level {
            self.logging.level = Some(level.clone());
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game.max_difficulty == 0 {
            return Err(ConfigError::Invalid(
                "game.max_difficulty must be at least 1".into(),
            ));
        }
        if self.generator.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "generator.timeout_secs must be greater than 0".into(),
            ));
        }
        if self.executor.timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "executor.timeout_secs must be greater than 0".into(),
            ));
        }
        if !(0.0..=2.0).contains(&self.generator.temperature) {
            return Err(ConfigError::Invalid(
                "generator.temperature must be between 0 and 2".into(),
            ));
        }
        Ok(())
    }

    /// Load configuration with full priority chain.
    ///
    /// Priority: CLI args > env vars > config file > defaults
    pub fn load(args: &Args) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(ref path) = args.config {
            config = Config::from_file(path)?;
        }

        config.apply_env();
        config.apply_args(args);
        config.validate()?;

        Ok(config)
    }

    /// Convert to connection settings for the puzzle generator.
    pub fn to_generator_settings(&self) -> Result<GeneratorSettings, ConfigError> {
        let api_key = self
            .generator
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(ConfigError::MissingApiKey)?;

        let mut settings = GeneratorSettings::new(api_key);
        settings.base_url = self.generator.base_url.clone();
        settings.model = self.generator.model.clone();
        settings.max_tokens = self.generator.max_tokens;
        settings.temperature = self.generator.temperature;
        settings.timeout = Duration::from_secs(self.generator.timeout_secs);
        settings.max_difficulty = self.game.max_difficulty;
        Ok(settings)
    }

    /// Build the snippet executor.
    pub fn to_executor(&self) -> PythonExecutor {
        PythonExecutor::new()
            .interpreter(self.executor.interpreter.clone())
            .timeout(Duration::from_secs(self.executor.timeout_secs))
    }

    /// Get the log level filter string.
    pub fn log_filter(&self) -> Option<&str> {
        self.logging.level.as_deref()
    }
}

/// Configuration errors.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file.
    Io(std::io::Error),
    /// JSON parsing error.
    Json(serde_json::Error),
    /// No API key in any configuration source.
    MissingApiKey,
    /// A value is out of range.
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "failed to read config file: {}", e),
            Self::Json(e) => write!(f, "failed to parse config file: {}", e),
            Self::MissingApiKey => write!(
                f,
                "no API key configured (set OPENAI_API_KEY or pass --api-key)"
            ),
            Self::Invalid(msg) => write!(f, "invalid configuration: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.generator.model, "gpt-4o");
        assert_eq!(config.generator.max_tokens, 150);
        assert!(config.generator.api_key.is_none());
        assert_eq!(config.executor.interpreter, "python3");
        assert_eq!(config.game.max_difficulty, 30);
        assert_eq!(config.game.advance, AdvancePolicy::Manual);
        assert!(config.log_filter().is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            "generator": {
                "model": "gpt-4o-mini",
                "api_key": "sk-file"
            },
            "game": {
                "max_difficulty": 5,
                "advance": "auto"
            }
        }"#;

        let mut file = NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.generator.model, "gpt-4o-mini");
        assert_eq!(config.generator.api_key.as_deref(), Some("sk-file"));
        assert_eq!(config.generator.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.game.max_difficulty, 5);
        assert_eq!(config.game.advance, AdvancePolicy::Auto);
    }

    #[test]
    fn test_config_bad_json() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{ not json").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }

    #[test]
    fn test_apply_args() {
        let mut config = Config::default();
        let args = Args {
            model: Some("llama3".into()),
            api_key: Some("sk-cli".into()),
            base_url: Some("http://localhost:11434/v1".into()),
            python: Some("python3.12".into()),
            max_difficulty: Some(5),
            auto_advance: true,
            log_level: Some("debug".into()),
            ..Args::default()
        };

        config.apply_args(&args);

        assert_eq!(config.generator.model, "llama3");
        assert_eq!(config.generator.api_key.as_deref(), Some("sk-cli"));
        assert_eq!(config.generator.base_url, "http://localhost:11434/v1");
        assert_eq!(config.executor.interpreter, "python3.12");
        assert_eq!(config.game.max_difficulty, 5);
        assert_eq!(config.game.advance, AdvancePolicy::Auto);
        assert_eq!(config.log_filter(), Some("debug"));
    }

    #[test]
    fn test_validate_rejects_zero_ceiling() {
        let mut config = Config::default();
        config.game.max_difficulty = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.executor.timeout_secs = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_missing_api_key() {
        let mut config = Config::default();
        assert!(matches!(
            config.to_generator_settings(),
            Err(ConfigError::MissingApiKey)
        ));

        config.generator.api_key = Some("   ".into());
        assert!(config.to_generator_settings().is_err());
    }

    #[test]
    fn test_to_generator_settings() {
        let mut config = Config::default();
        config.generator.api_key = Some("sk-test".into());
        config.generator.timeout_secs = 15;
        config.game.max_difficulty = 5;

        let settings = config.to_generator_settings().unwrap();
        assert_eq!(settings.api_key, "sk-test");
        assert_eq!(settings.timeout, Duration::from_secs(15));
        assert_eq!(settings.max_difficulty, 5);
    }

    #[test]
    fn test_to_executor() {
        let mut config = Config::default();
        config.executor.timeout_secs = 3;
        let executor = config.to_executor();
        assert_eq!(executor.interpreter_name(), "python3");
        assert_eq!(executor.timeout_duration(), Duration::from_secs(3));
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        assert!(json.contains("\"max_difficulty\""));
        assert!(json.contains("\"advance\": \"manual\""));
    }
}
