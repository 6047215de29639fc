//! CLI integration tests.
//!
//! These tests verify the CLI argument parsing and configuration loading.

use std::ffi::OsString;
use std::io::Write;
use tempfile::NamedTempFile;

use snippet_quiz::cli::{parse_args_from, Args};
use snippet_quiz::config::{AdvancePolicy, Config, ConfigError};

fn args(args: &[&str]) -> Vec<OsString> {
    std::iter::once("snippet-quiz")
        .chain(args.iter().copied())
        .map(OsString::from)
        .collect()
}

// ============================================================================
// CLI Argument Tests
// ============================================================================

#[test]
fn test_cli_defaults() {
    let result = parse_args_from(args(&[])).unwrap();

    assert!(result.config.is_none());
    assert!(result.api_key.is_none());
    assert!(result.model.is_none());
    assert!(result.max_difficulty.is_none());
    assert!(!result.auto_advance);
}

#[test]
fn test_cli_full_options() {
    let result = parse_args_from(args(&[
        "-m",
        "gpt-4o-mini",
        "-k",
        "sk-cli",
        "-d",
        "5",
        "-l",
        "debug",
        "--auto-advance",
        "--python",
        "python3.11",
    ]))
    .unwrap();

    assert_eq!(result.model.as_deref(), Some("gpt-4o-mini"));
    assert_eq!(result.api_key.as_deref(), Some("sk-cli"));
    assert_eq!(result.max_difficulty, Some(5));
    assert_eq!(result.log_level.as_deref(), Some("debug"));
    assert_eq!(result.python.as_deref(), Some("python3.11"));
    assert!(result.auto_advance);
}

#[test]
fn test_cli_config_file() {
    let result = parse_args_from(args(&["-c", "/etc/snippet-quiz.json"])).unwrap();

    assert_eq!(
        result.config.unwrap().to_str().unwrap(),
        "/etc/snippet-quiz.json"
    );
}

#[test]
fn test_cli_invalid_difficulty() {
    assert!(parse_args_from(args(&["--max-difficulty", "many"])).is_err());
}

// ============================================================================
// Configuration Loading Tests
// ============================================================================

#[test]
fn test_config_from_json_file() {
    let json = r#"{
        "generator": {
            "base_url": "http://localhost:11434/v1",
            "model": "llama3",
            "api_key": "local",
            "max_tokens": 200,
            "temperature": 0.2,
            "timeout_secs": 30
        },
        "executor": {
            "interpreter": "python3.12",
            "timeout_secs": 4
        },
        "game": {
            "max_difficulty": 5,
            "advance": "auto"
        },
        "logging": {
            "level": "debug"
        }
    }"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let config = Config::from_file(file.path()).unwrap();

    assert_eq!(config.generator.base_url, "http://localhost:11434/v1");
    assert_eq!(config.generator.model, "llama3");
    assert_eq!(config.generator.max_tokens, 200);
    assert_eq!(config.generator.timeout_secs, 30);
    assert_eq!(config.executor.interpreter, "python3.12");
    assert_eq!(config.executor.timeout_secs, 4);
    assert_eq!(config.game.max_difficulty, 5);
    assert_eq!(config.game.advance, AdvancePolicy::Auto);
    assert_eq!(config.logging.level.as_deref(), Some("debug"));
}

#[test]
fn test_config_priority_cli_over_file() {
    let json = r#"{
        "generator": { "model": "from-file", "api_key": "sk-file" },
        "game": { "max_difficulty": 5 }
    }"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let args = Args {
        config: Some(file.path().to_path_buf()),
        model: Some("from-cli".into()),
        api_key: Some("sk-cli".into()),
        max_difficulty: Some(12),
        ..Args::default()
    };

    let config = Config::load(&args).unwrap();

    assert_eq!(config.generator.model, "from-cli");
    assert_eq!(config.generator.api_key.as_deref(), Some("sk-cli"));
    assert_eq!(config.game.max_difficulty, 12);
}

#[test]
fn test_config_invalid_file_value_rejected() {
    let json = r#"{ "game": { "max_difficulty": 0 } }"#;

    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();

    let args = Args {
        config: Some(file.path().to_path_buf()),
        ..Args::default()
    };

    assert!(matches!(Config::load(&args), Err(ConfigError::Invalid(_))));
}

#[test]
fn test_config_missing_file() {
    let args = Args {
        config: Some("/nonexistent/snippet-quiz.json".into()),
        ..Args::default()
    };

    assert!(matches!(Config::load(&args), Err(ConfigError::Io(_))));
}

#[test]
fn test_config_to_generator_settings() {
    let args = Args {
        api_key: Some("sk-test".into()),
        base_url: Some("http://127.0.0.1:9/v1/".into()),
        max_difficulty: Some(5),
        ..Args::default()
    };

    let config = Config::load(&args).unwrap();
    let settings = config.to_generator_settings().unwrap();

    assert_eq!(settings.api_key, "sk-test");
    assert_eq!(settings.endpoint(), "http://127.0.0.1:9/v1/chat/completions");
    assert_eq!(settings.max_difficulty, 5);
}

// ============================================================================
// Configuration Serialization Tests
// ============================================================================

#[test]
fn test_config_roundtrip() {
    let original = Config::default();
    let json = serde_json::to_string(&original).unwrap();
    let loaded: Config = serde_json::from_str(&json).unwrap();

    assert_eq!(original.generator.model, loaded.generator.model);
    assert_eq!(original.game.max_difficulty, loaded.game.max_difficulty);
    assert_eq!(original.game.advance, loaded.game.advance);
}

#[test]
fn test_config_partial_deserialization() {
    let json = r#"{"game": {"max_difficulty": 5}}"#;
    let config: Config = serde_json::from_str(json).unwrap();

    assert_eq!(config.game.max_difficulty, 5);
    assert_eq!(config.game.advance, AdvancePolicy::Manual);
    assert_eq!(config.executor.interpreter, "python3");
}
