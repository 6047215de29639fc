//! Command-line interface for snippet-quiz.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Model name (overrides config file).
    pub model: Option<String>,
    /// API key (overrides config file and environment).
    pub api_key: Option<String>,
    /// API base URL (overrides config file).
    pub base_url: Option<String>,
    /// Python interpreter executable.
    pub python: Option<String>,
    /// Difficulty ceiling.
    pub max_difficulty: Option<u32>,
    /// Load the next puzzle right after every answer.
    pub auto_advance: bool,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('c') | Long("config") => {
                result.config = Some(parser.value()?.parse()?);
            }
            Short('m') | Long("model") => {
                result.model = Some(parser.value()?.parse()?);
            }
            Short('k') | Long("api-key") => {
                result.api_key = Some(parser.value()?.parse()?);
            }
            Long("base-url") => {
                result.base_url = Some(parser.value()?.parse()?);
            }
            Long("python") => {
                result.python = Some(parser.value()?.parse()?);
            }
            Short('d') | Long("max-difficulty") => {
                let value: String = parser.value()?.parse()?;
                let max: u32 = value
                    .parse()
                    .map_err(|_| ArgsError::InvalidValue("max-difficulty", value.clone()))?;
                if max == 0 {
                    return Err(ArgsError::InvalidValue("max-difficulty", value));
                }
                result.max_difficulty = Some(max);
            }
            Long("auto-advance") => {
                result.auto_advance = true;
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Value(val) => {
                return Err(ArgsError::UnexpectedArgument(val.to_string_lossy().into()));
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Print help message.
pub fn print_help() {
    let version = env!("CARGO_PKG_VERSION");
    println!(
        r#"snippet-quiz {version}
Predict the output of generated Python snippets

USAGE:
    snippet-quiz [OPTIONS]

OPTIONS:
    -c, --config <FILE>          Path to configuration file (JSON)
    -m, --model <NAME>           Model used to generate puzzles [default: gpt-4o]
    -k, --api-key <KEY>          API key for the completion endpoint
        --base-url <URL>         OpenAI-compatible API base URL
        --python <EXE>           Python interpreter [default: python3]
    -d, --max-difficulty <N>     Highest difficulty level [default: 30]
        --auto-advance           Load the next puzzle right after each answer
    -l, --log-level <LVL>        Log level (error, warn, info, debug, trace)
    -h, --help                   Print help
    -V, --version                Print version

ENVIRONMENT VARIABLES:
    OPENAI_API_KEY               API key (OPENAI_KEY is also accepted)
    SNIPPET_QUIZ_BASE_URL        API base URL (overrides config)
    SNIPPET_QUIZ_MODEL           Model name (overrides config)
    SNIPPET_QUIZ_PYTHON          Python interpreter (overrides config)
    SNIPPET_QUIZ_MAX_DIFFICULTY  Difficulty ceiling (overrides config)
    SNIPPET_QUIZ_LOG_LEVEL       Log level (overrides config)
    RUST_LOG                     Alternative log level setting

EXAMPLES:
    # Start with defaults
    OPENAI_API_KEY=sk-... snippet-quiz

    # Short game on a 1-5 scale with automatic rounds
    snippet-quiz -d 5 --auto-advance

    # Use a local OpenAI-compatible server
    snippet-quiz --base-url http://localhost:11434/v1 -m llama3 -k unused
"#
    );
}

/// Print version.
pub fn print_version() {
    println!("snippet-quiz {}", env!("CARGO_PKG_VERSION"));
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// Unexpected positional argument.
    UnexpectedArgument(String),
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for --{}: '{}'", name, value)
            }
            Self::UnexpectedArgument(arg) => {
                write!(f, "unexpected argument: '{}'", arg)
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
