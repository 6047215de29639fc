//! snippet-quiz binary entry point.

use std::process::ExitCode;

use snippet_quiz::cli::{self, Args};
use snippet_quiz::config::Config;
use snippet_quiz::console::Console;
use snippet_quiz::{logging, OpenAiGenerator, QuizEngine};
use tokio::io::BufReader;
use tracing::{error, info};

#[tokio::main]
async fn main() -> ExitCode {
    let args = match cli::parse_args() {
        Ok(args) => args,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!("Try 'snippet-quiz --help' for more information.");
            return ExitCode::from(2);
        }
    };

    if args.help {
        cli::print_help();
        return ExitCode::SUCCESS;
    }
    if args.version {
        cli::print_version();
        return ExitCode::SUCCESS;
    }

    match run(&args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {}", message);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: &Args) -> Result<(), String> {
    let config = Config::load(args).map_err(|e| e.to_string())?;
    logging::init(config.log_filter());

    info!("snippet-quiz v{}", env!("CARGO_PKG_VERSION"));

    let settings = config.to_generator_settings().map_err(|e| e.to_string())?;
    info!(model = %settings.model, base_url = %settings.base_url, "generator configured");
    let generator = OpenAiGenerator::new(settings).map_err(|e| e.to_string())?;
    let executor = config.to_executor();

    let engine = QuizEngine::new(generator, executor, config.game.max_difficulty);
    let mut console = Console::new(engine, config.game.advance);

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();

    tokio::select! {
        result = console.run(stdin, stdout) => {
            result.map_err(|e| {
                error!(error = %e, "quiz loop failed");
                e.to_string()
            })
        }
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted");
            println!();
            Ok(())
        }
    }
}
