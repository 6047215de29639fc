//! Line-oriented terminal front end.
//!
//! A guess is typed as one or more lines and submitted with a line holding
//! only `.`. An entry whose first line starts with `:` is a command.
//!
//! Escapes keep every answer typeable: a first line starting with `::`
//! loses one colon, and a line made only of dots (`..`, `...`) loses one dot.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::debug;

use crate::config::AdvancePolicy;
use crate::error::QuizError;
use crate::execution::SnippetExecutor;
use crate::generator::PuzzleGenerator;
use crate::session::{DifficultyChange, QuizEngine, RoundState, SessionSnapshot, SubmitOutcome};

/// A line holding only this submits the guess typed so far.
pub const SUBMIT_LINE: &str = ".";

const HELP: &str = "\
Type what the program prints, then a line with a single . to submit.
Blank lines are part of the answer. Start with :: for a literal leading
colon, and type .. for a line that is just a dot.
Commands:
  :next    load the next puzzle
  :reset   reset score, counters and difficulty
  :stats   show your performance
  :help    show this help
  :quit    leave the quiz";

/// One unit of player input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    /// A `:command`, without the colon.
    Command(String),
    /// Guess text; empty when the player just pressed Enter.
    Guess(String),
}

/// Read the next entry, or `None` at end of input.
///
/// End of input also submits a guess in progress.
pub async fn read_entry<R>(lines: &mut Lines<R>) -> std::io::Result<Option<Entry>>
where
    R: AsyncBufRead + Unpin,
{
    let first = match lines.next_line().await? {
        Some(line) => line,
        None => return Ok(None),
    };

    let lead = first.trim_start();
    if !lead.starts_with("::") {
        if let Some(command) = lead.strip_prefix(':') {
            return Ok(Some(Entry::Command(command.trim().to_lowercase())));
        }
    }
    if first.trim() == SUBMIT_LINE {
        return Ok(Some(Entry::Guess(String::new())));
    }

    let mut guess = match lead.strip_prefix(':') {
        Some(rest) if lead.starts_with("::") => rest.to_string(),
        _ => unescape_dots(&first).to_string(),
    };
    while let Some(line) = lines.next_line().await? {
        if line.trim() == SUBMIT_LINE {
            break;
        }
        guess.push('\n');
        guess.push_str(unescape_dots(&line));
    }
    Ok(Some(Entry::Guess(guess)))
}

/// Strip one dot from a line made only of two or more dots.
fn unescape_dots(line: &str) -> &str {
    let trimmed = line.trim();
    if trimmed.len() > 1 && trimmed.bytes().all(|b| b == b'.') {
        &trimmed[1..]
    } else {
        line
    }
}

/// Render a puzzle as a fenced block followed by the prompt.
pub fn render_puzzle(source: &str) -> String {
    format!(
        "\nPuzzle Code\n```python\n{}\n```\n\
         What is the output of the above code? (end with a line containing only .)\n",
        source
    )
}

/// Render the result of a scored guess.
pub fn render_outcome(outcome: &SubmitOutcome) -> String {
    let mut text = if outcome.correct {
        "Correct!\n".to_string()
    } else {
        format!(
            "Incorrect. The correct output was:\n```\n{}\n```\n",
            outcome.expected_output
        )
    };

    match outcome.difficulty_change {
        Some(DifficultyChange::Increased(level)) => {
            text.push_str(&format!(
                "Great job! Increasing difficulty to {}.\n",
                level
            ));
        }
        Some(DifficultyChange::Decreased(level)) => {
            text.push_str(&format!(
                "Let's take it down a notch. Decreasing difficulty to {}.\n",
                level
            ));
        }
        None => {}
    }
    text
}

/// Render the performance summary.
pub fn render_stats(snapshot: &SessionSnapshot) -> String {
    let mut text = format!(
        "Your Performance\n  Score: {}\n  Correct Answers: {}\n  Total Attempts: {}\n",
        snapshot.score, snapshot.correct_attempts, snapshot.total_attempts
    );
    if let Some(accuracy) = snapshot.accuracy {
        text.push_str(&format!("  Accuracy: {:.2}%\n", accuracy));
    }
    text.push_str(&format!(
        "  Current Difficulty Level: {}/{}\n",
        snapshot.difficulty, snapshot.max_difficulty
    ));
    text
}

/// Interactive quiz loop over arbitrary async input and output.
pub struct Console<G, E> {
    engine: QuizEngine<G, E>,
    advance: AdvancePolicy,
}

impl<G, E> Console<G, E>
where
    G: PuzzleGenerator,
    E: SnippetExecutor,
{
    pub fn new(engine: QuizEngine<G, E>, advance: AdvancePolicy) -> Self {
        Self { engine, advance }
    }

    pub fn engine(&self) -> &QuizEngine<G, E> {
        &self.engine
    }

    /// Run until `:quit` or end of input.
    pub async fn run<R, W>(&mut self, input: R, mut output: W) -> crate::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();

        say(&mut output, "Python Output Quiz\nType :help for commands.\n").await?;
        if self.engine.session().round().is_none() {
            let result = self.engine.load_new_round().await;
            self.show_load(&mut output, result).await?;
        }

        while let Some(entry) = read_entry(&mut lines).await? {
            debug!(?entry, "input");
            match entry {
                Entry::Command(command) => {
                    if !self.command(&command, &mut output).await? {
                        break;
                    }
                }
                Entry::Guess(guess) => self.guess(&guess, &mut output).await?,
            }
        }

        say(&mut output, "\nThanks for playing!\n").await?;
        say(&mut output, &render_stats(&self.engine.snapshot())).await?;
        output.flush().await?;
        Ok(())
    }

    /// Handle a command. Returns `false` when the loop should stop.
    async fn command<W>(&mut self, command: &str, output: &mut W) -> crate::Result<bool>
    where
        W: AsyncWrite + Unpin,
    {
        match command {
            "next" | "n" => {
                let result = self.engine.advance_round().await;
                self.show_load(output, result).await?;
            }
            "reset" => {
                let result = self.engine.reset().await;
                say(output, "Game has been reset!\n").await?;
                self.show_load(output, result).await?;
            }
            "stats" | "s" => say(output, &render_stats(&self.engine.snapshot())).await?,
            "help" | "h" | "?" => say(output, &format!("{}\n", HELP)).await?,
            "quit" | "q" | "exit" => return Ok(false),
            other => {
                say(
                    output,
                    &format!("Unknown command ':{}'. Type :help for commands.\n", other),
                )
                .await?
            }
        }
        Ok(true)
    }

    async fn guess<W>(&mut self, guess: &str, output: &mut W) -> crate::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        match self.engine.submit_guess(guess) {
            Ok(outcome) => {
                say(output, &render_outcome(&outcome)).await?;
                say(output, &render_stats(&self.engine.snapshot())).await?;
                match self.advance {
                    AdvancePolicy::Auto => {
                        let result = self.engine.advance_round().await;
                        self.show_load(output, result).await?;
                    }
                    AdvancePolicy::Manual => {
                        say(output, "Type :next for the next puzzle.\n").await?;
                    }
                }
            }
            Err(QuizError::EmptyGuess) => {
                say(output, "Please enter your guess before submitting.\n").await?;
            }
            Err(QuizError::InvalidState {
                state: RoundState::Submitted,
                ..
            }) => {
                say(
                    output,
                    "This puzzle has already been answered. Type :next for a new one.\n",
                )
                .await?;
            }
            Err(QuizError::NoRoundLoaded) => {
                say(output, "No puzzle loaded. Type :next to generate one.\n").await?;
            }
            Err(e) if e.is_rejection() => say(output, &format!("Error: {}\n", e)).await?,
            Err(e) => return Err(e),
        }
        Ok(())
    }

    /// Show the new puzzle, or explain why none was loaded.
    async fn show_load<W>(&self, output: &mut W, result: crate::Result<()>) -> crate::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        match result {
            Ok(()) => {
                if let Some(round) = self.engine.session().round() {
                    say(output, &render_puzzle(round.source())).await?;
                }
            }
            Err(e) if e.is_rejection() => {
                say(output, "Submit an answer before moving on.\n").await?;
            }
            Err(QuizError::Generation(reason)) => {
                say(
                    output,
                    &format!(
                        "Error generating puzzle: {}\nType :next to try again.\n",
                        reason
                    ),
                )
                .await?;
            }
            Err(e) => return Err(e),
        }
        Ok(())
    }
}

async fn say<W>(output: &mut W, text: &str) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.flush().await
}
