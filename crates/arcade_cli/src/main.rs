//! Arcade - terminal tic-tac-toe against the computer.
//!
//! Reads one command per line from stdin and renders every session update
//! to stdout, as text or as JSON lines.

#![warn(missing_docs)]

mod cli;
mod commands;

use anyhow::{Context, Result};
use arcade_session::{
    GameSession, MatchResult, SessionConfig, SessionDriver, SessionState, SessionUpdate,
};
use clap::Parser;
use cli::Cli;
use commands::{HELP, Input};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = build_config(&cli)?;
    run(config, cli.json).await
}

/// Reads the config file, if any, and applies flag overrides on top.
#[instrument(skip(cli))]
fn build_config(cli: &Cli) -> Result<SessionConfig> {
    let mut config = match &cli.config {
        Some(path) => SessionConfig::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => SessionConfig::default(),
    };

    if let Some(difficulty) = cli.difficulty {
        config = config.with_difficulty(difficulty);
    }
    if let Some(side) = cli.side {
        config = config.with_human(side.into());
    }
    if let Some(delay) = cli.delay_ms {
        config = config.with_think_delay_ms(delay);
    }
    if let Some(delay) = cli.opening_delay_ms {
        config = config.with_opening_delay_ms(delay);
    }
    if cli.seed.is_some() {
        config = config.with_seed(cli.seed);
    }
    Ok(config)
}

/// Plays until `quit` or end of input.
async fn run(config: SessionConfig, json: bool) -> Result<()> {
    info!(human = %config.human(), difficulty = %config.difficulty(), "Starting arcade session");

    let mut human = *config.human();
    let (mut driver, mut updates) = SessionDriver::start(GameSession::from_config(&config)).await;

    let printer = tokio::spawn(async move {
        loop {
            match updates.recv().await {
                Ok(update) => render(&update, json),
                Err(RecvError::Lagged(skipped)) => warn!(skipped, "Display fell behind"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    if !json {
        println!("{HELP}\n");
    }
    render(&driver.snapshot().await, json);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let input = match commands::parse(line) {
            Ok(input) => input,
            Err(reason) => {
                println!("{reason} (type `help` for commands)");
                continue;
            }
        };

        match input {
            Input::Play(cell) => {
                if let Err(e) = driver.submit_human_move(cell).await {
                    println!("Move declined: {e}");
                }
            }
            Input::Undo => {
                if let Err(e) = driver.undo_last_exchange().await {
                    println!("Undo declined: {e}");
                }
            }
            Input::New(side) => {
                human = side.unwrap_or(human);
                driver.new_game(human).await;
            }
            Input::Reset => {
                driver.reset_scores().await;
            }
            Input::Difficulty(difficulty) => {
                driver.set_difficulty(difficulty).await;
                println!("Difficulty set to {difficulty}");
            }
            Input::Hurry => {
                if driver.play_pending_now().await.is_none() {
                    println!("The computer is not thinking");
                }
            }
            Input::Show => render(&driver.snapshot().await, json),
            Input::Help => println!("{HELP}"),
            Input::Quit => break,
        }
    }

    drop(driver);
    printer.await?;
    info!("Session closed");
    Ok(())
}

fn render(update: &SessionUpdate, json: bool) {
    if json {
        match update.to_json_line() {
            Ok(line) => println!("{line}"),
            Err(e) => warn!(error = %e, "Failed to encode update"),
        }
        return;
    }

    if let Some(mv) = update.last_move {
        println!("{mv}");
    }
    println!("{}", update.board.display());
    println!("{}", status_line(update));

    let score = update.scoreboard;
    println!(
        "You {} - {} Computer, {} drawn\n",
        score.human_wins(),
        score.computer_wins(),
        score.draws()
    );
}

fn status_line(update: &SessionUpdate) -> String {
    match update.state {
        SessionState::AwaitingHumanMove => "Your move.".to_string(),
        SessionState::AwaitingComputerMove => "Computer is thinking...".to_string(),
        SessionState::GameOver(end) => {
            let outcome = match end.result {
                MatchResult::HumanWin => "You win!",
                MatchResult::ComputerWin => "Computer wins.",
                MatchResult::Draw => "Draw.",
            };
            match end.line {
                Some(cells) => {
                    let cells: Vec<_> = cells.iter().map(|c| c.to_index().to_string()).collect();
                    format!("{outcome} Line {}. Type `new` to play again.", cells.join("-"))
                }
                None => format!("{outcome} Type `new` to play again."),
            }
        }
    }
}
