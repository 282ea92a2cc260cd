//! Command-line interface for the arcade binary.

use arcade_session::Difficulty;
use arcade_tictactoe::Player;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Arcade - tic-tac-toe against a minimax opponent
#[derive(Parser, Debug)]
#[command(name = "arcade")]
#[command(about = "Play tic-tac-toe against the computer", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Session config file (TOML). Flags override its values.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Computer strength: random, mixed or optimal
    #[arg(short, long)]
    pub difficulty: Option<Difficulty>,

    /// Side the human plays
    #[arg(short, long, value_enum)]
    pub side: Option<Side>,

    /// Pause before each computer reply, in milliseconds
    #[arg(long)]
    pub delay_ms: Option<u64>,

    /// Pause before the computer's opening move when it plays X, in milliseconds
    #[arg(long)]
    pub opening_delay_ms: Option<u64>,

    /// Seed for reproducible computer choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Print every update as one JSON object per line
    #[arg(long)]
    pub json: bool,
}

/// Side selectable from the command line.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    /// Move first
    X,
    /// Move second
    O,
}

impl From<Side> for Player {
    fn from(side: Side) -> Self {
        match side {
            Side::X => Player::X,
            Side::O => Player::O,
        }
    }
}
