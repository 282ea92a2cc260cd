//! Win/loss/draw tallies across games.

use serde::{Deserialize, Serialize};

/// Result of a finished game from the human's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    /// The human completed a line.
    HumanWin,
    /// The computer completed a line.
    ComputerWin,
    /// Full board, no line.
    Draw,
}

/// Session-wide score counters. Survive `new_game`, cleared by `reset`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scoreboard {
    human_wins: u32,
    computer_wins: u32,
    draws: u32,
}

impl Scoreboard {
    /// All counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Games won by the human.
    pub fn human_wins(&self) -> u32 {
        self.human_wins
    }

    /// Games won by the computer.
    pub fn computer_wins(&self) -> u32 {
        self.computer_wins
    }

    /// Drawn games.
    pub fn draws(&self) -> u32 {
        self.draws
    }

    /// Games recorded since the last reset.
    pub fn games_played(&self) -> u32 {
        self.human_wins
            .saturating_add(self.computer_wins)
            .saturating_add(self.draws)
    }

    /// Increments the counter for `result`.
    pub fn record(&mut self, result: MatchResult) {
        let counter = match result {
            MatchResult::HumanWin => &mut self.human_wins,
            MatchResult::ComputerWin => &mut self.computer_wins,
            MatchResult::Draw => &mut self.draws,
        };
        *counter = counter.saturating_add(1);
    }

    /// Zeroes all counters.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
