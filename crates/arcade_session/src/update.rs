//! What the session reports to its collaborators after each mutation.

use super::scoreboard::{MatchResult, Scoreboard};
use arcade_tictactoe::{Board, Move, Player, Position, WinningLine};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How a finished game ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameEnd {
    /// Outcome from the human's point of view.
    pub result: MatchResult,
    /// Side that completed a line, if any.
    pub winner: Option<Player>,
    /// The completed line's three cells, if any.
    pub line: Option<[Position; 3]>,
}

impl GameEnd {
    /// A completed line, credited relative to `human`.
    pub fn won(line: WinningLine, human: Player) -> Self {
        let result = if line.player == human {
            MatchResult::HumanWin
        } else {
            MatchResult::ComputerWin
        };
        Self {
            result,
            winner: Some(line.player),
            line: Some(line.cells),
        }
    }

    /// A full board with no line.
    pub fn draw() -> Self {
        Self {
            result: MatchResult::Draw,
            winner: None,
            line: None,
        }
    }
}

/// Turn state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    /// The human's side is to move.
    AwaitingHumanMove,
    /// The computer's reply is pending.
    AwaitingComputerMove,
    /// A terminal position was reached; only `new_game` moves on.
    GameOver(GameEnd),
}

impl SessionState {
    /// True in `GameOver`.
    pub fn is_over(&self) -> bool {
        matches!(self, SessionState::GameOver(_))
    }
}

/// Handle for a deferred computer move.
///
/// Issued when the computer comes on move. Only the most recently issued
/// ticket of the current game resolves; starting a new game, undoing, or
/// playing the computer's move by other means makes it stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScheduledTurn {
    pub(crate) generation: u64,
    pub(crate) sequence: u64,
    pub(crate) delay: Duration,
}

impl ScheduledTurn {
    /// How long the collaborator should wait before resolving.
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Game the ticket belongs to.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// Which operation produced an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpdateKind {
    /// The human placed a mark.
    HumanMove,
    /// The computer placed a mark.
    ComputerMove,
    /// The last exchange was taken back.
    Undo,
    /// A fresh board was set up.
    NewGame,
    /// Score counters were zeroed.
    ScoresReset,
    /// Read-only view, nothing changed.
    Snapshot,
}

/// Full view of the session after an accepted mutation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUpdate {
    /// Operation that produced this update.
    pub kind: UpdateKind,
    /// Board after the operation.
    pub board: Board,
    /// Moves of the current game, oldest first.
    pub history: Vec<Move>,
    /// Move applied by this operation, if any.
    pub last_move: Option<Move>,
    /// Turn state after the operation.
    pub state: SessionState,
    /// Set only when this operation ended the game.
    pub finished: Option<GameEnd>,
    /// Score counters after the operation.
    pub scoreboard: Scoreboard,
    /// Outstanding computer move, if one is due.
    pub scheduled: Option<ScheduledTurn>,
}

impl SessionUpdate {
    /// Serializes the update as a single JSON line.
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
