//! Move ledger: board, history and side to move for one game.

use super::action::{Move, MoveError};
use super::contracts::{Contract, MoveContract};
use super::rules::{BoardStatus, board_status};
use super::{Board, Player, Square};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// One game of tic-tac-toe.
///
/// X always moves first. The board is derived from the history: every
/// accepted move fills exactly one empty square, and rewinding rebuilds the
/// board by replaying the remaining moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub(crate) board: Board,
    pub(crate) history: Vec<Move>,
    pub(crate) to_move: Player,
    pub(crate) status: BoardStatus,
}

impl Game {
    /// Creates an empty game with X to move.
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            history: Vec::new(),
            to_move: Player::X,
            status: BoardStatus::Ongoing,
        }
    }

    /// Replays moves from the empty board.
    ///
    /// # Errors
    ///
    /// Returns the first [`MoveError`] encountered; moves after a terminal
    /// position are rejected with [`MoveError::GameOver`].
    #[instrument(skip(moves), fields(moves = moves.len()))]
    pub fn replay(moves: &[Move]) -> Result<Self, MoveError> {
        let mut game = Self::new();
        for action in moves {
            game.place(*action)?;
        }
        Ok(game)
    }

    /// Places a mark, returning the resulting board status.
    ///
    /// Preconditions are always checked; postconditions only in debug builds.
    /// On error nothing is mutated.
    #[instrument(skip(self), fields(position = ?action.position, player = ?action.player))]
    pub fn place(&mut self, action: Move) -> Result<BoardStatus, MoveError> {
        MoveContract::pre(self, &action)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        self.board
            .set(action.position, Square::Occupied(action.player));
        self.history.push(action);
        self.status = board_status(&self.board);
        if !self.status.is_terminal() {
            self.to_move = self.to_move.opponent();
        }

        #[cfg(debug_assertions)]
        {
            if let Err(e) = MoveContract::post(&before, self) {
                *self = before;
                return Err(e);
            }
        }

        debug!(status = ?self.status, "Move applied");
        Ok(self.status)
    }

    /// Removes the last `count` moves and rebuilds the board from what remains.
    ///
    /// Returns the removed moves, oldest first. `count` is clamped to the
    /// history length.
    #[instrument(skip(self), fields(history = self.history.len()))]
    pub fn rewind(&mut self, count: usize) -> Result<Vec<Move>, MoveError> {
        let keep = self.history.len().saturating_sub(count);
        let removed = self.history[keep..].to_vec();
        *self = Self::replay(&self.history[..keep])?;
        debug!(removed = removed.len(), "Rewound game");
        Ok(removed)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Side to move. After a terminal move this stays on the side that
    /// made it.
    pub fn to_move(&self) -> Player {
        self.to_move
    }

    /// Current board status.
    pub fn status(&self) -> BoardStatus {
        self.status
    }

    /// True once a line is complete or the board is full.
    pub fn is_over(&self) -> bool {
        self.status.is_terminal()
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}
