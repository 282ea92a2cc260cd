//! Moves and the reasons a move can be declined.

use super::{Player, Position};
use serde::{Deserialize, Serialize};

/// One mark placed on the board. History is a list of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// Side placing the mark.
    pub player: Player,
    /// Cell receiving it.
    pub position: Position,
}

impl Move {
    /// Creates a new move.
    pub fn new(player: Player, position: Position) -> Self {
        Self { player, position }
    }

    /// Side placing the mark.
    pub fn player(&self) -> Player {
        self.player
    }

    /// Cell receiving the mark.
    pub fn position(&self) -> Position {
        self.position
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} takes {}", self.player, self.position.label())
    }
}

/// Reason a move was declined.
///
/// A declined move never mutates the game it was offered to.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The cell index is not on the board.
    #[display("Cell {} is out of bounds (must be 0-8)", _0)]
    OutOfBounds(usize),

    /// The cell already holds a mark.
    #[display("Square {:?} is already occupied", _0)]
    SquareOccupied(Position),

    /// A line is complete or the board is full.
    #[display("Game is already over")]
    GameOver,

    /// The other side is on move.
    #[display("It's not {:?}'s turn", _0)]
    WrongPlayer(Player),

    /// A debug-build postcondition failed; the move was rolled back.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
