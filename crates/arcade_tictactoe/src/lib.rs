//! Tic-tac-toe rules and opponent search.
//!
//! This crate holds the pure, synchronous part of the arcade: the board,
//! the move ledger, terminal detection and the exhaustive minimax used by
//! the computer opponent. Nothing here sleeps, draws randomness or logs
//! above `debug`.
//!
//! # Example
//!
//! ```
//! use arcade_tictactoe::{best_move, Board, Player, Position, Square};
//!
//! let mut board = Board::new();
//! board.set(Position::TopLeft, Square::Occupied(Player::X));
//! board.set(Position::TopCenter, Square::Occupied(Player::X));
//! board.set(Position::Center, Square::Occupied(Player::O));
//!
//! let reply = best_move(&board, Player::O).expect("board has empty cells");
//! assert_eq!(reply.position(), Position::TopRight);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod contracts;
mod game;
mod invariants;
mod position;
mod rules;
mod search;
mod types;

pub use action::{Move, MoveError};
pub use contracts::{Contract, LegalMove, MoveContract, PlayersTurn, SquareIsEmpty};
pub use game::Game;
pub use invariants::{
    AlternatingTurnInvariant, HistoryConsistentInvariant, Invariant, InvariantSet,
    InvariantViolation, TicTacToeInvariants,
};
pub use position::Position;
pub use rules::{BoardStatus, LINES, WinningLine, board_status, is_full, winning_line};
pub use search::{SearchResult, WIN_SCORE, best_move};
pub use types::{Board, Player, Square};
