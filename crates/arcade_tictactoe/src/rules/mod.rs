//! Game rules for tic-tac-toe.
//!
//! This module contains pure functions for evaluating game state
//! according to tic-tac-toe rules. Rules are separated from board
//! storage so the search and the session share one definition of
//! "terminal".

pub mod draw;
pub mod win;

pub use draw::is_full;
pub use win::{LINES, WinningLine, winning_line};

use super::Board;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Terminal classification of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BoardStatus {
    /// No line and at least one empty square.
    Ongoing,
    /// A line is complete.
    Won(WinningLine),
    /// Board is full with no line.
    Drawn,
}

impl BoardStatus {
    /// Returns true for `Won` and `Drawn`.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, BoardStatus::Ongoing)
    }
}

/// Classifies the board.
///
/// The line check runs first, so a full board that also completes a line
/// is reported as a win.
#[instrument(level = "trace")]
pub fn board_status(board: &Board) -> BoardStatus {
    if let Some(line) = winning_line(board) {
        BoardStatus::Won(line)
    } else if is_full(board) {
        BoardStatus::Drawn
    } else {
        BoardStatus::Ongoing
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Player, Position};

    #[test]
    fn test_empty_board_is_ongoing() {
        assert_eq!(board_status(&Board::new()), BoardStatus::Ongoing);
    }

    #[test]
    fn test_full_board_with_line_is_a_win() {
        // X O X / O X O / O X X -- full, and X holds the main diagonal
        let board = Board::from_pattern("XOXOXOOXX");
        assert!(is_full(&board));
        match board_status(&board) {
            BoardStatus::Won(line) => {
                assert_eq!(line.player, Player::X);
                assert_eq!(
                    line.cells,
                    [Position::TopLeft, Position::Center, Position::BottomRight]
                );
            }
            other => panic!("expected win, got {:?}", other),
        }
    }

    #[test]
    fn test_full_board_without_line_is_drawn() {
        let board = Board::from_pattern("XOXXOOOXX");
        assert_eq!(board_status(&board), BoardStatus::Drawn);
        assert!(board_status(&board).is_terminal());
    }

    #[test]
    fn test_partial_board_without_line_is_ongoing() {
        let board = Board::from_pattern("XO__X___O");
        assert_eq!(board_status(&board), BoardStatus::Ongoing);
        assert!(!board_status(&board).is_terminal());
    }
}
