//! Fullness detection.

use super::super::{Board, Square};

/// True when no square is empty. A full board is a draw only if
/// [`winning_line`](super::winning_line) finds nothing.
pub fn is_full(board: &Board) -> bool {
    !board.squares().contains(&Square::Empty)
}
