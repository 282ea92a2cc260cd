//! Win detection logic for tic-tac-toe.

use super::super::{Board, Player, Position, Square};
use serde::{Deserialize, Serialize};

/// The 8 lines of the board: rows, then columns, then diagonals.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [
        Position::MiddleLeft,
        Position::Center,
        Position::MiddleRight,
    ],
    [
        Position::BottomLeft,
        Position::BottomCenter,
        Position::BottomRight,
    ],
    // Columns
    [
        Position::TopLeft,
        Position::MiddleLeft,
        Position::BottomLeft,
    ],
    [
        Position::TopCenter,
        Position::Center,
        Position::BottomCenter,
    ],
    [
        Position::TopRight,
        Position::MiddleRight,
        Position::BottomRight,
    ],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// A completed line and the player holding it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WinningLine {
    /// Player holding all three cells.
    pub player: Player,
    /// The three cells, in line order.
    pub cells: [Position; 3],
}

/// Returns the first complete line in [`LINES`] order, if any.
pub fn winning_line(board: &Board) -> Option<WinningLine> {
    LINES.iter().find_map(|&[a, b, c]| match board.get(a) {
        Square::Occupied(player) if board.get(b) == board.get(a) && board.get(c) == board.get(a) => {
            Some(WinningLine {
                player,
                cells: [a, b, c],
            })
        }
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_line_is_detected_for_both_players() {
        for cells in LINES {
            for player in [Player::X, Player::O] {
                let mut board = Board::new();
                for pos in cells {
                    board.set(pos, Square::Occupied(player));
                }
                assert_eq!(winning_line(&board), Some(WinningLine { player, cells }));
            }
        }
    }

    #[test]
    fn test_column_reports_its_cells() {
        let line = winning_line(&Board::from_pattern("_O__O__O_")).expect("column is complete");
        assert_eq!(line.player, Player::O);
        assert_eq!(line.cells.map(Position::to_index), [1, 4, 7]);
    }

    #[test]
    fn test_rows_are_scanned_before_diagonals() {
        // X X X / _ X _ / _ _ X holds the top row and the main diagonal
        let line = winning_line(&Board::from_pattern("XXX_X___X")).unwrap();
        assert_eq!(line.cells, LINES[0]);
    }

    #[test]
    fn test_incomplete_or_mixed_lines_are_not_wins() {
        assert_eq!(winning_line(&Board::new()), None);
        assert_eq!(winning_line(&Board::from_pattern("XX_______")), None);
        assert_eq!(winning_line(&Board::from_pattern("XOX______")), None);
    }
}
