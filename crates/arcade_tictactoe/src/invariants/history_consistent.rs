//! History consistency invariant: the board is exactly what history says.

use super::super::{Game, Square};
use super::Invariant;

/// Invariant: exactly the cells recorded in history are non-empty, each
/// holding the mark of the move that filled it, and no cell appears twice.
pub struct HistoryConsistentInvariant;

impl Invariant<Game> for HistoryConsistentInvariant {
    fn holds(game: &Game) -> bool {
        let history = game.history();
        let board = game.board();

        let mut seen = [false; 9];
        for mov in history {
            let index = mov.position.to_index();
            if seen[index] || board.get(mov.position) != Square::Occupied(mov.player) {
                return false;
            }
            seen[index] = true;
        }

        board.occupied_count() == history.len()
    }

    fn description() -> &'static str {
        "Occupied squares match move history"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Move, Player, Position};

    #[test]
    fn test_empty_game_holds() {
        assert!(HistoryConsistentInvariant::holds(&Game::new()));
    }

    #[test]
    fn test_multiple_moves_hold() {
        let moves = vec![
            Move::new(Player::X, Position::TopLeft),
            Move::new(Player::O, Position::Center),
            Move::new(Player::X, Position::TopRight),
            Move::new(Player::O, Position::BottomLeft),
        ];
        let game = Game::replay(&moves).unwrap();
        assert!(HistoryConsistentInvariant::holds(&game));
        assert_eq!(game.history().len(), 4);
    }

    #[test]
    fn test_extra_square_violates() {
        let mut game = Game::new();
        game.place(Move::new(Player::X, Position::Center)).unwrap();
        game.board.set(Position::TopLeft, Square::Occupied(Player::O));
        assert!(!HistoryConsistentInvariant::holds(&game));
    }

    #[test]
    fn test_duplicate_cell_violates() {
        let mut game = Game::new();
        game.place(Move::new(Player::X, Position::Center)).unwrap();
        game.history.push(Move::new(Player::X, Position::Center));
        assert!(!HistoryConsistentInvariant::holds(&game));
    }

    #[test]
    fn test_wrong_mark_violates() {
        let mut game = Game::new();
        game.place(Move::new(Player::X, Position::Center)).unwrap();
        game.board.set(Position::Center, Square::Occupied(Player::O));
        assert!(!HistoryConsistentInvariant::holds(&game));
    }
}
