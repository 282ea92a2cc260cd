//! Alternating turn invariant: players alternate X, O, X, O, ...

use super::super::{Game, Player};
use super::Invariant;

/// Invariant: Players alternate turns.
///
/// Move history must show X, O, X, O, ... pattern.
/// First move is always X.
pub struct AlternatingTurnInvariant;

impl Invariant<Game> for AlternatingTurnInvariant {
    fn holds(game: &Game) -> bool {
        let history = game.history();

        let Some(first) = history.first() else {
            return game.to_move() == Player::X;
        };

        if first.player != Player::X {
            return false;
        }

        if history.windows(2).any(|w| w[0].player == w[1].player) {
            return false;
        }

        // A finished game keeps the last mover on turn.
        let last = history[history.len() - 1].player;
        let expected = if game.is_over() { last } else { last.opponent() };
        game.to_move() == expected
    }

    fn description() -> &'static str {
        "Players alternate turns (X, O, X, O, ...)"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Move, Position};

    #[test]
    fn test_empty_game_holds() {
        assert!(AlternatingTurnInvariant::holds(&Game::new()));
    }

    #[test]
    fn test_finished_game_holds() {
        let moves = [
            Move::new(Player::X, Position::TopLeft),
            Move::new(Player::O, Position::Center),
            Move::new(Player::X, Position::TopCenter),
            Move::new(Player::O, Position::BottomLeft),
            Move::new(Player::X, Position::TopRight),
        ];
        let game = Game::replay(&moves).unwrap();
        assert!(game.is_over());
        assert!(AlternatingTurnInvariant::holds(&game));
    }

    #[test]
    fn test_repeated_player_violates() {
        let mut game = Game::new();
        game.place(Move::new(Player::X, Position::Center)).unwrap();
        game.history.push(Move::new(Player::X, Position::TopLeft));
        assert!(!AlternatingTurnInvariant::holds(&game));
    }
}
