//! Parsing of the line-oriented commands read from stdin.

use arcade_session::Difficulty;
use arcade_tictactoe::{Player, Position};
use std::str::FromStr;

/// One line of player input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    /// Place a mark. The index is passed through unchecked so the session
    /// reports out-of-range cells itself.
    Play(usize),
    /// Take back the last human and computer move.
    Undo,
    /// Start over, optionally switching sides.
    New(Option<Player>),
    /// Zero the scoreboard.
    Reset,
    /// Change computer strength from the next turn on.
    Difficulty(Difficulty),
    /// Play a pending computer move without waiting.
    Hurry,
    /// Redraw the current board.
    Show,
    /// List commands.
    Help,
    /// Leave the program.
    Quit,
}

/// Help text printed for `help` and unrecognised input.
pub const HELP: &str = "\
Commands:
  0-8 or a cell name (top-left, center, ...)  place your mark
  undo                                         take back your last move and the reply
  new [x|o]                                    start a new game, optionally switching sides
  reset                                        zero the scoreboard
  difficulty random|mixed|optimal              change computer strength
  hurry                                        let the computer move now
  show                                         redraw the board
  quit                                         exit";

/// Parses one trimmed input line.
pub fn parse(line: &str) -> Result<Input, String> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Err("empty input".to_string());
    };
    let arg = words.next();
    if words.next().is_some() {
        return Err(format!("too many arguments: {line}"));
    }

    match (head.to_ascii_lowercase().as_str(), arg) {
        ("undo" | "u", None) => Ok(Input::Undo),
        ("reset", None) => Ok(Input::Reset),
        ("hurry", None) => Ok(Input::Hurry),
        ("show", None) => Ok(Input::Show),
        ("help" | "?", None) => Ok(Input::Help),
        ("quit" | "exit" | "q", None) => Ok(Input::Quit),
        ("new", None) => Ok(Input::New(None)),
        ("new", Some(side)) => parse_side(side).map(|p| Input::New(Some(p))),
        ("difficulty", Some(mode)) => Difficulty::from_str(mode)
            .map(Input::Difficulty)
            .map_err(|_| format!("unknown difficulty: {mode}")),
        (_, None) => parse_cell(head),
        _ => Err(format!("unknown command: {line}")),
    }
}

fn parse_side(s: &str) -> Result<Player, String> {
    match s.to_ascii_lowercase().as_str() {
        "x" => Ok(Player::X),
        "o" => Ok(Player::O),
        _ => Err(format!("unknown side: {s}")),
    }
}

fn parse_cell(s: &str) -> Result<Input, String> {
    if let Ok(index) = s.parse::<usize>() {
        return Ok(Input::Play(index));
    }
    Position::from_label_or_number(s)
        .map(|pos| Input::Play(pos.to_index()))
        .ok_or_else(|| format!("unknown command: {s}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_pass_through_unchecked() {
        assert_eq!(parse("4"), Ok(Input::Play(4)));
        assert_eq!(parse("12"), Ok(Input::Play(12)));
    }

    #[test]
    fn test_new_with_side() {
        assert_eq!(parse("new"), Ok(Input::New(None)));
        assert_eq!(parse("new O"), Ok(Input::New(Some(Player::O))));
        assert!(parse("new z").is_err());
    }

    #[test]
    fn test_difficulty_is_case_insensitive() {
        assert_eq!(
            parse("difficulty MIXED"),
            Ok(Input::Difficulty(Difficulty::Mixed))
        );
        assert!(parse("difficulty impossible").is_err());
    }

    #[test]
    fn test_unknown_and_malformed_input() {
        assert!(parse("").is_err());
        assert!(parse("dance").is_err());
        assert!(parse("undo now").is_err());
    }
}
