//! Computer opponent strength.

use arcade_tictactoe::{Board, Player, Position, best_move};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Share of "mixed" turns that fall back to a random cell.
///
/// The search is used only when a uniform draw in `[0, 1)` exceeds this.
pub const MIXED_RANDOM_SHARE: f64 = 0.3;

/// How the computer picks its cell. Read once per computer turn.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Uniformly random empty cell every turn.
    Random,
    /// Search result on roughly 70% of turns, random otherwise. Re-rolled
    /// on every turn.
    Mixed,
    /// Always the search result.
    #[default]
    Optimal,
}

impl Difficulty {
    /// Picks a cell for `side`, or `None` if the board has no empty cell.
    #[instrument(skip(self, board, rng), fields(difficulty = %self))]
    pub fn pick_cell<R: Rng>(self, board: &Board, side: Player, rng: &mut R) -> Option<Position> {
        let use_search = match self {
            Difficulty::Random => false,
            Difficulty::Mixed => {
                let roll: f64 = rng.r#gen();
                debug!(roll, "Mixed difficulty roll");
                roll > MIXED_RANDOM_SHARE
            }
            Difficulty::Optimal => true,
        };

        let choice = if use_search {
            best_move(board, side).map(|result| result.position())
        } else {
            board.empty_positions().choose(rng).copied()
        };
        debug!(?choice, use_search, "Computer picked cell");
        choice
    }
}
