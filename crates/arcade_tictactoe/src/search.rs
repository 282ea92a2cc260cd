//! Exhaustive minimax for the computer opponent.
//!
//! The board is small enough (at most 9! move orders) that the search
//! visits every continuation with no pruning and no transposition table.
//! Results are fully deterministic.

use super::rules::{is_full, winning_line};
use super::{Board, Player, Position, Square};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, instrument};

/// Score of a line completed by the maximizing side. The opponent's line
/// scores the negation; a drawn board scores 0.
pub const WIN_SCORE: i32 = 10;

/// Chosen cell and its minimax value for the maximizing side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    /// Cell to play.
    pub position: Position,
    /// One of `WIN_SCORE`, `0`, `-WIN_SCORE`.
    pub score: i32,
}

impl SearchResult {
    /// Cell to play.
    pub fn position(&self) -> Position {
        self.position
    }

    /// Minimax score from the maximizer's point of view.
    pub fn score(&self) -> i32 {
        self.score
    }
}

/// Value of a subtree: the score, how many plies until the game ends under
/// optimal play, and the first move on that line.
#[derive(Debug, Clone, Copy)]
struct Node {
    position: Option<Position>,
    score: i32,
    plies: u32,
}

/// Returns the optimal move for `maximizer`, who is assumed to be on move.
///
/// Candidates are tried in ascending index order. Among equal scores the
/// side on move prefers the quicker win or the slower loss; only ties that
/// survive that keep the first candidate. So the lowest index does not
/// always win a tie: on `X X _ / O O _ / _ _ _` with O to move, cell 2
/// also forces a win but cell 5 wins at once and is returned.
///
/// Returns `None` when the board has no empty square or already holds a
/// completed line.
#[instrument(skip(board), fields(empty = board.empty_positions().len()))]
pub fn best_move(board: &Board, maximizer: Player) -> Option<SearchResult> {
    let mut scratch = board.clone();
    let node = minimax(&mut scratch, maximizer, maximizer, 0);
    let result = node.position.map(|position| SearchResult {
        position,
        score: node.score,
    });
    debug!(?result, plies = node.plies, "Search complete");
    result
}

fn minimax(board: &mut Board, to_move: Player, maximizer: Player, depth: u32) -> Node {
    if let Some(line) = winning_line(board) {
        let score = if line.player == maximizer {
            WIN_SCORE
        } else {
            -WIN_SCORE
        };
        return Node {
            position: None,
            score,
            plies: depth,
        };
    }
    if is_full(board) {
        return Node {
            position: None,
            score: 0,
            plies: depth,
        };
    }

    let maximizing = to_move == maximizer;
    let mut best: Option<Node> = None;

    for position in Position::ALL {
        if !board.is_empty(position) {
            continue;
        }

        board.set(position, Square::Occupied(to_move));
        let child = minimax(board, to_move.opponent(), maximizer, depth + 1);
        board.set(position, Square::Empty);

        let candidate = Node {
            position: Some(position),
            ..child
        };
        if best.is_none_or(|incumbent| improves(maximizing, &candidate, &incumbent)) {
            best = Some(candidate);
        }
    }

    // Not reached: a non-full board always has a candidate.
    best.unwrap_or(Node {
        position: None,
        score: 0,
        plies: depth,
    })
}

/// Whether `candidate` should replace `incumbent` for the side on move.
fn improves(maximizing: bool, candidate: &Node, incumbent: &Node) -> bool {
    let sign = if maximizing { 1 } else { -1 };
    let (ours, theirs) = (candidate.score * sign, incumbent.score * sign);

    match ours.cmp(&theirs) {
        Ordering::Greater => true,
        Ordering::Less => false,
        Ordering::Equal => match ours.cmp(&0) {
            Ordering::Greater => candidate.plies < incumbent.plies,
            Ordering::Less => candidate.plies > incumbent.plies,
            Ordering::Equal => false,
        },
    }
}
