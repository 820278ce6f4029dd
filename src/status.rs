use crate::board::{Board, Color};
use crate::moves::execute::simulate;
use crate::moves::movegen::generate_pseudo_legal;
use crate::moves::square_control::in_check;
use tracing::{instrument, trace};

// Public enum you can use anywhere without pulling movegen into board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    InPlay,
    /// The given side has been mated (or has lost its king).
    Checkmate(Color),
    Stalemate,
}

/// Result of a game from one player's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Loss,
    Draw,
}

/// Whether some pseudo-legal move of `side` leaves `side` out of check.
///
/// Every candidate is simulated and the reply set recomputed from scratch.
fn has_escape(board: &Board, side: Color) -> bool {
    let mut moves = Vec::with_capacity(64);
    generate_pseudo_legal(board, side, &mut moves);

    let perspective = board.with_side_to_move(side);
    moves.into_iter().any(|mv| match simulate(&perspective, mv) {
        Ok(after) => !in_check(&after, side),
        Err(_) => false,
    })
}

/// `side` has no king, or is in check with no move that gets out of it.
#[instrument(level = "trace", skip(board))]
pub fn is_checkmate(board: &Board, side: Color) -> bool {
    if board.king_square(side).is_none() {
        trace!("king missing");
        return true;
    }
    in_check(board, side) && !has_escape(board, side)
}

/// The side to move is not in check but every move it has walks into check.
pub fn is_stalemate(board: &Board) -> bool {
    let side = board.to_move();
    board.king_square(side).is_some() && !in_check(board, side) && !has_escape(board, side)
}

/// Game over: either side mated, or the side to move stalemated.
pub fn is_terminal(board: &Board) -> bool {
    position_status(board) != GameStatus::InPlay
}

/// Win / Loss / Draw for `perspective`. Anything that is not a mate is a draw.
pub fn outcome(board: &Board, perspective: Color) -> Outcome {
    match position_status(board) {
        GameStatus::Checkmate(loser) if loser == perspective => Outcome::Loss,
        GameStatus::Checkmate(_) => Outcome::Win,
        GameStatus::InPlay | GameStatus::Stalemate => Outcome::Draw,
    }
}

/// Determine the game status for the current position.
///
/// Priority (highest → lowest):
///  1) White mated
///  2) Black mated
///  3) Side to move stalemated
pub fn position_status(board: &Board) -> GameStatus {
    for side in [Color::White, Color::Black] {
        if is_checkmate(board, side) {
            return GameStatus::Checkmate(side);
        }
    }
    if is_stalemate(board) {
        GameStatus::Stalemate
    } else {
        GameStatus::InPlay
    }
}
