use crate::board::{Board, SquareContent};
use crate::error::{ChessError, Result};
use crate::moves::movegen::legal_moves;
use crate::moves::types::Move;
use tracing::{debug, instrument};

#[inline(always)]
fn invalid(mv: Move, reason: &'static str) -> ChessError {
    ChessError::InvalidMove {
        from: mv.from,
        to: mv.to,
        reason,
    }
}

/// Move the piece on `mv.from` to `mv.to` and hand the turn over, without
/// checking that the move was generated.
///
/// Only for moves that came out of the generator; the delta is still
/// bounds-checked by [`Board::apply`].
pub(crate) fn simulate(board: &Board, mv: Move) -> Result<Board> {
    let pk = board
        .piece_at(mv.from)
        .ok_or_else(|| invalid(mv, "origin is empty"))?;
    board.apply(
        &[
            (mv.from, SquareContent::Empty),
            (mv.to, SquareContent::Piece(pk)),
        ],
        board.to_move().opposite(),
    )
}

pub fn is_legal_move(board: &Board, mv: Move) -> bool {
    legal_moves(board).contains(&mv)
}

/// Apply a move drawn from [`legal_moves`], producing the next state.
///
/// Anything else fails with [`ChessError::InvalidMove`]; the receiver is never modified.
#[instrument(level = "debug", skip(board), fields(side = %board.to_move()))]
pub fn apply_move(board: &Board, mv: Move) -> Result<Board> {
    match board.lookup(mv.from) {
        SquareContent::OffBoard => return Err(invalid(mv, "origin is off the board")),
        SquareContent::Empty => return Err(invalid(mv, "origin is empty")),
        SquareContent::Piece(pk) if pk.color != board.to_move() => {
            return Err(invalid(mv, "origin piece belongs to the side not on move"));
        }
        SquareContent::Piece(_) => {}
    }
    if !board.contains(mv.to) {
        return Err(invalid(mv, "destination is off the board"));
    }
    if !is_legal_move(board, mv) {
        return Err(invalid(mv, "not a generated move"));
    }

    let next = simulate(board, mv)?;
    debug!(pieces = next.piece_count(), "move applied");
    Ok(next)
}
