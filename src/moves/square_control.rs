use crate::board::{Board, Color, Piece};
use crate::moves::movegen::{
    generate_king_moves, generate_knight_moves, generate_slider_moves, pawn_attacks,
};
use crate::square::Coord;
use std::collections::BTreeSet;

/// Squares `attacker` could capture on if an enemy piece stood there.
///
/// Pawns threaten their forward diagonals whether or not anything is there;
/// every other piece threatens its pseudo-legal destinations.
pub fn attacked_squares(board: &Board, attacker: Color) -> BTreeSet<Coord> {
    let mut attacked = BTreeSet::new();
    let mut targets = Vec::with_capacity(32);

    for (from, pk) in board.pieces_of(attacker) {
        targets.clear();
        match pk.piece {
            Piece::Pawn => {
                attacked.extend(
                    pawn_attacks(from, attacker)
                        .into_iter()
                        .filter(|&sq| board.contains(sq)),
                );
                continue;
            }
            Piece::Knight => generate_knight_moves(board, from, attacker, &mut targets),
            Piece::King => generate_king_moves(board, from, attacker, &mut targets),
            slider => {
                generate_slider_moves(board, from, attacker, slider.ray_directions(), &mut targets)
            }
        }
        attacked.extend(targets.iter().map(|m| m.to));
    }
    attacked
}

pub fn is_square_attacked(board: &Board, square: Coord, attacker: Color) -> bool {
    attacked_squares(board, attacker).contains(&square)
}

/// Whether `side`'s king is attacked.
///
/// A side with no king counts as in check. The attacker's moves are produced
/// for `side.opposite()` explicitly, so the board's own side to move does not matter.
#[inline]
pub fn in_check(board: &Board, side: Color) -> bool {
    match board.king_square(side) {
        Some(king_sq) => is_square_attacked(board, king_sq, side.opposite()),
        None => true,
    }
}
