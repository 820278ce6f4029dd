// Single-character piece symbols: the letter names the piece, the case the
// side (uppercase White, lowercase Black). Shared by the text layout and the
// board renderer.

use super::{Color, Piece, PieceKind};

fn letter(piece: Piece) -> char {
    match piece {
        Piece::Pawn => 'p',
        Piece::Knight => 'n',
        Piece::Bishop => 'b',
        Piece::Rook => 'r',
        Piece::Queen => 'q',
        Piece::King => 'k',
    }
}

pub(super) fn glyph_of(pk: PieceKind) -> char {
    let c = letter(pk.piece);
    match pk.color {
        Color::White => c.to_ascii_uppercase(),
        Color::Black => c,
    }
}

pub(super) fn parse_glyph(c: char) -> Option<PieceKind> {
    let piece = match c.to_ascii_lowercase() {
        'p' => Piece::Pawn,
        'n' => Piece::Knight,
        'b' => Piece::Bishop,
        'r' => Piece::Rook,
        'q' => Piece::Queen,
        'k' => Piece::King,
        _ => return None,
    };
    let color = if c.is_ascii_uppercase() {
        Color::White
    } else {
        Color::Black
    };
    Some(PieceKind::new(piece, color))
}
