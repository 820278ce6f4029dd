use crate::board::{Board, Color, Piece, SquareContent};
use crate::moves::types::{Move, MoveBuffer};
use crate::square::Coord;
use tracing::trace;

/// Knight jumps, in generation order.
pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (2, 1),
    (1, 2),
    (-1, 2),
    (-2, 1),
    (-2, -1),
    (-1, -2),
    (1, -2),
    (2, -1),
];

/// King steps, in generation order.
pub const KING_OFFSETS: [(i32, i32); 8] = [
    (1, 0),
    (0, 1),
    (-1, 0),
    (0, -1),
    (1, 1),
    (-1, -1),
    (1, -1),
    (-1, 1),
];

/// What a piece of some color finds on a target square.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Landing {
    Open,
    Capture,
    Blocked,
}

#[inline(always)]
fn landing(board: &Board, at: Coord, color: Color) -> Landing {
    match board.lookup(at) {
        SquareContent::Empty => Landing::Open,
        SquareContent::Piece(pk) if pk.color != color => Landing::Capture,
        SquareContent::Piece(_) | SquareContent::OffBoard => Landing::Blocked,
    }
}

/// Rank step a pawn of `color` advances by (White moves up the grid).
#[inline(always)]
pub fn pawn_direction(color: Color) -> i32 {
    match color {
        Color::White => -1,
        Color::Black => 1,
    }
}

/// The two forward-diagonal squares a pawn on `from` threatens (may be off-board).
#[inline(always)]
pub fn pawn_attacks(from: Coord, color: Color) -> [Coord; 2] {
    let dir = pawn_direction(color);
    [from.offset(-1, dir), from.offset(1, dir)]
}

pub fn generate_pawn_moves(
    board: &Board,
    from: Coord,
    color: Color,
    move_list: &mut impl MoveBuffer,
) {
    let dir = pawn_direction(color);

    let one = from.offset(0, dir);
    if board.lookup(one) == SquareContent::Empty {
        move_list.push(Move::new(from, one));

        let two = one.offset(0, dir);
        let at_home = from.rank == board.pawn_home_rank(color);
        if at_home && board.lookup(two) == SquareContent::Empty {
            move_list.push(Move::new(from, two));
        }
    }

    for to in pawn_attacks(from, color) {
        if landing(board, to, color) == Landing::Capture {
            move_list.push(Move::new(from, to));
        }
    }
}

/// Shared walker for rook, bishop and queen rays.
pub fn generate_slider_moves(
    board: &Board,
    from: Coord,
    color: Color,
    directions: &[(i32, i32)],
    move_list: &mut impl MoveBuffer,
) {
    for &(df, dr) in directions {
        let mut to = from.offset(df, dr);
        loop {
            match landing(board, to, color) {
                Landing::Open => move_list.push(Move::new(from, to)),
                Landing::Capture => {
                    move_list.push(Move::new(from, to));
                    break;
                }
                Landing::Blocked => break,
            }
            to = to.offset(df, dr);
        }
    }
}

pub fn generate_rook_moves(
    board: &Board,
    from: Coord,
    color: Color,
    move_list: &mut impl MoveBuffer,
) {
    generate_slider_moves(board, from, color, Piece::Rook.ray_directions(), move_list);
}

pub fn generate_bishop_moves(
    board: &Board,
    from: Coord,
    color: Color,
    move_list: &mut impl MoveBuffer,
) {
    generate_slider_moves(board, from, color, Piece::Bishop.ray_directions(), move_list);
}

pub fn generate_queen_moves(
    board: &Board,
    from: Coord,
    color: Color,
    move_list: &mut impl MoveBuffer,
) {
    generate_slider_moves(board, from, color, Piece::Queen.ray_directions(), move_list);
}

/// Fixed-offset movers: the target must be on the board and not hold a friendly piece.
fn generate_step_moves(
    board: &Board,
    from: Coord,
    color: Color,
    offsets: &[(i32, i32)],
    move_list: &mut impl MoveBuffer,
) {
    for &(df, dr) in offsets {
        let to = from.offset(df, dr);
        if landing(board, to, color) != Landing::Blocked {
            move_list.push(Move::new(from, to));
        }
    }
}

pub fn generate_knight_moves(
    board: &Board,
    from: Coord,
    color: Color,
    move_list: &mut impl MoveBuffer,
) {
    generate_step_moves(board, from, color, &KNIGHT_OFFSETS, move_list);
}

/// No castling.
pub fn generate_king_moves(
    board: &Board,
    from: Coord,
    color: Color,
    move_list: &mut impl MoveBuffer,
) {
    generate_step_moves(board, from, color, &KING_OFFSETS, move_list);
}

/// Every pseudo-legal move for `color`, whoever the board says is to move.
///
/// Pieces are visited in board-scan order, directions in each generator's
/// fixed order, so the output is deterministic.
pub fn generate_pseudo_legal(board: &Board, color: Color, move_list: &mut impl MoveBuffer) {
    for (from, pk) in board.pieces_of(color) {
        match pk.piece {
            Piece::Pawn => generate_pawn_moves(board, from, color, move_list),
            Piece::Knight => generate_knight_moves(board, from, color, move_list),
            Piece::Bishop => generate_bishop_moves(board, from, color, move_list),
            Piece::Rook => generate_rook_moves(board, from, color, move_list),
            Piece::Queen => generate_queen_moves(board, from, color, move_list),
            Piece::King => generate_king_moves(board, from, color, move_list),
        }
    }
}

/// Pseudo-legal moves for the side to move. Never checks for self-check.
pub fn legal_moves(board: &Board) -> Vec<Move> {
    let mut moves = Vec::with_capacity(64);
    generate_pseudo_legal(board, board.to_move(), &mut moves);
    trace!(side = %board.to_move(), count = moves.len(), "generated moves");
    moves
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrayvec::ArrayVec;

    fn c(s: &str) -> Coord {
        s.parse().unwrap()
    }

    fn targets(moves: &[Move]) -> Vec<Coord> {
        moves.iter().map(|m| m.to).collect()
    }

    #[test]
    fn start_position_has_twenty_moves() {
        assert_eq!(legal_moves(&Board::new()).len(), 20);
    }

    #[test]
    fn black_moves_can_be_generated_on_whites_turn() {
        let b = Board::new();
        let mut moves = Vec::new();
        generate_pseudo_legal(&b, Color::Black, &mut moves);
        assert_eq!(moves.len(), 20);
        assert!(moves.contains(&Move::new(c("e7"), c("e5"))));
    }

    #[test]
    fn knight_in_corner_has_two_jumps() {
        let b: Board = "8/8/8/8/8/8/8/N7 w".parse().unwrap();
        let mut moves: ArrayVec<Move, 8> = ArrayVec::new();
        generate_knight_moves(&b, c("a1"), Color::White, &mut moves);
        let mut t = targets(&moves);
        t.sort();
        assert_eq!(t, vec![c("b3"), c("c2")]);
    }

    #[test]
    fn king_step_order_is_fixed() {
        let b: Board = "8/8/8/8/3K4/8/8/8 w".parse().unwrap();
        let mut moves = Vec::new();
        generate_king_moves(&b, c("d4"), Color::White, &mut moves);
        assert_eq!(
            targets(&moves),
            vec![
                c("e4"),
                c("d3"),
                c("c4"),
                c("d5"),
                c("e3"),
                c("c5"),
                c("e5"),
                c("c3")
            ]
        );
    }

    #[test]
    fn bishop_ray_captures_enemy_then_stops() {
        let b: Board = "8/8/8/8/8/2p5/8/B7 w".parse().unwrap();
        let mut moves = Vec::new();
        generate_bishop_moves(&b, c("a1"), Color::White, &mut moves);
        assert_eq!(targets(&moves), vec![c("b2"), c("c3")]);
    }

    #[test]
    fn queen_combines_rook_and_bishop_rays() {
        let b: Board = "8/8/8/8/3Q4/8/8/8 w".parse().unwrap();
        let mut moves = Vec::new();
        generate_queen_moves(&b, c("d4"), Color::White, &mut moves);
        assert_eq!(moves.len(), 27);
    }

    #[test]
    fn sliders_stop_at_holes() {
        // Rook on a 5x1 strip with a hole in the middle.
        let b: Board = "R1#2 w".parse().unwrap();
        let mut moves = Vec::new();
        generate_rook_moves(&b, Coord::new(0, 0), Color::White, &mut moves);
        assert_eq!(targets(&moves), vec![Coord::new(1, 0)]);
    }
}
