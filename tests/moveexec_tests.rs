use std::str::FromStr;
use sparsechess::board::{Board, Color, Piece, PieceKind, SquareContent};
use sparsechess::error::ChessError;
use sparsechess::moves::execute::{apply_move, is_legal_move};
use sparsechess::moves::movegen::legal_moves;
use sparsechess::moves::types::Move;
use sparsechess::square::Coord;

fn sq(s: &str) -> Coord {
    Coord::from_str(s).unwrap()
}

fn mv(from: &str, to: &str) -> Move {
    Move::new(sq(from), sq(to))
}

#[test]
fn e2e4_is_available_from_the_start() {
    let b = Board::new();
    assert!(legal_moves(&b).contains(&mv("e2", "e4")));
    assert!(is_legal_move(&b, mv("e2", "e4")));
}

#[test]
fn knights_out_and_back_rank_untouched() {
    let start = Board::new();
    let b1 = apply_move(&start, mv("g1", "f3")).unwrap();
    let b2 = apply_move(&b1, mv("g8", "f6")).unwrap();

    assert_eq!(
        b2.piece_at(sq("f3")),
        Some(PieceKind::new(Piece::Knight, Color::White))
    );
    assert_eq!(
        b2.piece_at(sq("f6")),
        Some(PieceKind::new(Piece::Knight, Color::Black))
    );
    assert_eq!(b2.lookup(sq("g1")), SquareContent::Empty);
    assert_eq!(b2.lookup(sq("g8")), SquareContent::Empty);
    assert_eq!(
        b2.piece_at(sq("e2")),
        Some(PieceKind::new(Piece::Pawn, Color::White))
    );
    assert_eq!(b2.to_move(), Color::White);

    // Earlier states are unchanged.
    assert_eq!(start, Board::new());
    assert_eq!(b1.lookup(sq("f6")), SquareContent::Empty);
}

#[test]
fn rook_ray_stops_before_friendly_piece() {
    let b = Board::empty(8, 8)
        .place(Coord::new(0, 0), Piece::Rook, Color::White)
        .unwrap()
        .place(Coord::new(0, 3), Piece::Knight, Color::White)
        .unwrap();
    let from_rook: Vec<Coord> = legal_moves(&b)
        .into_iter()
        .filter(|m| m.from == Coord::new(0, 0))
        .map(|m| m.to)
        .collect();

    assert!(from_rook.contains(&Coord::new(0, 1)));
    assert!(from_rook.contains(&Coord::new(0, 2)));
    for rank in 3..8 {
        assert!(!from_rook.contains(&Coord::new(0, rank)));
    }
    // Rank 0 is open all the way.
    assert_eq!(from_rook.len(), 2 + 7);
}

#[test]
fn knight_and_king_never_land_on_friends_or_off_board() {
    for b in [
        Board::new(),
        Board::from_str("8/8/8/3NK3/3PP3/8/8/8 w").unwrap(),
        Board::from_str("n6k/8/8/8/8/8/8/7K b").unwrap(),
    ] {
        let side = b.to_move();
        for m in legal_moves(&b) {
            let piece = b.piece_at(m.from).unwrap().piece;
            if matches!(piece, Piece::Knight | Piece::King) {
                assert!(b.contains(m.to), "{m} leaves the board");
                assert!(
                    b.piece_at(m.to).is_none_or(|pk| pk.color != side),
                    "{m} lands on a friendly piece"
                );
            }
        }
    }
}

#[test]
fn illegal_requests_leave_the_state_alone() {
    let b = Board::new();
    let before = b.clone();
    for bad in [mv("e2", "e5"), mv("a1", "a3"), mv("d4", "d5"), mv("e7", "e5")] {
        assert!(matches!(
            apply_move(&b, bad),
            Err(ChessError::InvalidMove { .. })
        ));
    }
    assert_eq!(b, before);
}

#[test]
fn moves_work_on_non_standard_boards() {
    // 10x3 board, rook sweeps the whole top rank.
    let b = Board::from_str("R8k/10/K9 w").unwrap();
    let rook: Vec<Move> = legal_moves(&b)
        .into_iter()
        .filter(|m| m.from == Coord::new(0, 0))
        .collect();
    assert_eq!(rook.len(), 9 + 1); // 8 empty + capture on the king, plus a2
    let after = apply_move(&b, Move::new(Coord::new(0, 0), Coord::new(9, 0))).unwrap();
    assert_eq!(after.king_square(Color::Black), None);
    assert_eq!(after.piece_count(), 2);
}
