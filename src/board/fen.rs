// src/board/fen.rs
// FEN-style placement text: rows from rank 0 down, `/`-separated, digits for
// empty runs, `#` for a cell that is not part of the board, then `w` or `b`.

use super::{Board, Color, PieceKind};
use crate::error::{ChessError, Result};
use crate::square::Coord;
use std::collections::{BTreeMap, BTreeSet};

/// Widest and tallest board the text form will describe.
pub const MAX_SIDE: i32 = 256;

pub(super) fn parse_placement(text: &str) -> Result<Board> {
    let invalid = |msg: String| ChessError::InvalidLayout(msg);

    let mut fields = text.split_whitespace();
    let placement = fields
        .next()
        .ok_or_else(|| invalid("empty layout".to_string()))?;
    let to_move = match fields.next() {
        Some("w") => Color::White,
        Some("b") => Color::Black,
        Some(other) => return Err(invalid(format!("bad side to move {:?}", other))),
        None => return Err(invalid("missing side to move".to_string())),
    };
    if let Some(extra) = fields.next() {
        return Err(invalid(format!("unexpected trailing field {:?}", extra)));
    }

    let mut squares = BTreeSet::new();
    let mut occupancy = BTreeMap::new();
    let mut width: Option<i32> = None;

    for (rank, row) in placement.split('/').enumerate() {
        if rank >= MAX_SIDE as usize {
            return Err(invalid(format!("more than {} rows", MAX_SIDE)));
        }
        let rank = rank as i32;
        let mut file = 0i32;
        let mut run = 0i32;
        let too_wide = || invalid(format!("row {} is wider than {}", rank, MAX_SIDE));

        for ch in row.chars() {
            if let Some(d) = ch.to_digit(10) {
                run = run
                    .checked_mul(10)
                    .and_then(|r| r.checked_add(d as i32))
                    .filter(|&r| file + r <= MAX_SIDE)
                    .ok_or_else(too_wide)?;
                continue;
            }
            for _ in 0..run {
                squares.insert(Coord::new(file, rank));
                file += 1;
            }
            run = 0;

            if file >= MAX_SIDE {
                return Err(too_wide());
            }
            if ch == '#' {
                file += 1;
                continue;
            }
            let pk = PieceKind::from_symbol(ch)
                .ok_or_else(|| invalid(format!("unknown piece symbol {:?}", ch)))?;
            let at = Coord::new(file, rank);
            squares.insert(at);
            occupancy.insert(at, pk);
            file += 1;
        }
        for _ in 0..run {
            squares.insert(Coord::new(file, rank));
            file += 1;
        }

        match width {
            None => width = Some(file),
            Some(w) if w != file => {
                return Err(invalid(format!(
                    "row {} has width {}, expected {}",
                    rank, file, w
                )));
            }
            Some(_) => {}
        }
    }

    if width.unwrap_or(0) == 0 {
        return Err(invalid("board has no columns".to_string()));
    }

    let mut board = Board::with_squares(squares);
    board.occupancy = occupancy;
    board.to_move = to_move;
    board.validate().map_err(invalid)?;
    Ok(board)
}

impl Board {
    /// Text form accepted by `FromStr`.
    pub fn to_fen(&self) -> String {
        let mut rows = Vec::with_capacity(self.height as usize);
        for rank in 0..self.height {
            let mut row = String::new();
            let mut run = 0;
            for file in 0..self.width {
                let at = Coord::new(file, rank);
                if !self.contains(at) {
                    flush(&mut row, &mut run);
                    row.push('#');
                } else if let Some(pk) = self.piece_at(at) {
                    flush(&mut row, &mut run);
                    row.push(pk.symbol());
                } else {
                    run += 1;
                }
            }
            flush(&mut row, &mut run);
            rows.push(row);
        }
        let side = match self.to_move {
            Color::White => 'w',
            Color::Black => 'b',
        };
        format!("{} {}", rows.join("/"), side)
    }
}

#[inline]
fn flush(row: &mut String, run: &mut i32) {
    if *run > 0 {
        row.push_str(&run.to_string());
        *run = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::super::*;
    use super::MAX_SIDE;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w";

    #[test]
    fn start_position_text() {
        assert_eq!(Board::new().to_fen(), START);
        assert_eq!(START.parse::<Board>().unwrap(), Board::new());
    }

    #[test]
    fn wide_rows_use_multi_digit_runs() {
        let b: Board = "k11/12/11K b".parse().unwrap();
        assert_eq!(b.width(), 12);
        assert_eq!(b.height(), 3);
        assert_eq!(b.to_move(), Color::Black);
        assert_eq!(b.to_fen(), "k11/12/11K b");
    }

    #[test]
    fn size_limit_is_inclusive() {
        let b: Board = "255k w".parse().unwrap();
        assert_eq!(b.width(), MAX_SIDE);
        let tall = vec!["1"; MAX_SIDE as usize].join("/");
        assert_eq!(format!("{tall} w").parse::<Board>().unwrap().height(), MAX_SIDE);
        let too_tall = vec!["1"; MAX_SIDE as usize + 1].join("/");
        assert!(format!("{too_tall} w").parse::<Board>().is_err());
    }

    #[test]
    fn holes_are_off_board() {
        let b: Board = "k#1/3/#1K w".parse().unwrap();
        assert_eq!(b.lookup(Coord::new(1, 0)), SquareContent::OffBoard);
        assert_eq!(b.lookup(Coord::new(2, 0)), SquareContent::Empty);
        assert_eq!(b.lookup(Coord::new(0, 2)), SquareContent::OffBoard);
        assert_eq!(b.to_fen(), "k#1/3/#1K w");
    }

    #[test]
    fn rejects_bad_layouts() {
        for bad in [
            "",
            "8/8 x",
            "8/7 w",
            "8/8",
            "8/8 w extra",
            "7z/8 w",
            "kk6/8 w",
            "/ w",
            "99999999999 w",
            "99999999 w",
            "257 w",
            "256k w",
            "200#56 w",
        ] {
            assert!(
                matches!(bad.parse::<Board>(), Err(ChessError::InvalidLayout(_))),
                "{bad:?} should be rejected"
            );
        }
    }
}
