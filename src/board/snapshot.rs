use super::{Board, Color, PieceKind};
use crate::error::{ChessError, Result};
use crate::square::Coord;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Serialized form of a [`Board`]: the square set, the occupied squares and the side to move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub squares: Vec<Coord>,
    pub occupancy: Vec<(Coord, PieceKind)>,
    pub to_move: Color,
}

impl From<&Board> for Snapshot {
    fn from(board: &Board) -> Self {
        Snapshot {
            squares: board.squares().iter().copied().collect(),
            occupancy: board.pieces().collect(),
            to_move: board.to_move(),
        }
    }
}

impl TryFrom<Snapshot> for Board {
    type Error = ChessError;

    fn try_from(snap: Snapshot) -> Result<Board> {
        let squares: BTreeSet<Coord> = snap.squares.into_iter().collect();
        let mut board = Board::with_squares(squares);
        for (at, pk) in snap.occupancy {
            if board.occupancy.contains_key(&at) {
                return Err(ChessError::InvalidLayout(format!(
                    "two pieces on {}",
                    at
                )));
            }
            board = board.place(at, pk.piece, pk.color)?;
        }
        board.to_move = snap.to_move;
        board.validate().map_err(ChessError::InvalidLayout)?;
        Ok(board)
    }
}

impl Board {
    pub fn to_snapshot(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(&Snapshot::from(self))?)
    }

    pub fn from_snapshot(bytes: &[u8]) -> Result<Board> {
        let snap: Snapshot = bincode::deserialize(bytes)?;
        Board::try_from(snap)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Piece;

    #[test]
    fn start_position_survives_snapshot() {
        let b = Board::new();
        let bytes = b.to_snapshot().unwrap();
        let back = Board::from_snapshot(&bytes).unwrap();
        assert_eq!(back, b);
        assert_eq!(back.squares(), b.squares());
    }

    #[test]
    fn irregular_board_survives_snapshot() {
        let b: Board = "k#1/3/#1K b".parse().unwrap();
        let back = Board::from_snapshot(&b.to_snapshot().unwrap()).unwrap();
        assert_eq!(back, b);
        assert_eq!(back.to_fen(), "k#1/3/#1K b");
    }

    #[test]
    fn snapshot_with_piece_off_board_is_rejected() {
        let snap = Snapshot {
            squares: vec![Coord::new(0, 0)],
            occupancy: vec![(
                Coord::new(3, 3),
                PieceKind::new(Piece::Rook, Color::White),
            )],
            to_move: Color::White,
        };
        assert!(matches!(
            Board::try_from(snap),
            Err(ChessError::InvalidDelta(_))
        ));
    }

    #[test]
    fn snapshot_with_stacked_pieces_is_rejected() {
        let rook = PieceKind::new(Piece::Rook, Color::White);
        let snap = Snapshot {
            squares: vec![Coord::new(0, 0)],
            occupancy: vec![(Coord::new(0, 0), rook), (Coord::new(0, 0), rook)],
            to_move: Color::White,
        };
        assert!(matches!(
            Board::try_from(snap),
            Err(ChessError::InvalidLayout(_))
        ));
    }

    #[test]
    fn garbage_bytes_fail_cleanly() {
        assert!(matches!(
            Board::from_snapshot(&[0xFF, 0x01]),
            Err(ChessError::Snapshot(_))
        ));
    }
}
