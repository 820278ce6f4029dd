mod fen;
mod glyph;
pub mod snapshot;

use crate::error::{ChessError, Result};
use crate::square::{Coord, STANDARD_SIZE};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;
use std::sync::Arc;

/// Which side is to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Color {
    White,
    Black,
}

/// Piece enum to hold all types of pieces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Piece {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

/// A piece together with the side it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PieceKind {
    pub piece: Piece,
    pub color: Color,
}

/// Result of looking up a coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SquareContent {
    Piece(PieceKind),
    Empty,
    OffBoard,
}

/// Back rank from file a to file h.
const BACK_RANK: [Piece; 8] = [
    Piece::Rook,
    Piece::Knight,
    Piece::Bishop,
    Piece::Queen,
    Piece::King,
    Piece::Bishop,
    Piece::Knight,
    Piece::Rook,
];

static START_POSITION: Lazy<Board> = Lazy::new(|| {
    let mut b = Board::empty(STANDARD_SIZE, STANDARD_SIZE);
    let last = STANDARD_SIZE - 1;
    for (file, &piece) in BACK_RANK.iter().enumerate() {
        let file = file as i32;
        b.occupancy
            .insert(Coord::new(file, 0), PieceKind::new(piece, Color::Black));
        b.occupancy
            .insert(Coord::new(file, 1), PieceKind::new(Piece::Pawn, Color::Black));
        b.occupancy
            .insert(Coord::new(file, last - 1), PieceKind::new(Piece::Pawn, Color::White));
        b.occupancy
            .insert(Coord::new(file, last), PieceKind::new(piece, Color::White));
    }
    b
});

/// Immutable game state: the playable squares, who stands where and whose turn it is.
///
/// Every change goes through [`Board::apply`], which returns a fresh value and
/// leaves the receiver untouched.
#[derive(Debug, Clone)]
pub struct Board {
    /// Playable squares. Shared by every state derived from the same board.
    squares: Arc<BTreeSet<Coord>>,
    /// Bounding box of `squares`, for rendering and coordinate parsing.
    width: i32,
    height: i32,
    /// Occupied squares only.
    occupancy: BTreeMap<Coord, PieceKind>,
    to_move: Color,
}

impl Board {
    /// Standard starting position, White to move.
    pub fn new() -> Self {
        START_POSITION.clone()
    }

    /// An empty `width` x `height` board with White to move.
    pub fn empty(width: i32, height: i32) -> Self {
        let squares = (0..height)
            .flat_map(|rank| (0..width).map(move |file| Coord::new(file, rank)))
            .collect();
        Board::with_squares(squares)
    }

    /// An empty board over an arbitrary set of squares, White to move.
    pub fn with_squares(squares: BTreeSet<Coord>) -> Self {
        let width = squares.iter().map(|c| c.file + 1).max().unwrap_or(0);
        let height = squares.iter().map(|c| c.rank + 1).max().unwrap_or(0);
        Board {
            squares: Arc::new(squares),
            width,
            height,
            occupancy: BTreeMap::new(),
            to_move: Color::White,
        }
    }

    /// Builder used while setting up a position.
    pub fn place(mut self, at: Coord, piece: Piece, color: Color) -> Result<Self> {
        if !self.contains(at) {
            return Err(ChessError::InvalidDelta(at));
        }
        self.occupancy.insert(at, PieceKind::new(piece, color));
        Ok(self)
    }

    #[inline(always)]
    pub fn to_move(&self) -> Color {
        self.to_move
    }

    #[inline(always)]
    pub fn width(&self) -> i32 {
        self.width
    }

    #[inline(always)]
    pub fn height(&self) -> i32 {
        self.height
    }

    pub fn squares(&self) -> &BTreeSet<Coord> {
        &self.squares
    }

    #[inline(always)]
    pub fn contains(&self, at: Coord) -> bool {
        self.squares.contains(&at)
    }

    /// Three-way lookup: a piece, an empty playable square, or off the board.
    #[inline]
    pub fn lookup(&self, at: Coord) -> SquareContent {
        match self.occupancy.get(&at) {
            Some(&pk) => SquareContent::Piece(pk),
            None if self.contains(at) => SquareContent::Empty,
            None => SquareContent::OffBoard,
        }
    }

    /// Returns the piece at `at`, or None if empty or off the board.
    #[inline]
    pub fn piece_at(&self, at: Coord) -> Option<PieceKind> {
        self.occupancy.get(&at).copied()
    }

    /// Occupied squares in board-scan order.
    pub fn pieces(&self) -> impl Iterator<Item = (Coord, PieceKind)> + '_ {
        self.occupancy.iter().map(|(&c, &pk)| (c, pk))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Coord, PieceKind)> + '_ {
        self.pieces().filter(move |(_, pk)| pk.color == color)
    }

    pub fn piece_count(&self) -> usize {
        self.occupancy.len()
    }

    /// Where `color`'s king stands, if it is on the board at all.
    pub fn king_square(&self, color: Color) -> Option<Coord> {
        self.pieces_of(color)
            .find(|(_, pk)| pk.piece == Piece::King)
            .map(|(c, _)| c)
    }

    /// New state: this occupancy overlaid with `delta`, with `to_move` set explicitly.
    ///
    /// An `Empty` entry removes whatever stood there. Entries outside the board
    /// (or an `OffBoard` value) are rejected.
    pub fn apply(&self, delta: &[(Coord, SquareContent)], to_move: Color) -> Result<Board> {
        let mut occupancy = self.occupancy.clone();
        for &(at, content) in delta {
            if !self.contains(at) {
                return Err(ChessError::InvalidDelta(at));
            }
            match content {
                SquareContent::Piece(pk) => {
                    occupancy.insert(at, pk);
                }
                SquareContent::Empty => {
                    occupancy.remove(&at);
                }
                SquareContent::OffBoard => return Err(ChessError::InvalidDelta(at)),
            }
        }
        Ok(Board {
            squares: Arc::clone(&self.squares),
            width: self.width,
            height: self.height,
            occupancy,
            to_move,
        })
    }

    /// Same position seen with `color` to move.
    pub fn with_side_to_move(&self, color: Color) -> Board {
        Board {
            to_move: color,
            ..self.clone()
        }
    }

    /// Rank a pawn of `color` starts on.
    #[inline]
    pub fn pawn_home_rank(&self, color: Color) -> i32 {
        match color {
            Color::White => self.height - 2,
            Color::Black => 1,
        }
    }

    /// Validate the occupancy invariants.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if let Some(c) = self.occupancy.keys().find(|c| !self.contains(**c)) {
            return Err(format!("piece outside the board at {}", c));
        }
        for color in [Color::White, Color::Black] {
            let kings = self
                .pieces_of(color)
                .filter(|(_, pk)| pk.piece == Piece::King)
                .count();
            if kings > 1 {
                return Err(format!("{:?} has {} kings", color, kings));
            }
        }
        Ok(())
    }
}

impl Color {
    pub fn opposite(self) -> Self {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl std::ops::Not for Color {
    type Output = Self;

    fn not(self) -> Self::Output {
        self.opposite()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => write!(f, "White"),
            Color::Black => write!(f, "Black"),
        }
    }
}

impl Piece {
    /// Unit steps a sliding piece walks along; empty for non-sliders.
    pub fn ray_directions(self) -> &'static [(i32, i32)] {
        const ORTHOGONAL: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
        const DIAGONAL: [(i32, i32); 4] = [(1, 1), (-1, -1), (1, -1), (-1, 1)];
        const BOTH: [(i32, i32); 8] = [
            (1, 0),
            (-1, 0),
            (0, 1),
            (0, -1),
            (1, 1),
            (-1, -1),
            (1, -1),
            (-1, 1),
        ];
        match self {
            Piece::Rook => &ORTHOGONAL,
            Piece::Bishop => &DIAGONAL,
            Piece::Queen => &BOTH,
            _ => &[],
        }
    }
}

impl PieceKind {
    pub const fn new(piece: Piece, color: Color) -> Self {
        PieceKind { piece, color }
    }

    /// `P N B R Q K` for White, lowercase for Black.
    pub fn symbol(self) -> char {
        glyph::glyph_of(self)
    }

    pub fn from_symbol(c: char) -> Option<Self> {
        glyph::parse_glyph(c)
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Equal iff same occupancy and same side to move.
impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.to_move == other.to_move && self.occupancy == other.occupancy
    }
}

impl Eq for Board {}

impl Hash for Board {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.occupancy.hash(state);
        self.to_move.hash(state);
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::new()
    }
}

impl FromStr for Board {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self> {
        fen::parse_placement(s)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let legend: Vec<String> = (0..self.width)
            .map(|file| match u8::try_from(file).ok().filter(|&f| f < 26) {
                Some(f) => ((b'a' + f) as char).to_string(),
                None => "?".to_string(),
            })
            .collect();
        let legend = legend.join(" ");
        let label_width = self.height.to_string().len();

        writeln!(f, "{:label_width$} {}", "", legend)?;
        for rank in 0..self.height {
            let cells: Vec<String> = (0..self.width)
                .map(|file| match self.lookup(Coord::new(file, rank)) {
                    SquareContent::Piece(pk) => pk.symbol().to_string(),
                    SquareContent::Empty => ".".to_string(),
                    SquareContent::OffBoard => "#".to_string(),
                })
                .collect();
            writeln!(
                f,
                "{:>label_width$} {}",
                self.height - rank,
                cells.join(" ")
            )?;
        }
        write!(f, "{:label_width$} {}", "", legend)
    }
}
