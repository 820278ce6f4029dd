use crate::error::{ChessError, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Width and height of the standard board.
pub const STANDARD_SIZE: i32 = 8;

/// A board coordinate. Origin is the top-left corner, `rank` grows downward.
///
/// Fields are signed so that stepping by an offset may leave the board; the
/// board itself decides whether a coordinate is playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub file: i32,
    pub rank: i32,
}

impl Coord {
    #[inline(always)]
    pub const fn new(file: i32, rank: i32) -> Self {
        Coord { file, rank }
    }

    /// Coordinate shifted by `(df, dr)`.
    #[inline(always)]
    pub const fn offset(self, df: i32, dr: i32) -> Self {
        Coord {
            file: self.file + df,
            rank: self.rank + dr,
        }
    }

    /// Human-facing name like `e2`, given the height of the board.
    ///
    /// Files past `z` have no letter; they fall back to the raw `(file,rank)` form.
    pub fn to_algebraic(self, height: i32) -> String {
        if !(0..26).contains(&self.file) || !(0..height).contains(&self.rank) {
            return self.to_string();
        }
        let f = (b'a' + self.file as u8) as char;
        format!("{}{}", f, height - self.rank)
    }
}

// Board-scan order: rank-major, top-left first.
impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.rank, self.file).cmp(&(other.rank, other.file))
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.file, self.rank)
    }
}

/// Parse a `[file letter][rank number]` token against a `width` x `height` grid.
///
/// The human rank number counts from the bottom, so `a1` on an 8x8 board is `(0,7)`.
pub fn parse_coord(text: &str, width: i32, height: i32) -> Result<Coord> {
    let malformed = || ChessError::MalformedCoordinate(text.to_string());
    let text = text.trim();

    let mut chars = text.chars();
    let letter = chars.next().ok_or_else(malformed)?;
    if !letter.is_ascii_lowercase() {
        return Err(malformed());
    }
    let file = (letter as u8 - b'a') as i32;

    let digits = chars.as_str();
    if digits.is_empty()
        || digits.starts_with('0')
        || !digits.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(malformed());
    }
    let number: i32 = digits.parse().map_err(|_| malformed())?;

    if file >= width || number < 1 || number > height {
        return Err(malformed());
    }
    Ok(Coord::new(file, height - number))
}

/// Standard 8x8 algebraic coordinates (`a1`..`h8`).
impl FromStr for Coord {
    type Err = ChessError;

    fn from_str(s: &str) -> Result<Self> {
        parse_coord(s, STANDARD_SIZE, STANDARD_SIZE)
    }
}
