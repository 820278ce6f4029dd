use crate::square::Coord;

pub type Result<T> = std::result::Result<T, ChessError>;

#[derive(Debug, thiserror::Error)]
pub enum ChessError {
    /// Raw text is not a `[file][rank]` token on this board.
    #[error("malformed coordinate: {0:?}")]
    MalformedCoordinate(String),

    /// Well-formed coordinates that do not form a move in the current position.
    #[error("illegal move: {from} -> {to}")]
    IllegalMove { from: Coord, to: Coord },

    /// The engine was asked to apply a move it never generated.
    #[error("invalid move {from} -> {to}: {reason}")]
    InvalidMove {
        from: Coord,
        to: Coord,
        reason: &'static str,
    },

    #[error("delta touches a square outside the board: {0}")]
    InvalidDelta(Coord),

    #[error("invalid board layout: {0}")]
    InvalidLayout(String),

    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
