use crate::board::Board;
use crate::error::Result;
use crate::moves::{execute::simulate, movegen::legal_moves, square_control::in_check, types::Move};
use crate::status::is_checkmate;
use tracing::{debug, instrument};

const MAX_LOG_DEPTH: u32 = 2; // only trace details for shallow nodes

/// Tallies gathered while walking the move tree. Passed in explicitly; nothing is global.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounters {
    pub nodes: u64,
    pub captures: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounters {
    pub fn zero() -> Self {
        Self::default()
    }

    pub fn add(&mut self, o: &PerftCounters) {
        self.nodes += o.nodes;
        self.captures += o.captures;
        self.checks += o.checks;
        self.checkmates += o.checkmates;
    }
}

/// Play `mv` from `board` and count the leaves below it.
///
/// At the last ply the move itself is tallied: captures, checks, checkmates.
fn visit(
    board: &Board,
    mv: Move,
    depth: u32,
    ply: u32,
    counters: &mut PerftCounters,
) -> Result<u64> {
    let captured = board.piece_at(mv.to).is_some();
    let child = simulate(board, mv)?;

    if depth == 1 {
        if captured {
            counters.captures += 1;
        }
        let defender = child.to_move();
        if in_check(&child, defender) {
            counters.checks += 1;
            if is_checkmate(&child, defender) {
                counters.checkmates += 1;
            }
        }
    }

    let sub = perft_recursive(&child, depth - 1, ply + 1, counters)?;
    if ply < MAX_LOG_DEPTH {
        debug!(ply, mv = %mv.to_algebraic(board.height()), nodes = sub, "perft subtree");
    }
    Ok(sub)
}

fn perft_recursive(
    board: &Board,
    depth: u32,
    ply: u32,
    counters: &mut PerftCounters,
) -> Result<u64> {
    if depth == 0 {
        counters.nodes += 1;
        return Ok(1);
    }

    let mut nodes = 0;
    for mv in legal_moves(board) {
        nodes += visit(board, mv, depth, ply, counters)?;
    }
    Ok(nodes)
}

/// Number of leaf nodes `depth` plies below `board`, counting pseudo-legal moves.
#[instrument(level = "debug", skip(board, counters))]
pub fn perft(board: &Board, depth: u32, counters: &mut PerftCounters) -> Result<u64> {
    perft_recursive(board, depth, 0, counters)
}

/// Leaf counts per root move, in generation order. `on_root` is called as each
/// root move finishes.
pub fn perft_divide(
    board: &Board,
    depth: u32,
    counters: &mut PerftCounters,
    mut on_root: impl FnMut(Move, u64),
) -> Result<Vec<(Move, u64)>> {
    let mut out = Vec::new();
    if depth == 0 {
        return Ok(out);
    }
    for mv in legal_moves(board) {
        let n = visit(board, mv, depth, 0, counters)?;
        on_root(mv, n);
        out.push((mv, n));
    }
    Ok(out)
}
