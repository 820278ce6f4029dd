use std::str::FromStr;

use sparsechess::board::Board;
use sparsechess::moves::perft::{PerftCounters, perft, perft_divide};
use sparsechess::square::Coord;

fn run_startpos_depth(depth: u32, expected_nodes: u64) -> PerftCounters {
    let board = Board::new();
    let mut counters = PerftCounters::zero();
    let nodes = perft(&board, depth, &mut counters).unwrap();
    assert_eq!(
        nodes, expected_nodes,
        "Perft mismatch at depth {depth}: got {nodes}, expected {expected_nodes}"
    );
    assert_eq!(counters.nodes, nodes);
    counters
}

#[test]
fn perft_startpos_d1() {
    let c = run_startpos_depth(1, 20);
    assert_eq!(c.captures, 0);
    assert_eq!(c.checks, 0);
}

#[test]
fn perft_startpos_d2() {
    let c = run_startpos_depth(2, 400);
    assert_eq!(c.captures, 0);
    assert_eq!(c.checks, 0);
}

#[test]
fn perft_startpos_d3() {
    // No castling, en passant or promotion can occur this early, and nobody
    // can be in check before the third ply, so pseudo-legal counts match chess.
    let c = run_startpos_depth(3, 8_902);
    assert_eq!(c.captures, 34);
    assert_eq!(c.checks, 12);
    assert_eq!(c.checkmates, 0);
}

#[test]
fn divide_matches_total() {
    let b = Board::new();
    let mut counters = PerftCounters::zero();
    let divide = perft_divide(&b, 2, &mut counters, |_, _| {}).unwrap();
    assert_eq!(divide.len(), 20);
    assert!(divide.iter().all(|(_, n)| *n == 20));

    let e2 = Coord::from_str("e2").unwrap();
    let e4 = Coord::from_str("e4").unwrap();
    assert!(divide.iter().any(|(m, _)| m.from == e2 && m.to == e4));
}

#[test]
fn perft_counts_mates_at_the_leaves() {
    // One white move (Rd8) mates; the rest do not.
    let b = Board::from_str("6k1/5ppp/8/8/8/8/8/3R2K1 w").unwrap();
    let mut counters = PerftCounters::zero();
    perft(&b, 1, &mut counters).unwrap();
    assert_eq!(counters.checkmates, 1);
    assert_eq!(counters.checks, 1);
}
