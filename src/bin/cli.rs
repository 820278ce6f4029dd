use indicatif::{ProgressBar, ProgressStyle};
use sparsechess::board::Board;
use sparsechess::config::{Config, Mode};
use sparsechess::error::Result;
use sparsechess::logger::init_logging;
use sparsechess::moves::movegen::legal_moves;
use sparsechess::moves::perft::{PerftCounters, perft, perft_divide};
use sparsechess::play::play_game;
use std::io;
use std::process::ExitCode;
use std::time::Instant;
use tracing::{error, info};

fn main() -> ExitCode {
    let cfg = Config::from_env();

    if let Err(e) = init_logging(&cfg.log_file, &cfg.log_filter) {
        eprintln!("warning: logging disabled ({}): {e}", cfg.log_file.display());
    }
    info!(mode = ?cfg.mode, start = %cfg.start.to_fen(), "starting");

    let result = match cfg.mode {
        Mode::Perft(depth) => run_perft(&cfg.start, depth),
        Mode::Play => run_game(cfg.start),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "fatal");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_game(start: Board) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let record = play_game(start, stdin.lock(), stdout.lock())?;
    info!(
        plies = record.moves.len(),
        finished = record.finished,
        status = ?record.status,
        "session ended"
    );
    Ok(())
}

fn run_perft(start: &Board, depth: u32) -> Result<()> {
    let began = Instant::now();
    let mut counters = PerftCounters::zero();

    if depth == 0 {
        let nodes = perft(start, 0, &mut counters)?;
        println!("Nodes: {nodes}");
        return Ok(());
    }

    let bar = ProgressBar::new(legal_moves(start).len() as u64);
    bar.set_style(
        ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let height = start.height();
    let roots = perft_divide(start, depth, &mut counters, |mv, _| {
        bar.set_message(mv.to_algebraic(height));
        bar.inc(1);
    })?;
    bar.finish_and_clear();

    for (mv, nodes) in &roots {
        println!("{}: {}", mv.to_algebraic(height), nodes);
    }
    let total: u64 = roots.iter().map(|(_, n)| n).sum();
    println!();
    println!("Depth: {depth}");
    println!("Nodes: {total}");
    println!("Captures: {}", counters.captures);
    println!("Checks: {}", counters.checks);
    println!("Checkmates: {}", counters.checkmates);
    println!("Time: {:.3}s", began.elapsed().as_secs_f64());
    info!(depth, nodes = total, "perft done");
    Ok(())
}
