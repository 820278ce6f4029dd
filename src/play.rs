//! Line-oriented two-player game loop.
//!
//! `AwaitingMove(side)` → move applied → terminal, or `AwaitingMove(other side)`.
//! Input is read one coordinate per prompt; malformed or illegal input
//! re-prompts without touching the game state.

use crate::board::{Board, Color};
use crate::error::{ChessError, Result};
use crate::moves::execute::apply_move;
use crate::moves::movegen::legal_moves;
use crate::moves::types::Move;
use crate::square::{Coord, parse_coord};
use crate::status::{GameStatus, is_terminal, position_status};
use std::io::{BufRead, Write};
use tracing::{info, warn};

/// Final message printed once the game is over.
pub const GAME_OVER_MESSAGE: &str = "GG WP";

#[derive(Debug, Clone)]
pub struct GameRecord {
    pub moves: Vec<Move>,
    pub final_board: Board,
    pub status: GameStatus,
    /// False when input ran out before the game ended.
    pub finished: bool,
}

/// Print `prompt`, read one line. `None` on end of input.
fn read_token<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    prompt: &str,
) -> Result<Option<String>> {
    write!(output, "{}", prompt)?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask until the player enters a move present in `moves`. `None` on end of input.
fn read_move<R: BufRead, W: Write>(
    board: &Board,
    moves: &[Move],
    input: &mut R,
    output: &mut W,
) -> Result<Option<Move>> {
    let side = board.to_move();
    loop {
        let Some(origin) = read_token(
            input,
            output,
            &format!("{side}, enter the square of the piece to move (e.g. 'e2'): "),
        )?
        else {
            return Ok(None);
        };

        // "e2 e4" on a single line is accepted as well.
        let mut tokens = origin.split_whitespace();
        let first = tokens.next().unwrap_or_default().to_string();
        let second = match tokens.next() {
            Some(t) => t.to_string(),
            None => {
                let Some(dest) = read_token(
                    input,
                    output,
                    &format!("{side}, enter the destination square (e.g. 'e4'): "),
                )?
                else {
                    return Ok(None);
                };
                dest
            }
        };

        let parsed = parse_pair(board, &first, &second);
        let (from, to) = match parsed {
            Ok(pair) => pair,
            Err(e) => {
                warn!(error = %e, "rejected input");
                writeln!(output, "Invalid coordinates. Try again.")?;
                continue;
            }
        };

        let mv = Move::new(from, to);
        if moves.contains(&mv) {
            return Ok(Some(mv));
        }
        let e = ChessError::IllegalMove { from, to };
        warn!(error = %e, "rejected move");
        writeln!(output, "Illegal move. Try again.")?;
    }
}

fn parse_pair(board: &Board, from: &str, to: &str) -> Result<(Coord, Coord)> {
    let from = parse_coord(from, board.width(), board.height())?;
    let to = parse_coord(to, board.width(), board.height())?;
    Ok((from, to))
}

fn end_message(status: GameStatus) -> String {
    match status {
        GameStatus::Checkmate(loser) => {
            let winner: Color = !loser;
            format!("Checkmate. {winner} wins.")
        }
        GameStatus::Stalemate => "Stalemate. Draw.".to_string(),
        GameStatus::InPlay => "Game abandoned.".to_string(),
    }
}

/// Run a game from `board` until it is over or the input runs dry.
pub fn play_game<R: BufRead, W: Write>(
    mut board: Board,
    mut input: R,
    mut output: W,
) -> Result<GameRecord> {
    let mut moves_played = Vec::new();

    while !is_terminal(&board) {
        writeln!(output, "{board}")?;
        let moves = legal_moves(&board);
        let Some(mv) = read_move(&board, &moves, &mut input, &mut output)? else {
            info!(plies = moves_played.len(), "input closed before the game ended");
            writeln!(output)?;
            writeln!(output, "{}", end_message(GameStatus::InPlay))?;
            return Ok(GameRecord {
                moves: moves_played,
                status: position_status(&board),
                final_board: board,
                finished: false,
            });
        };

        board = apply_move(&board, mv)?;
        info!(ply = moves_played.len() + 1, mv = %mv.to_algebraic(board.height()), "move played");
        moves_played.push(mv);
        writeln!(output, "{board}")?;
    }

    let status = position_status(&board);
    writeln!(output, "{board}")?;
    writeln!(output, "{}", end_message(status))?;
    writeln!(output, "{GAME_OVER_MESSAGE}")?;
    info!(?status, plies = moves_played.len(), "game over");

    Ok(GameRecord {
        moves: moves_played,
        final_board: board,
        status,
        finished: true,
    })
}
