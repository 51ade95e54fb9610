//! Solve command - Query the exact solver for a position

use anyhow::{Context, Result};
use clap::Parser;

use crate::{cli::commands::play::parse_player_token, solver::Solver, tictactoe::Board};

#[derive(Parser, Debug)]
#[command(about = "Solve a position exactly")]
pub struct SolveArgs {
    /// Board as 9 cells ('.', 'X', 'O'), row-major; whitespace is ignored
    pub board: String,

    /// Player to move (`x` or `o`); inferred from piece counts when omitted
    #[arg(long, short = 'p')]
    pub player: Option<String>,

    /// Random seed for the move tie-break
    #[arg(long)]
    pub seed: Option<u64>,
}

pub fn execute(args: SolveArgs) -> Result<()> {
    let board = Board::from_string(&args.board).context("failed to parse board")?;
    let to_move = match &args.player {
        Some(value) => parse_player_token(value, "--player")?,
        None => board
            .to_move_from_counts()
            .context("cannot infer player to move")?,
    };

    let mut solver = Solver::with_seed(args.seed);

    println!("{board}\n");
    println!("To move: {to_move:?}");

    if let Some(result) = board.game_over(to_move) {
        let verdict = match result {
            1 => "already won",
            -1 => "already lost",
            _ => "drawn",
        };
        println!("Terminal position: {verdict} for {to_move:?}");
        return Ok(());
    }

    let value = solver.value(&board, to_move);
    let verdict = match value {
        1 => "win",
        -1 => "loss",
        _ => "draw",
    };
    println!("Value: {value} ({verdict} with perfect play)");

    let moves = solver.optimal_moves(&board, to_move)?;
    println!("Optimal moves: {moves:?}");
    println!("Suggested move: {}", solver.best_move(&board, to_move)?);

    Ok(())
}
