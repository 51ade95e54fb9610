//! Play command - Interactive games against the solver or a trained agent

use std::io::{BufRead, Write};

use anyhow::{Result, anyhow, bail};
use clap::Parser;

use crate::{
    solver::Solver,
    tictactoe::{Board, Player},
    trainer::{SelfPlayTrainer, TrainerConfig},
};

pub(crate) fn parse_player_token(value: &str, flag: &str) -> Result<Player> {
    match value.trim().to_ascii_lowercase().as_str() {
        "x" | "first" | "player1" | "p1" => Ok(Player::X),
        "o" | "second" | "player2" | "p2" => Ok(Player::O),
        other => Err(anyhow!(
            "Invalid value '{other}' for {flag} (expected 'x' or 'o')"
        )),
    }
}

#[derive(Parser, Debug)]
#[command(about = "Play an interactive game")]
pub struct PlayArgs {
    /// Opponent type: `optimal` (exact solver) or `trained` (self-play agent)
    #[arg(long, short = 'o', default_value = "optimal")]
    pub opponent: String,

    /// Which token the human controls (`x` or `o`)
    #[arg(long, default_value = "x")]
    pub player: String,

    /// Generations of training for the `trained` opponent
    #[arg(long, default_value_t = 1_000)]
    pub train_generations: usize,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,
}

enum Opponent {
    Optimal(Solver),
    Trained(Box<SelfPlayTrainer>),
}

impl Opponent {
    fn pick(&mut self, board: &Board, player: Player) -> crate::Result<usize> {
        match self {
            Opponent::Optimal(solver) => solver.best_move(board, player),
            Opponent::Trained(trainer) => trainer.greedy_legal_move(board),
        }
    }
}

fn build_opponent(args: &PlayArgs) -> Result<Opponent> {
    match args.opponent.to_lowercase().as_str() {
        "optimal" => Ok(Opponent::Optimal(Solver::with_seed(args.seed))),
        "trained" => {
            let config = TrainerConfig {
                generations: args.train_generations,
                seed: args.seed,
                ..TrainerConfig::default()
            };
            println!(
                "Training opponent for {} generations...",
                config.generations
            );
            let mut trainer = SelfPlayTrainer::new(config);
            trainer.train(|_| {});
            Ok(Opponent::Trained(Box::new(trainer)))
        }
        other => bail!("Unknown opponent type: '{other}'. Supported: optimal, trained"),
    }
}

/// Prompt until the human supplies an empty cell index.
///
/// Rejected input (not a number, out of range, occupied cell) is re-prompted
/// without penalty; the board is never mutated on rejection.
fn prompt_for_move(board: &Board) -> Result<usize> {
    let stdin = std::io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("Your move (0-8): ");
        std::io::stdout().flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => bail!("input closed before the game finished"),
        };

        let pos: usize = match line.trim().parse() {
            Ok(pos) => pos,
            Err(_) => {
                eprintln!("Not a cell index, please retry!");
                continue;
            }
        };
        if pos >= crate::types::BOARD_SIZE {
            eprintln!("Cell index must be 0-8, please retry!");
            continue;
        }
        if !board.is_empty(pos) {
            eprintln!("Illegal move, please retry!");
            continue;
        }
        return Ok(pos);
    }
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let human = parse_player_token(&args.player, "--player")?;
    let mut opponent = build_opponent(&args)?;

    let mut board = Board::new();
    let mut turn = Player::X;

    println!("\nCells are numbered 0-8, row by row:\n0|1|2\n3|4|5\n6|7|8\n");

    let result = loop {
        if let Some(result) = board.game_over(human) {
            break result;
        }

        if turn == human {
            println!("{board}\n");
            let pos = prompt_for_move(&board)?;
            board.apply_move(pos, human);
        } else {
            let pos = opponent.pick(&board, turn)?;
            println!("Opponent plays {pos}");
            board.apply_move(pos, turn);
        }
        turn = turn.opponent();
    };

    println!("\nEnd of game!\n{board}\n");
    match result {
        1 => println!("You win!"),
        -1 => println!("You lose."),
        _ => println!("Draw."),
    }

    Ok(())
}
