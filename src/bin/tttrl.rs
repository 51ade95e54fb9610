//! tttrl CLI - Tabular reinforcement learning for Tic-Tac-Toe
//!
//! This CLI provides a unified interface for:
//! - Training a self-play agent
//! - Playing against the exact solver or a trained agent
//! - Solving positions exactly

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "tttrl")]
#[command(version, about = "Tabular RL and exact search for Tic-Tac-Toe", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a self-play agent
    Train(tttrl::cli::commands::train::TrainArgs),

    /// Play an interactive game against the solver or a trained agent
    Play(tttrl::cli::commands::play::PlayArgs),

    /// Solve a position exactly
    Solve(tttrl::cli::commands::solve::SolveArgs),
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Train(args) => tttrl::cli::commands::train::execute(args),
        Commands::Play(args) => tttrl::cli::commands::play::execute(args),
        Commands::Solve(args) => tttrl::cli::commands::solve::execute(args),
    }
}
