//! Tabular reinforcement learning for Tic-Tac-Toe
//!
//! This crate provides:
//! - Complete Tic-Tac-Toe game implementation with a tolerant training step
//! - Base-3 board encoding into dense per-state tables
//! - Memoized exact minimax solver with randomized tie-breaking
//! - Self-play temporal-difference trainer with a learning/frozen table pair

pub mod cli;
pub mod error;
pub mod solver;
pub mod tictactoe;
pub mod trainer;
pub mod types;
pub mod utils;

pub use error::{Error, Result};
pub use solver::Solver;
pub use tictactoe::{Board, Cell, Game, Player, Step};
pub use trainer::{GenerationStats, SelfPlayTrainer, TrainerConfig, ValueTable};
pub use types::{BOARD_SIZE, NUM_STATES, StateId};
