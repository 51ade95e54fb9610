//! Tic-Tac-Toe board, rules, and the tolerant game session.

pub mod board;
pub mod game;
pub mod lines;

pub use board::{Board, Cell, Player};
pub use game::{DRAW_REWARD, Game, ILLEGAL_MOVE_REWARD, LOSS_REWARD, Step, WIN_REWARD};
