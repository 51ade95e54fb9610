//! Game session with the tolerant `step` entry point used during training.
//!
//! A session owns a board, the turn marker, and a designated reward-max
//! player. Rewards are only meaningful from the reward-max player's
//! perspective; the opponent's moves still drive the episode but earn it
//! nothing.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use super::{Board, Player};
use crate::utils::build_rng;

/// Reward for an illegal move by the reward-max player.
///
/// Reserved for that case alone; no terminal outcome maps to it.
pub const ILLEGAL_MOVE_REWARD: f64 = -10.0;

/// Reward for winning the episode
pub const WIN_REWARD: f64 = 17.0;

/// Reward for a drawn episode
pub const DRAW_REWARD: f64 = -1.0;

/// Reward for losing the episode
pub const LOSS_REWARD: f64 = -19.0;

/// Outcome of a single `step` call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub reward: f64,
    pub done: bool,
}

/// Map a `game_over` result to the terminal reward for the reward-max player.
fn terminal_reward(result: i8) -> f64 {
    match result {
        1 => WIN_REWARD,
        0 => DRAW_REWARD,
        _ => LOSS_REWARD,
    }
}

/// A single playthrough from empty board to terminal state.
#[derive(Debug)]
pub struct Game {
    board: Board,
    turn: Player,
    reward_player: Player,
    rng: StdRng,
}

impl Game {
    /// Start a new episode with the given first mover and reward-max player.
    pub fn new(first: Player, reward_player: Player) -> Self {
        Self::with_seed(first, reward_player, None)
    }

    /// Start a new episode with a reproducible substitution RNG.
    pub fn with_seed(first: Player, reward_player: Player, seed: Option<u64>) -> Self {
        Game {
            board: Board::new(),
            turn: first,
            reward_player,
            rng: build_rng(seed),
        }
    }

    /// The current board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Whose turn it is
    pub fn to_move(&self) -> Player {
        self.turn
    }

    /// The designated reward-max player
    pub fn reward_player(&self) -> Player {
        self.reward_player
    }

    /// Play one move and report the reward-max player's immediate reward.
    ///
    /// Tolerant of illegal moves, with asymmetric handling:
    /// - reward-max player on an occupied cell: the move is not applied and
    ///   the episode ends with [`ILLEGAL_MOVE_REWARD`];
    /// - any other player on an occupied cell: a uniformly random legal move
    ///   is substituted, so a frozen opponent can never stall the episode.
    ///
    /// After the (possibly substituted) move is applied, the turn flips and
    /// terminal status is evaluated from the reward-max player's perspective.
    pub fn step(&mut self, pos: usize, player: Player) -> Step {
        let pos = if self.board.is_empty(pos) {
            pos
        } else if player == self.reward_player {
            return Step {
                reward: ILLEGAL_MOVE_REWARD,
                done: true,
            };
        } else {
            // The caller only steps while the episode is live, so a
            // non-terminal board has at least one legal move.
            let moves = self.board.legal_moves();
            debug_assert!(!moves.is_empty());
            moves.choose(&mut self.rng).copied().unwrap_or(pos)
        };

        self.board.apply_move(pos, player);
        self.turn = self.turn.opponent();

        match self.board.game_over(self.reward_player) {
            Some(result) => Step {
                reward: terminal_reward(result),
                done: true,
            },
            None => Step {
                reward: 0.0,
                done: false,
            },
        }
    }
}
