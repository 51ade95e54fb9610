//! Self-play temporal-difference trainer.
//!
//! Two value tables play each other: the learning table is updated after
//! every one of its moves, while a frozen copy supplies the opponent's
//! policy. After each generation the frozen table is wholesale-replaced by a
//! snapshot of the learning table. A single evolving table playing itself
//! chases a non-stationary target; freezing one side for a generation gives
//! the learner a fixed baseline to improve against.

pub mod value_table;

pub use value_table::ValueTable;

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

use crate::tictactoe::{Game, Player};
use crate::utils::{build_rng, mean};

/// Training hyperparameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrainerConfig {
    /// Number of generations (frozen-table promotions)
    pub generations: usize,
    /// Episodes played per generation
    pub episodes_per_generation: usize,
    /// TD update step size
    pub learning_rate: f64,
    /// Discount factor for bootstrapped future value
    pub discount_factor: f64,
    /// Random seed for reproducibility
    pub seed: Option<u64>,
}

impl Default for TrainerConfig {
    fn default() -> Self {
        TrainerConfig {
            generations: 30_000,
            episodes_per_generation: 100,
            learning_rate: 0.8,
            discount_factor: 0.95,
            seed: None,
        }
    }
}

/// Per-generation reward summary, consumed by progress reporting.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationStats {
    /// Generation index, 0-based
    pub generation: usize,
    /// Final reward of each episode in this generation
    pub final_rewards: Vec<f64>,
    /// Running mean of final rewards after each episode of this generation
    pub mean_rewards: Vec<f64>,
}

impl GenerationStats {
    /// Mean final reward over the whole generation
    pub fn mean_reward(&self) -> f64 {
        mean(&self.final_rewards)
    }
}

/// Trainer owning the learning/frozen table pair and the episode counter.
#[derive(Debug)]
pub struct SelfPlayTrainer {
    config: TrainerConfig,
    learning: ValueTable,
    frozen: ValueTable,
    total_episodes: usize,
    rng: StdRng,
}

/// The player whose transitions are updated and whose rewards are tracked
const LEARNING_PLAYER: Player = Player::X;

impl SelfPlayTrainer {
    pub fn new(config: TrainerConfig) -> Self {
        let rng = build_rng(config.seed);
        SelfPlayTrainer {
            config,
            learning: ValueTable::new(),
            frozen: ValueTable::new(),
            total_episodes: 0,
            rng,
        }
    }

    pub fn config(&self) -> &TrainerConfig {
        &self.config
    }

    /// Episodes played so far across all generations
    pub fn total_episodes(&self) -> usize {
        self.total_episodes
    }

    pub fn learning_table(&self) -> &ValueTable {
        &self.learning
    }

    pub fn frozen_table(&self) -> &ValueTable {
        &self.frozen
    }

    /// Play one episode and apply the TD update after every learning move.
    ///
    /// Returns the episode's final reward from the learning player's
    /// perspective: +17 win, -1 draw, -19 loss, or -10 for an illegal move.
    pub fn train_episode(&mut self) -> f64 {
        // Coin flip decides the first mover; the learning player is always
        // the reward-max player.
        let first = if self.rng.random::<bool>() {
            Player::X
        } else {
            Player::O
        };
        let game_seed = self.rng.random::<u64>();
        let mut game = Game::with_seed(first, LEARNING_PLAYER, Some(game_seed));

        // Anneals toward exploitation without ever reaching zero exploration
        let exploration = 1.0 / (1.0 + self.total_episodes as f64);

        let alpha = self.config.learning_rate;
        let gamma = self.config.discount_factor;

        let mut final_reward;
        loop {
            let state = game.board().state_id();
            let step = if game.to_move() == LEARNING_PLAYER {
                let action = self.learning.noisy_argmax(state, exploration, &mut self.rng);
                let step = game.step(action, LEARNING_PLAYER);

                // One-step return, bootstrapped from the learning table's
                // value at the resulting state regardless of who moves next.
                let next_state = game.board().state_id();
                let target = step.reward + gamma * self.learning.max(next_state);
                let updated = (1.0 - alpha) * self.learning.get(state, action) + alpha * target;
                self.learning.set(state, action, updated);

                step
            } else {
                let action = self.frozen.argmax(state);
                game.step(action, LEARNING_PLAYER.opponent())
            };

            final_reward = step.reward;
            if step.done {
                break;
            }
        }

        self.total_episodes += 1;
        final_reward
    }

    /// Run one generation of episodes against the current frozen table.
    pub fn train_generation(&mut self, generation: usize) -> GenerationStats {
        let mut final_rewards = Vec::with_capacity(self.config.episodes_per_generation);
        let mut mean_rewards = Vec::with_capacity(self.config.episodes_per_generation);

        for _ in 0..self.config.episodes_per_generation {
            final_rewards.push(self.train_episode());
            mean_rewards.push(mean(&final_rewards));
        }

        GenerationStats {
            generation,
            final_rewards,
            mean_rewards,
        }
    }

    /// Replace the frozen table with a snapshot of the learning table.
    pub fn promote(&mut self) {
        self.frozen = self.learning.clone();
    }

    /// Run the full schedule, promoting after every generation.
    ///
    /// Calls `on_generation` with each generation's stats as it completes.
    pub fn train<F>(&mut self, mut on_generation: F)
    where
        F: FnMut(&GenerationStats),
    {
        for generation in 0..self.config.generations {
            let stats = self.train_generation(generation);
            self.promote();
            on_generation(&stats);
        }
    }

    /// Best legal move for the learning player in exhibition play.
    ///
    /// Unlike training-time action selection, this masks occupied cells so a
    /// trained agent facing a human never forfeits on a technicality.
    ///
    /// # Errors
    ///
    /// Returns an error if the board has no legal moves.
    pub fn greedy_legal_move(&self, board: &crate::tictactoe::Board) -> crate::Result<usize> {
        let state = board.state_id();
        board
            .legal_moves()
            .into_iter()
            .max_by(|&a, &b| {
                self.learning
                    .get(state, a)
                    .total_cmp(&self.learning.get(state, b))
            })
            .ok_or(crate::Error::NoValidMoves)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::{Board, ILLEGAL_MOVE_REWARD};
    use crate::tictactoe::game::{DRAW_REWARD, LOSS_REWARD, WIN_REWARD};

    fn small_config(seed: u64) -> TrainerConfig {
        TrainerConfig {
            generations: 3,
            episodes_per_generation: 20,
            seed: Some(seed),
            ..TrainerConfig::default()
        }
    }

    #[test]
    fn test_episode_counter_is_monotone() {
        let mut trainer = SelfPlayTrainer::new(small_config(1));
        assert_eq!(trainer.total_episodes(), 0);

        trainer.train_episode();
        assert_eq!(trainer.total_episodes(), 1);

        trainer.train_generation(0);
        assert_eq!(trainer.total_episodes(), 21);
    }

    #[test]
    fn test_final_rewards_are_terminal_values() {
        let mut trainer = SelfPlayTrainer::new(small_config(2));
        let stats = trainer.train_generation(0);

        assert_eq!(stats.final_rewards.len(), 20);
        for &reward in &stats.final_rewards {
            assert!(
                reward == WIN_REWARD
                    || reward == DRAW_REWARD
                    || reward == LOSS_REWARD
                    || reward == ILLEGAL_MOVE_REWARD,
                "unexpected final reward {reward}"
            );
        }
    }

    #[test]
    fn test_mean_rewards_track_running_mean() {
        let mut trainer = SelfPlayTrainer::new(small_config(3));
        let stats = trainer.train_generation(0);

        assert_eq!(stats.mean_rewards.len(), stats.final_rewards.len());
        let expected = mean(&stats.final_rewards[..5]);
        assert!((stats.mean_rewards[4] - expected).abs() < 1e-12);
    }

    #[test]
    fn test_promote_copies_learning_table() {
        let mut trainer = SelfPlayTrainer::new(small_config(4));
        trainer.train_generation(0);
        assert_ne!(trainer.frozen_table(), trainer.learning_table());

        trainer.promote();
        assert_eq!(trainer.frozen_table(), trainer.learning_table());
    }

    #[test]
    fn test_full_run_plays_all_episodes() {
        let mut trainer = SelfPlayTrainer::new(small_config(5));
        let mut generations_seen = 0;
        trainer.train(|stats| {
            assert_eq!(stats.final_rewards.len(), 20);
            generations_seen += 1;
        });

        assert_eq!(generations_seen, 3);
        assert_eq!(trainer.total_episodes(), 60);
    }

    #[test]
    fn test_seeded_training_is_reproducible() {
        let mut a = SelfPlayTrainer::new(small_config(6));
        let mut b = SelfPlayTrainer::new(small_config(6));

        let stats_a = a.train_generation(0);
        let stats_b = b.train_generation(0);

        assert_eq!(stats_a.final_rewards, stats_b.final_rewards);
        assert_eq!(a.learning_table(), b.learning_table());
    }

    #[test]
    fn test_greedy_legal_move_is_legal() {
        let mut trainer = SelfPlayTrainer::new(small_config(7));
        trainer.train_generation(0);

        let board = Board::from_string("X...O....").unwrap();
        let pos = trainer.greedy_legal_move(&board).unwrap();
        assert!(board.is_empty(pos));

        let full = Board::from_string("XOXXOOOXX").unwrap();
        assert!(trainer.greedy_legal_move(&full).is_err());
    }
}
