//! Dense state-action value table.

use rand::Rng;
use rand::rngs::StdRng;
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};

use crate::types::{BOARD_SIZE, NUM_STATES, StateId};

/// Action-value estimates for every (state, move) pair.
///
/// Conceptually a `[3^9 x 9]` table, stored flat. Entries for unreachable
/// states or illegal moves are addressable and default to zero; correct play
/// simply never references them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueTable {
    values: Vec<f64>,
}

impl ValueTable {
    /// All-zero table
    pub fn new() -> Self {
        ValueTable {
            values: vec![0.0; NUM_STATES * BOARD_SIZE],
        }
    }

    fn index(state: StateId, action: usize) -> usize {
        debug_assert!(action < BOARD_SIZE);
        state.index() * BOARD_SIZE + action
    }

    pub fn get(&self, state: StateId, action: usize) -> f64 {
        self.values[Self::index(state, action)]
    }

    pub fn set(&mut self, state: StateId, action: usize, value: f64) {
        self.values[Self::index(state, action)] = value;
    }

    /// Largest action value in the state (the bootstrap target).
    pub fn max(&self, state: StateId) -> f64 {
        self.row(state)
            .iter()
            .fold(f64::NEG_INFINITY, |acc, &v| acc.max(v))
    }

    /// Index of the largest action value, first index on ties.
    pub fn argmax(&self, state: StateId) -> usize {
        let row = self.row(state);
        let mut best = 0;
        for (action, &value) in row.iter().enumerate() {
            if value > row[best] {
                best = action;
            }
        }
        best
    }

    /// Argmax over the row perturbed by independent Gaussian noise per
    /// action, scaled by `scale`.
    ///
    /// All 9 actions compete, legal or not; picking an occupied cell is how
    /// the learner ever experiences the illegal-move penalty.
    pub fn noisy_argmax(&self, state: StateId, scale: f64, rng: &mut StdRng) -> usize {
        let row = self.row(state);
        let mut best = 0;
        let mut best_value = f64::NEG_INFINITY;
        for (action, &value) in row.iter().enumerate() {
            let noise: f64 = rng.sample(StandardNormal);
            let perturbed = value + noise * scale;
            if perturbed > best_value {
                best_value = perturbed;
                best = action;
            }
        }
        best
    }

    fn row(&self, state: StateId) -> &[f64] {
        let start = state.index() * BOARD_SIZE;
        &self.values[start..start + BOARD_SIZE]
    }
}

impl Default for ValueTable {
    fn default() -> Self {
        Self::new()
    }
}
