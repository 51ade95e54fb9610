//! Newtype wrappers and shared constants.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::tictactoe::Cell;

/// Board size constant for Tic-Tac-Toe.
pub const BOARD_SIZE: usize = 9;

/// Number of encodable board configurations (3^9).
///
/// Every cell holds one of three symbols, so the base-3 encoding covers
/// exactly this many identifiers. Most of them are unreachable by legal
/// play; they are never excluded, only never visited.
pub const NUM_STATES: usize = 19_683;

/// A unique integer identifier for a board configuration.
///
/// Each cell contributes a base-3 digit (Empty=0, X=1, O=2), with cell 0
/// as the least significant digit. The mapping is a bijection between the
/// 3^9 digit sequences and board configurations, which makes the id usable
/// as a direct index into dense per-state tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct StateId(usize);

impl StateId {
    /// Encode a cell array into its identifier.
    ///
    /// Total over any 9-cell board; there is no failure mode.
    pub fn encode(cells: &[Cell; BOARD_SIZE]) -> Self {
        let id = cells.iter().rev().fold(0, |acc, cell| acc * 3 + cell.digit());
        StateId(id)
    }

    /// Get the inner value.
    pub fn value(&self) -> usize {
        self.0
    }

    /// Use the identifier as an index into a dense `NUM_STATES`-sized table.
    pub fn index(&self) -> usize {
        debug_assert!(self.0 < NUM_STATES);
        self.0
    }
}

impl From<StateId> for usize {
    fn from(id: StateId) -> Self {
        id.0
    }
}

impl fmt::Display for StateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
