//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{BOARD_SIZE, StateId};

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | ' ' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// Base-3 digit used by the state identifier encoding
    pub fn digit(self) -> usize {
        match self {
            Cell::Empty => 0,
            Cell::X => 1,
            Cell::O => 2,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

/// The 3x3 grid, row-major and 0-indexed.
///
/// A board is exclusively owned by one game session and mutated in place;
/// callers that need lookahead copy it first (it is 9 bytes, so `Copy`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; BOARD_SIZE],
}

impl Board {
    /// Create a new all-empty board
    pub fn new() -> Self {
        Board {
            cells: [Cell::Empty; BOARD_SIZE],
        }
    }

    /// Clear every cell (start of a new episode)
    pub fn reset(&mut self) {
        self.cells = [Cell::Empty; BOARD_SIZE];
    }

    /// Get cell at position (0-8)
    pub fn get(&self, pos: usize) -> Cell {
        self.cells[pos]
    }

    /// Check if a position is empty
    pub fn is_empty(&self, pos: usize) -> bool {
        self.cells[pos] == Cell::Empty
    }

    /// Check if no empty cell remains
    pub fn is_full(&self) -> bool {
        !self.cells.contains(&Cell::Empty)
    }

    /// All empty positions, in ascending order
    pub fn legal_moves(&self) -> Vec<usize> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| i)
            .collect()
    }

    /// Place the player's symbol at the given position.
    ///
    /// Total over any position in range: the cell is overwritten without an
    /// occupancy check. Callers that must reject occupied cells (the game
    /// session's tolerant `step`, the interactive front end) check first.
    pub fn apply_move(&mut self, pos: usize, player: Player) {
        self.cells[pos] = player.to_cell();
    }

    /// Check if a player has won
    pub fn has_won(&self, player: Player) -> bool {
        super::lines::has_won(&self.cells, player)
    }

    /// Result of the game from `reference`'s perspective.
    ///
    /// `Some(1)` if `reference` has a winning line, `Some(-1)` if the
    /// opponent does, `Some(0)` on a full board, `None` while in progress.
    pub fn game_over(&self, reference: Player) -> Option<i8> {
        if self.has_won(reference) {
            Some(1)
        } else if self.has_won(reference.opponent()) {
            Some(-1)
        } else if self.is_full() {
            Some(0)
        } else {
            None
        }
    }

    /// Base-3 identifier of this configuration
    pub fn state_id(&self) -> StateId {
        StateId::encode(&self.cells)
    }

    /// Create a board from a 9-character string ('.', 'X', 'O').
    ///
    /// Whitespace is filtered out before parsing.
    ///
    /// # Errors
    ///
    /// Returns error if fewer than 9 non-whitespace characters remain or any
    /// character is not a valid cell representation.
    pub fn from_string(s: &str) -> Result<Self, crate::Error> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() < BOARD_SIZE {
            return Err(crate::Error::InvalidBoardLength {
                expected: BOARD_SIZE,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; BOARD_SIZE];
        for (i, &c) in chars.iter().take(BOARD_SIZE).enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| crate::Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }

        Ok(Board { cells })
    }

    /// Infer whose turn it is from the piece counts (X opens).
    ///
    /// # Errors
    ///
    /// Returns error if the counts cannot arise from alternating X-first play.
    pub fn to_move_from_counts(&self) -> Result<Player, crate::Error> {
        let x_count = self.cells.iter().filter(|&&c| c == Cell::X).count();
        let o_count = self.cells.iter().filter(|&&c| c == Cell::O).count();

        if x_count == o_count {
            Ok(Player::X)
        } else if x_count == o_count + 1 {
            Ok(Player::O)
        } else {
            Err(crate::Error::InvalidPieceCounts { x_count, o_count })
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, &cell) in self.cells.iter().enumerate() {
            write!(f, "{}", cell.to_char())?;
            if (i + 1) % 3 == 0 && i < 8 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
