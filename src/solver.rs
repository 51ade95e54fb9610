//! Exact minimax solver with a dense memo table.
//!
//! Values are exact game outcomes in {-1, 0, +1} from the perspective of the
//! player to move. The memo is keyed by board identifier alone: under
//! alternating play the mover is determined by the piece counts, so one slot
//! per board suffices. It grows monotonically and is never evicted; reuse
//! across calls is the entire point of keeping the solver around.

use rand::rngs::StdRng;
use rand::seq::IndexedRandom;

use crate::Result;
use crate::tictactoe::{Board, Player};
use crate::types::{BOARD_SIZE, NUM_STATES};
use crate::utils::build_rng;

pub struct Solver {
    memo: Vec<Option<i8>>,
    rng: StdRng,
}

impl Solver {
    pub fn new() -> Self {
        Self::with_seed(None)
    }

    /// Solver with a reproducible tie-break RNG.
    pub fn with_seed(seed: Option<u64>) -> Self {
        Solver {
            memo: vec![None; NUM_STATES],
            rng: build_rng(seed),
        }
    }

    /// Exact value of the position for the player to move.
    pub fn value(&mut self, board: &Board, to_move: Player) -> i8 {
        self.value_at_depth(board, to_move, 0)
    }

    fn value_at_depth(&mut self, board: &Board, to_move: Player, depth: usize) -> i8 {
        // Recursion is bounded by the number of cells
        debug_assert!(depth <= BOARD_SIZE);

        let index = board.state_id().index();
        if let Some(value) = self.memo[index] {
            return value;
        }

        if let Some(result) = board.game_over(to_move) {
            self.memo[index] = Some(result);
            return result;
        }

        // Zero-sum: a child position worth v to the opponent is worth -v to
        // the player who just moved.
        let mut best = i8::MIN;
        for pos in board.legal_moves() {
            let mut child = *board;
            child.apply_move(pos, to_move);
            let score = -self.value_at_depth(&child, to_move.opponent(), depth + 1);
            best = best.max(score);
        }

        self.memo[index] = Some(best);
        best
    }

    /// All moves achieving the best attainable value for `player`.
    ///
    /// # Errors
    ///
    /// Returns an error if the board has no legal moves.
    pub fn optimal_moves(&mut self, board: &Board, player: Player) -> Result<Vec<usize>> {
        let mut best_score = i8::MIN;
        let mut best_moves = Vec::new();

        for pos in board.legal_moves() {
            let mut child = *board;
            child.apply_move(pos, player);
            let score = -self.value(&child, player.opponent());
            if score > best_score {
                best_score = score;
                best_moves.clear();
            }
            if score == best_score {
                best_moves.push(pos);
            }
        }

        if best_moves.is_empty() {
            return Err(crate::Error::NoValidMoves);
        }
        Ok(best_moves)
    }

    /// Pick uniformly among the optimal moves.
    ///
    /// Among moves with identical game-theoretic value the solver has no
    /// preference; varying the choice avoids an exploitable fixed playstyle.
    ///
    /// # Errors
    ///
    /// Returns an error if the board has no legal moves.
    pub fn best_move(&mut self, board: &Board, player: Player) -> Result<usize> {
        let moves = self.optimal_moves(board, player)?;
        moves
            .choose(&mut self.rng)
            .copied()
            .ok_or(crate::Error::NoValidMoves)
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_is_a_draw() {
        let mut solver = Solver::with_seed(Some(42));
        assert_eq!(solver.value(&Board::new(), Player::X), 0);
    }

    #[test]
    fn test_immediate_win_detected() {
        // X wins at 2 right away, or at 3 by blocking O and double-threatening
        let board = Board::from_string("XX..OO...").unwrap();
        let mut solver = Solver::with_seed(Some(42));
        assert_eq!(solver.value(&board, Player::X), 1);

        let moves = solver.optimal_moves(&board, Player::X).unwrap();
        assert_eq!(moves, vec![2, 3]);
    }

    #[test]
    fn test_forced_block() {
        // Only blocking X's [0,1,2] threat at cell 2 saves the draw for O
        let board = Board::from_string("XX..O....").unwrap();
        let mut solver = Solver::with_seed(Some(42));
        let moves = solver.optimal_moves(&board, Player::O).unwrap();
        assert_eq!(moves, vec![2]);
    }

    #[test]
    fn test_terminal_position_value() {
        let board = Board::from_string("XXXOO....").unwrap();
        let mut solver = Solver::with_seed(Some(42));
        assert_eq!(solver.value(&board, Player::X), 1);
        // Memoized on the second call
        assert_eq!(solver.value(&board, Player::X), 1);
    }

    #[test]
    fn test_negation_consistency() {
        // For every opening move by X, the child value for O negated equals
        // X's score for that move; the best of them is the overall value.
        let mut solver = Solver::with_seed(Some(42));
        let board = Board::new();

        let mut best = i8::MIN;
        for pos in board.legal_moves() {
            let mut child = board;
            child.apply_move(pos, Player::X);
            best = best.max(-solver.value(&child, Player::O));
        }
        assert_eq!(best, solver.value(&board, Player::X));
    }

    #[test]
    fn test_best_move_errors_on_full_board() {
        let board = Board::from_string("XOXXOOOXX").unwrap();
        let mut solver = Solver::with_seed(Some(42));
        assert!(solver.best_move(&board, Player::X).is_err());
    }

    #[test]
    fn test_corner_and_center_openings_draw() {
        // Every opening move preserves the forced draw for the second player
        let mut solver = Solver::with_seed(Some(42));
        for pos in 0..9 {
            let mut child = Board::new();
            child.apply_move(pos, Player::X);
            assert_eq!(solver.value(&child, Player::O), 0, "opening at {pos}");
        }
    }
}
