//! Error types for the tttrl crate

use thiserror::Error;

/// Main error type for the tttrl crate.
///
/// The taxonomy is narrow on purpose: illegal moves during training are a
/// reward signal, not an error, and the interactive boundary re-prompts
/// instead of failing. What remains is board parsing and a handful of
/// cannot-happen-by-invariant queries.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("no valid moves available")]
    NoValidMoves,

    #[error("board string too short: expected {expected} cells, got {got} in '{context}'")]
    InvalidBoardLength {
        expected: usize,
        got: usize,
        context: String,
    },

    #[error("invalid character '{character}' at position {position} in '{context}'")]
    InvalidCellCharacter {
        character: char,
        position: usize,
        context: String,
    },

    #[error("invalid piece counts: X={x_count}, O={o_count} (must be equal or X ahead by 1)")]
    InvalidPieceCounts { x_count: usize, o_count: usize },

    #[error("progress bar template error: {message}")]
    ProgressBarTemplate { message: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
