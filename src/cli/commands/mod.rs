//! CLI command implementations

pub mod play;
pub mod solve;
pub mod train;
