//! CLI infrastructure for the tttrl toolkit
//!
//! This module provides the command-line interface for training an agent,
//! playing against it or the exact solver, and querying solved positions.

pub mod commands;
pub mod output;
