//! Error types for permutation runs
//!
//! The library reports failures through [`PermuteError`]; the binary wraps it
//! in `anyhow` at the top level.

use std::io;
use thiserror::Error;

/// Errors that can end a permutation run
#[derive(Error, Debug)]
pub enum PermuteError {
    /// Nothing left after stripping non-letters
    #[error("No letters A-Za-z found in input (after cleaning). Nothing to permute.")]
    NoLetters,

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The letter pattern could not be compiled
    #[error("Invalid letter pattern: {0}")]
    Pattern(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, PermuteError>;
