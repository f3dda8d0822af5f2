//! # Letter Permute
//!
//! Print every permutation of the letters in a string.
//!
//! ## Features
//!
//! - **Cleaning**: everything except A-Z and a-z is dropped, case is kept
//! - **Deduplication**: repeated letters produce each distinct string once
//! - **Exact counts**: n! and n! / prod(freq!) as arbitrary-precision integers
//! - **Lazy output**: one permutation in memory at a time, stops at the cap
//!   or when the reader closes the pipe
//! - **Encoding detection**: stdin in UTF-16 or legacy charsets is decoded
//!
//! ## Usage
//!
//! ```bash
//! # Distinct permutations
//! letter-permute "C A T"
//!
//! # Keep duplicates, first 4 lines only
//! letter-permute -a -m 4 aab
//! ```
//!
//! ## Example
//!
//! ```rust
//! use letter_permute::processor::{Processor, ProcessorConfig};
//!
//! let config = ProcessorConfig {
//!     quiet: true,
//!     ..ProcessorConfig::default()
//! };
//!
//! let processor = Processor::new(config).unwrap();
//! let mut out = Vec::new();
//! processor.process("aab", &mut out).unwrap();
//! assert_eq!(out, b"aab\naba\nbaa\n");
//! ```

pub mod cli;
pub mod count;
pub mod dedup;
pub mod encoding;
pub mod error;
pub mod filter;
pub mod output;
pub mod permute;
pub mod processor;
pub mod progress;

pub use cli::Args;
pub use error::{PermuteError, Result};
pub use processor::{Processor, ProcessorConfig};
