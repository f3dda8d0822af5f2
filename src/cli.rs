//! Command-line interface definition for letter-permute
//!
//! Provides argument parsing and input source selection.

use clap::{Parser, ValueEnum};

/// Print every permutation of the letters in a string
///
/// Non-letters are discarded before permuting. Repeated letters are
/// deduplicated unless --allow-duplicates is given.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "letter-permute",
    author = "m0h1nd4",
    version,
    about = "Print permutations of a cleaned letters-only input",
    long_about = r#"
Print permutations of the letters A-Z and a-z found in the input. Every
other character is discarded. Case is preserved, so 'A' and 'a' count as
different letters.

Permutations go to stdout, one per line. Counts, warnings and statistics go
to stderr.

EXAMPLES:
    # All distinct orderings of C, A and T
    letter-permute "C A T"

    # Read the letters from stdin
    echo "C A T" | letter-permute

    # Keep duplicate orderings produced by repeated letters
    letter-permute --allow-duplicates aab

    # Stop after 10 lines
    letter-permute --max 10 "permutation"

    # Distinct orderings in sorted order without a seen-set
    letter-permute --dedup-strategy lexicographic mississippi
"#
)]
pub struct Args {
    /// String of characters (non-letters are discarded). If omitted, stdin is read.
    #[arg(value_name = "INPUT")]
    pub input: Option<String>,

    /// Do not deduplicate permutations when the input has repeated letters
    #[arg(short, long, default_value_t = false)]
    pub allow_duplicates: bool,

    /// Stop after printing N permutations (0 means no limit)
    #[arg(short, long, value_name = "N", default_value_t = 0)]
    pub max: usize,

    /// Deduplication strategy for distinct mode
    #[arg(long, value_enum, default_value_t = DedupStrategy::Memory)]
    pub dedup_strategy: DedupStrategy,

    /// Show a progress bar on stderr
    #[arg(long, default_value_t = false)]
    pub progress: bool,

    /// Show detailed statistics
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    /// Quiet mode - only errors on stderr
    #[arg(short, long, default_value_t = false, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Verbose mode - debug logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, default_value_t = false)]
    pub no_color: bool,
}

/// Deduplication strategy for distinct mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DedupStrategy {
    /// Raw enumeration order, repeats dropped via an in-memory seen-set
    Memory,
    /// Sorted order via next-permutation, constant extra memory
    Lexicographic,
}

/// Where the raw text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Argument(String),
    Stdin,
}

impl Args {
    /// Positional argument if present and non-empty, otherwise stdin
    pub fn input_source(&self) -> InputSource {
        match self.input {
            Some(ref text) if !text.is_empty() => InputSource::Argument(text.clone()),
            _ => InputSource::Stdin,
        }
    }

    /// `env_logger` filter for the chosen verbosity
    pub fn log_level(&self) -> log::LevelFilter {
        if self.verbose {
            log::LevelFilter::Debug
        } else if self.quiet {
            log::LevelFilter::Error
        } else {
            log::LevelFilter::Warn
        }
    }
}
