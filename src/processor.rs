//! Core processing engine
//!
//! Runs one invocation: clean the input, report counts, stream permutations
//! to the output sink and collect statistics.

use crate::cli::{Args, DedupStrategy, InputSource};
use crate::count::{count_for, factorial, to_u64};
use crate::encoding::read_to_string_detected;
use crate::error::{PermuteError, Result};
use crate::filter::{is_clean, LetterFilter};
use crate::output::{OutputLimit, OutputWriter, StopReason, DEFAULT_BUFFER_SIZE};
use crate::permute::PermutationStream;
use crate::progress::{
    create_progress_bar, create_spinner, print_info, print_warning, ProcessingStats,
};

use colored::*;
use indicatif::ProgressBar;
use std::io::{self, Write};

/// Inputs longer than this without a cap get a size warning
pub const LARGE_INPUT_LETTERS: usize = 9;

/// Progress bar refresh interval, in lines
const PROGRESS_STEP: u64 = 1024;

/// Processor configuration
#[derive(Debug, Clone)]
pub struct ProcessorConfig {
    pub allow_duplicates: bool,
    pub limit: OutputLimit,
    pub dedup_strategy: DedupStrategy,
    pub buffer_size: usize,
    pub quiet: bool,
    pub show_progress: bool,
    pub show_stats: bool,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            allow_duplicates: false,
            limit: OutputLimit::Unlimited,
            dedup_strategy: DedupStrategy::Memory,
            buffer_size: DEFAULT_BUFFER_SIZE,
            quiet: false,
            show_progress: false,
            show_stats: false,
        }
    }
}

impl ProcessorConfig {
    pub fn from_args(args: &Args) -> Self {
        Self {
            allow_duplicates: args.allow_duplicates,
            limit: OutputLimit::from_max(args.max),
            dedup_strategy: args.dedup_strategy,
            buffer_size: DEFAULT_BUFFER_SIZE,
            quiet: args.quiet,
            show_progress: args.progress,
            show_stats: args.stats,
        }
    }
}

/// Main processor
pub struct Processor {
    config: ProcessorConfig,
    filter: LetterFilter,
}

impl Processor {
    pub fn new(config: ProcessorConfig) -> Result<Self> {
        Ok(Self {
            config,
            filter: LetterFilter::new()?,
        })
    }

    /// Load the raw text for a run. Returns the text and its size in bytes.
    pub fn read_input(&self, source: &InputSource) -> Result<(String, u64)> {
        match source {
            InputSource::Argument(text) => Ok((text.clone(), text.len() as u64)),
            InputSource::Stdin => {
                let (text, info, len) = read_to_string_detected(io::stdin().lock())?;
                log::debug!(
                    "Read {} bytes from stdin as {} (confidence {:.1})",
                    len,
                    info.name,
                    info.confidence
                );
                Ok((text, len as u64))
            }
        }
    }

    /// Read the input from `source` and write permutations to stdout
    pub fn run(&self, source: &InputSource) -> Result<ProcessingStats> {
        let (raw, input_bytes) = self.read_input(source)?;
        let mut stats = self.process(&raw, io::stdout().lock())?;
        stats.input_bytes = input_bytes;

        if self.config.show_stats && !self.config.quiet {
            stats.print_summary();
        }

        Ok(stats)
    }

    /// Permute the letters of `raw` into `out`.
    ///
    /// Fails with [`PermuteError::NoLetters`] before writing anything if no
    /// letters survive cleaning. A closed pipe ends the run normally.
    pub fn process<W: Write>(&self, raw: &str, out: W) -> Result<ProcessingStats> {
        let mut stats = ProcessingStats::new();
        stats.input_bytes = raw.len() as u64;

        let cleaned = self.filter.clean(raw);
        debug_assert!(is_clean(&cleaned));

        stats.letters = cleaned.len();
        stats.discarded = self.filter.discarded(raw);
        log::debug!(
            "Cleaned input: {} letters kept, {} characters discarded",
            stats.letters,
            stats.discarded
        );

        if cleaned.is_empty() {
            return Err(PermuteError::NoLetters);
        }

        let n = cleaned.len();
        let total = count_for(&cleaned, self.config.allow_duplicates);

        if !self.config.quiet {
            self.report(&cleaned, &total.to_string());
        }

        let expected = to_u64(&total);
        let capped = match (expected, self.config.limit.as_option()) {
            (Some(t), Some(max)) => Some(t.min(max as u64)),
            (None, Some(max)) => Some(max as u64),
            (t, None) => t,
        };

        let mut stream = PermutationStream::new(
            &cleaned,
            self.config.allow_duplicates,
            self.config.dedup_strategy,
            capped.and_then(|c| usize::try_from(c).ok()),
        );

        let pb = if self.config.show_progress && !self.config.quiet {
            match capped {
                Some(len) => create_progress_bar(len, "Permuting..."),
                None => create_spinner("Permuting..."),
            }
        } else {
            ProgressBar::hidden()
        };

        log::debug!("Generating permutations of {} letters", n);

        let mut writer = OutputWriter::new(out, self.config.buffer_size);
        let reason = writer.write_all_lines_with(stream.by_ref(), self.config.limit, |written| {
            if written % PROGRESS_STEP == 0 {
                pb.set_position(written);
            }
        })?;

        pb.set_position(writer.lines_written());
        pb.finish_with_message("Complete".green().to_string());

        if reason == StopReason::BrokenPipe {
            log::debug!("Output closed by reader after {} lines", writer.lines_written());
        }

        stats.emitted_lines = writer.lines_written();
        stats.emitted_bytes = writer.bytes_written();
        stats.duplicates_skipped = stream.duplicates_skipped();
        stats.dedup_memory = stream.dedup_memory();
        stats.finish(reason);

        Ok(stats)
    }

    /// Stderr lines describing the run about to happen
    fn report(&self, cleaned: &str, total: &str) {
        let n = cleaned.len();

        if n > LARGE_INPUT_LETTERS && self.config.limit == OutputLimit::Unlimited {
            print_warning(&format!(
                "Warning: {} letters -> up to {} permutations (this can be huge).",
                n,
                factorial(n)
            ));
        }

        print_info(&format!("Input after cleaning: '{}' (length {})", cleaned, n));
        if self.config.allow_duplicates {
            print_info(&format!("Permutations to generate (duplicates allowed): {}", total));
        } else {
            print_info(&format!("Distinct permutations to generate: {}", total));
        }

        if let Some(max) = self.config.limit.as_option() {
            print_info(&format!("Max output limit: {}", max));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiet_config() -> ProcessorConfig {
        ProcessorConfig {
            quiet: true,
            ..ProcessorConfig::default()
        }
    }

    fn run(config: ProcessorConfig, raw: &str) -> (Vec<String>, ProcessingStats) {
        let processor = Processor::new(config).unwrap();
        let mut out = Vec::new();
        let stats = processor.process(raw, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        (text.lines().map(str::to_string).collect(), stats)
    }

    #[test]
    fn test_cat_distinct() {
        let (lines, stats) = run(quiet_config(), "cat");
        assert_eq!(lines, vec!["cat", "cta", "act", "atc", "tca", "tac"]);
        assert_eq!(stats.emitted_lines, 6);
        assert_eq!(stats.stop_reason, Some(StopReason::Exhausted));
    }

    #[test]
    fn test_spaces_discarded() {
        let (lines, stats) = run(quiet_config(), "C A T");
        assert_eq!(lines[..3], ["CAT", "CTA", "ACT"]);
        assert_eq!(lines.len(), 6);
        assert_eq!(stats.letters, 3);
        assert_eq!(stats.discarded, 2);
    }

    #[test]
    fn test_aab_distinct_and_raw() {
        let (lines, stats) = run(quiet_config(), "aab");
        assert_eq!(lines, vec!["aab", "aba", "baa"]);
        assert_eq!(stats.duplicates_skipped, 3);

        let config = ProcessorConfig {
            allow_duplicates: true,
            ..quiet_config()
        };
        let (lines, _) = run(config, "aab");
        assert_eq!(lines.len(), 6);
        assert_eq!(lines.iter().filter(|l| *l == "aab").count(), 2);
    }

    #[test]
    fn test_no_letters() {
        let processor = Processor::new(quiet_config()).unwrap();
        let mut out = Vec::new();
        let err = processor.process("123", &mut out).unwrap_err();

        assert!(matches!(err, PermuteError::NoLetters));
        assert!(out.is_empty());
    }

    #[test]
    fn test_cap_is_prefix() {
        let config = ProcessorConfig {
            limit: OutputLimit::AtMost(2),
            ..quiet_config()
        };
        let (lines, stats) = run(config, "cat");
        assert_eq!(lines, vec!["cat", "cta"]);
        assert_eq!(stats.stop_reason, Some(StopReason::LimitReached));
    }

    #[test]
    fn test_cap_larger_than_total() {
        let config = ProcessorConfig {
            limit: OutputLimit::AtMost(100),
            ..quiet_config()
        };
        let (lines, stats) = run(config, "ab");
        assert_eq!(lines, vec!["ab", "ba"]);
        assert_eq!(stats.stop_reason, Some(StopReason::Exhausted));
    }

    #[test]
    fn test_lexicographic_strategy() {
        let config = ProcessorConfig {
            dedup_strategy: DedupStrategy::Lexicographic,
            ..quiet_config()
        };
        let (lines, stats) = run(config, "cat");
        assert_eq!(lines, vec!["act", "atc", "cat", "cta", "tac", "tca"]);
        assert_eq!(stats.duplicates_skipped, 0);
    }

    #[test]
    fn test_large_input_with_cap_stops_early() {
        let config = ProcessorConfig {
            limit: OutputLimit::AtMost(3),
            ..quiet_config()
        };
        let (lines, stats) = run(config, "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "abcdefghijklmnopqrstuvwxyz");
        assert_eq!(stats.examined(), 3);
    }
}
