//! Diagnostics module
//!
//! Styled messages, the optional progress bar and the end-of-run summary.
//! Everything here goes to stderr; stdout carries permutations only.

use bytesize::ByteSize;
use colored::*;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::time::{Duration, Instant};

use crate::output::StopReason;

/// Color theme for the tool
pub mod theme {
    use colored::Color;

    pub const ACCENT: Color = Color::Cyan;
    pub const WARNING: Color = Color::Yellow;
    pub const ERROR: Color = Color::Red;
}

/// Print an info message
pub fn print_info(text: &str) {
    eprintln!("  {} {}", "ℹ".color(theme::ACCENT), text);
}

/// Print a warning message
pub fn print_warning(text: &str) {
    eprintln!("  {} {}", "⚠".color(theme::WARNING), text.color(theme::WARNING));
}

/// Print an error message
pub fn print_error(text: &str) {
    eprintln!("  {} {}", "✖".color(theme::ERROR), text.color(theme::ERROR));
}

/// Create a styled progress bar on stderr
pub fn create_progress_bar(total: u64, msg: &str) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(Some(total), ProgressDrawTarget::stderr());

    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.green/dim}] {pos}/{len} ({per_sec}) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░");
    pb.set_style(style);

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Create a styled spinner for runs whose length does not fit a `u64`
pub fn create_spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stderr());

    let style = ProgressStyle::default_spinner()
        .template("{spinner:.green} [{elapsed_precise}] {pos} lines ({per_sec}) {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ");
    pb.set_style(style);

    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));

    pb
}

/// Statistics for one run
#[derive(Debug, Clone)]
pub struct ProcessingStats {
    pub input_bytes: u64,
    pub letters: usize,
    pub discarded: usize,
    pub emitted_lines: u64,
    pub emitted_bytes: u64,
    pub duplicates_skipped: u64,
    pub dedup_memory: usize,
    pub stop_reason: Option<StopReason>,
    pub start_time: Instant,
    pub finish_time: Option<Instant>,
}

impl ProcessingStats {
    pub fn new() -> Self {
        Self {
            input_bytes: 0,
            letters: 0,
            discarded: 0,
            emitted_lines: 0,
            emitted_bytes: 0,
            duplicates_skipped: 0,
            dedup_memory: 0,
            stop_reason: None,
            start_time: Instant::now(),
            finish_time: None,
        }
    }

    pub fn finish(&mut self, reason: StopReason) {
        self.stop_reason = Some(reason);
        self.finish_time = Some(Instant::now());
    }

    pub fn elapsed(&self) -> Duration {
        match self.finish_time {
            Some(end) => end.duration_since(self.start_time),
            None => self.start_time.elapsed(),
        }
    }

    /// Permutations pulled from the generator, duplicates included
    pub fn examined(&self) -> u64 {
        self.emitted_lines + self.duplicates_skipped
    }

    pub fn lines_per_second(&self) -> f64 {
        let elapsed = self.elapsed().as_secs_f64();
        if elapsed > 0.0 {
            self.emitted_lines as f64 / elapsed
        } else {
            0.0
        }
    }

    /// Print final statistics
    pub fn print_summary(&self) {
        let stop = match self.stop_reason {
            Some(StopReason::Exhausted) => "all permutations written",
            Some(StopReason::LimitReached) => "output limit reached",
            Some(StopReason::BrokenPipe) => "output closed by reader",
            None => "interrupted",
        };

        eprintln!();
        eprintln!("{}", "═".repeat(60).green());
        eprintln!("{}", "                    PERMUTATION COMPLETE".green().bold());
        eprintln!("{}", "═".repeat(60).green());
        eprintln!();

        eprintln!("  {} {}", "Input read:     ".green(), ByteSize(self.input_bytes));
        eprintln!("  {} {}", "Letters kept:   ".green(), format_number(self.letters as u64));
        eprintln!("  {} {}", "Discarded:      ".green(), format_number(self.discarded as u64));
        eprintln!();

        eprintln!("  {} {}", "Examined:       ".green(), format_number(self.examined()));
        eprintln!("  {} {}", "Duplicates:     ".yellow(), format_number(self.duplicates_skipped));
        eprintln!(
            "  {} {}",
            "Lines written:  ".green().bold(),
            format_number(self.emitted_lines).green().bold()
        );
        eprintln!("  {} {}", "Output size:    ".green(), ByteSize(self.emitted_bytes));
        if self.dedup_memory > 0 {
            eprintln!("  {} {}", "Seen-set size:  ".green(), ByteSize(self.dedup_memory as u64));
        }
        eprintln!("  {} {}", "Stopped:        ".green(), stop);

        eprintln!();
        eprintln!("  {} {}", "Duration:       ".green(), format_duration(self.elapsed()));
        eprintln!("  {} {:.2} lines/sec", "Throughput:     ".green(), self.lines_per_second());
        eprintln!();
        eprintln!("{}", "═".repeat(60).green());
    }
}

impl Default for ProcessingStats {
    fn default() -> Self {
        Self::new()
    }
}

/// Format a number with thousand separators
pub fn format_number(n: u64) -> String {
    group_digits(&n.to_string())
}

/// Insert thousand separators into a string of decimal digits
pub fn group_digits(digits: &str) -> String {
    let chars: Vec<char> = digits.chars().collect();
    let mut result = String::with_capacity(chars.len() + chars.len() / 3);

    for (i, c) in chars.iter().enumerate() {
        if i > 0 && (chars.len() - i) % 3 == 0 {
            result.push(',');
        }
        result.push(*c);
    }

    result
}

/// Format duration as human-readable string
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();

    if secs < 60 {
        format!("{:.1}s", duration.as_secs_f64())
    } else if secs < 3600 {
        let mins = secs / 60;
        let secs = secs % 60;
        format!("{}m {}s", mins, secs)
    } else {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        format!("{}h {}m", hours, mins)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(123), "123");
        assert_eq!(format_number(1234), "1,234");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_group_digits_big() {
        assert_eq!(group_digits("51090942171709440000"), "51,090,942,171,709,440,000");
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(30)), "30.0s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m 30s");
        assert_eq!(format_duration(Duration::from_secs(3661)), "1h 1m");
    }

    #[test]
    fn test_stats() {
        let mut stats = ProcessingStats::new();
        stats.emitted_lines = 3;
        stats.duplicates_skipped = 3;
        stats.finish(StopReason::Exhausted);

        assert_eq!(stats.examined(), 6);
        assert_eq!(stats.stop_reason, Some(StopReason::Exhausted));
        assert!(stats.finish_time.is_some());
    }
}
