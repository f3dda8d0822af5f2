//! Input cleaning module
//!
//! Reduces raw input to the letters that take part in permutation.

use crate::error::Result;
use regex::Regex;

/// Common patterns used when cleaning input
pub mod patterns {
    /// Anything that is not an ASCII letter
    pub const NON_LETTER: &str = r"[^A-Za-z]";
}

/// Strips everything except A-Z and a-z from input text
#[derive(Debug, Clone)]
pub struct LetterFilter {
    pattern: Regex,
}

impl LetterFilter {
    /// Create a new letter filter
    pub fn new() -> Result<Self> {
        let pattern = Regex::new(patterns::NON_LETTER)?;
        Ok(Self { pattern })
    }

    /// Remove every non-letter, keeping order and case
    pub fn clean(&self, raw: &str) -> String {
        self.pattern.replace_all(raw, "").into_owned()
    }

    /// Number of characters `clean` would drop
    pub fn discarded(&self, raw: &str) -> usize {
        self.pattern.find_iter(raw).map(|m| m.as_str().chars().count()).sum()
    }
}

/// Clean input with a freshly built [`LetterFilter`]
pub fn clean_input(raw: &str) -> Result<String> {
    Ok(LetterFilter::new()?.clean(raw))
}

/// Check whether a string is already clean
pub fn is_clean(word: &str) -> bool {
    word.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_strips_spaces() {
        assert_eq!(clean_input("C A T").unwrap(), "CAT");
    }

    #[test]
    fn test_clean_keeps_case_and_order() {
        assert_eq!(clean_input("h3Ll0-wOrLd!").unwrap(), "hLlwOrLd");
    }

    #[test]
    fn test_clean_no_letters() {
        assert_eq!(clean_input("123 !?").unwrap(), "");
        assert_eq!(clean_input("").unwrap(), "");
    }

    #[test]
    fn test_clean_drops_non_ascii_letters() {
        let filter = LetterFilter::new().unwrap();
        assert_eq!(filter.clean("café\n"), "caf");
        assert_eq!(filter.discarded("café\n"), 2);
    }

    #[test]
    fn test_cleaned_is_subsequence() {
        let raw = "a1b2 c3,D";
        let cleaned = clean_input(raw).unwrap();
        assert!(is_clean(&cleaned));

        let mut rest = raw.chars();
        for c in cleaned.chars() {
            assert!(rest.any(|r| r == c));
        }
    }
}
