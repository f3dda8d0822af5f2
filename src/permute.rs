//! Permutation generation
//!
//! All generators are lazy iterators that build one `String` per step, so a
//! run holds O(n) state no matter how many permutations it walks through.
//!
//! - [`AllPermutations`]: every index arrangement, in lexicographic order of
//!   the position indices (the input itself comes first)
//! - [`Deduplicated`]: the same sequence passed through a seen-set, which
//!   drops repeated strings (or keeps them, with the no-op set)
//! - [`LexicographicPermutations`]: distinct strings in sorted order, with no
//!   seen-set

use crate::cli::DedupStrategy;
use crate::dedup::{create_deduplicator, DedupStats, Deduplicator};
use std::iter::FusedIterator;

/// Step `items` to the next lexicographically greater arrangement.
///
/// Returns false (leaving `items` sorted ascending) once the last
/// arrangement has been passed. Equal elements are never swapped with each
/// other, so a multiset only visits each distinct arrangement once.
pub fn next_permutation<T: Ord>(items: &mut [T]) -> bool {
    if items.len() < 2 {
        return false;
    }

    // Longest non-increasing suffix
    let mut i = items.len() - 1;
    while i > 0 && items[i - 1] >= items[i] {
        i -= 1;
    }

    if i == 0 {
        items.reverse();
        return false;
    }

    let pivot = i - 1;
    let mut j = items.len() - 1;
    while items[j] <= items[pivot] {
        j -= 1;
    }

    items.swap(pivot, j);
    items[i..].reverse();
    true
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Fresh,
    Running,
    Done,
}

/// Every one of the n! orderings, duplicates included
#[derive(Debug, Clone)]
pub struct AllPermutations {
    letters: Vec<char>,
    indices: Vec<usize>,
    state: State,
}

impl AllPermutations {
    pub fn new(cleaned: &str) -> Self {
        let letters: Vec<char> = cleaned.chars().collect();
        let indices = (0..letters.len()).collect();

        Self {
            letters,
            indices,
            state: State::Fresh,
        }
    }

    fn current(&self) -> String {
        self.indices.iter().map(|&i| self.letters[i]).collect()
    }
}

impl Iterator for AllPermutations {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match self.state {
            State::Fresh => self.state = State::Running,
            State::Running => {
                if !next_permutation(&mut self.indices) {
                    self.state = State::Done;
                    return None;
                }
            }
            State::Done => return None,
        }

        Some(self.current())
    }
}

impl FusedIterator for AllPermutations {}

/// Filters the inner iterator through a [`Deduplicator`]
pub struct Deduplicated<I> {
    inner: I,
    seen: Box<dyn Deduplicator>,
    stats: DedupStats,
}

impl<I: Iterator<Item = String>> Deduplicated<I> {
    pub fn new(inner: I, seen: Box<dyn Deduplicator>) -> Self {
        Self {
            inner,
            seen,
            stats: DedupStats::new(),
        }
    }

    pub fn stats(&self) -> DedupStats {
        self.stats
    }

    /// Approximate bytes held by the seen-set
    pub fn memory_usage(&self) -> usize {
        self.seen.memory_usage()
    }
}

impl<I: Iterator<Item = String>> Iterator for Deduplicated<I> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        for perm in self.inner.by_ref() {
            if self.seen.insert(&perm) {
                self.stats.record_unique();
                return Some(perm);
            }
            self.stats.record_duplicate();
        }
        None
    }
}

/// Distinct permutations in sorted textual order, no seen-set
#[derive(Debug, Clone)]
pub struct LexicographicPermutations {
    letters: Vec<char>,
    state: State,
}

impl LexicographicPermutations {
    pub fn new(cleaned: &str) -> Self {
        let mut letters: Vec<char> = cleaned.chars().collect();
        letters.sort_unstable();

        Self {
            letters,
            state: State::Fresh,
        }
    }
}

impl Iterator for LexicographicPermutations {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match self.state {
            State::Fresh => self.state = State::Running,
            State::Running => {
                if !next_permutation(&mut self.letters) {
                    self.state = State::Done;
                    return None;
                }
            }
            State::Done => return None,
        }

        Some(self.letters.iter().collect())
    }
}

impl FusedIterator for LexicographicPermutations {}

/// The generator picked for a run
pub enum PermutationStream {
    /// Index order, through the seen-set (or the no-op set in raw mode)
    Indexed(Deduplicated<AllPermutations>),
    /// Sorted distinct order
    Lexicographic(LexicographicPermutations),
}

impl PermutationStream {
    /// Build the stream for `cleaned`.
    ///
    /// `expected` is the number of outputs the mode will produce, if known;
    /// it only sizes the seen-set.
    pub fn new(
        cleaned: &str,
        allow_duplicates: bool,
        strategy: DedupStrategy,
        expected: Option<usize>,
    ) -> Self {
        if !allow_duplicates && strategy == DedupStrategy::Lexicographic {
            return Self::Lexicographic(LexicographicPermutations::new(cleaned));
        }

        Self::Indexed(Deduplicated::new(
            AllPermutations::new(cleaned),
            create_deduplicator(allow_duplicates, expected),
        ))
    }

    /// Duplicates skipped so far (only the seen-set strategy skips any)
    pub fn duplicates_skipped(&self) -> u64 {
        match self {
            Self::Indexed(it) => it.stats().duplicate_count,
            Self::Lexicographic(_) => 0,
        }
    }

    /// Approximate bytes held for deduplication
    pub fn dedup_memory(&self) -> usize {
        match self {
            Self::Indexed(it) => it.memory_usage(),
            Self::Lexicographic(_) => 0,
        }
    }
}

impl Iterator for PermutationStream {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        match self {
            Self::Indexed(it) => it.next(),
            Self::Lexicographic(it) => it.next(),
        }
    }
}

/// Every raw permutation of `cleaned`
pub fn all_permutations(cleaned: &str) -> AllPermutations {
    AllPermutations::new(cleaned)
}

/// Distinct permutations of `cleaned`, in raw order minus repeats
pub fn distinct_permutations(cleaned: &str) -> Deduplicated<AllPermutations> {
    Deduplicated::new(
        AllPermutations::new(cleaned),
        create_deduplicator(false, None),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::count::{count_all, count_distinct, letter_frequencies, to_u64};
    use std::collections::HashSet;

    fn sorted_letters(s: &str) -> Vec<char> {
        let mut v: Vec<char> = s.chars().collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_next_permutation() {
        let mut v = vec![1, 2, 3];
        assert!(next_permutation(&mut v));
        assert_eq!(v, vec![1, 3, 2]);

        let mut v = vec![3, 2, 1];
        assert!(!next_permutation(&mut v));
        assert_eq!(v, vec![1, 2, 3]);

        let mut v: Vec<u8> = vec![];
        assert!(!next_permutation(&mut v));
    }

    #[test]
    fn test_all_permutations_order() {
        let perms: Vec<String> = all_permutations("cat").collect();
        assert_eq!(perms, vec!["cat", "cta", "act", "atc", "tca", "tac"]);
    }

    #[test]
    fn test_all_permutations_keep_duplicates() {
        let perms: Vec<String> = all_permutations("aab").collect();
        assert_eq!(perms, vec!["aab", "aba", "aab", "aba", "baa", "baa"]);
    }

    #[test]
    fn test_distinct_permutations() {
        let perms: Vec<String> = distinct_permutations("aab").collect();
        assert_eq!(perms, vec!["aab", "aba", "baa"]);
    }

    #[test]
    fn test_distinct_is_raw_order_minus_repeats() {
        let mut seen = HashSet::new();
        let expected: Vec<String> = all_permutations("abca")
            .filter(|p| seen.insert(p.clone()))
            .collect();
        let actual: Vec<String> = distinct_permutations("abca").collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn test_case_preserved() {
        let perms: Vec<String> = distinct_permutations("CAT").collect();
        assert_eq!(perms[..3], ["CAT", "CTA", "ACT"]);
    }

    #[test]
    fn test_single_letter() {
        assert_eq!(all_permutations("x").collect::<Vec<_>>(), vec!["x"]);
        assert_eq!(distinct_permutations("x").collect::<Vec<_>>(), vec!["x"]);
        assert_eq!(
            LexicographicPermutations::new("x").collect::<Vec<_>>(),
            vec!["x"]
        );
    }

    #[test]
    fn test_all_identical() {
        let raw: Vec<String> = all_permutations("aaa").collect();
        assert_eq!(raw.len(), 6);
        assert!(raw.iter().all(|p| p == "aaa"));

        let distinct: Vec<String> = distinct_permutations("aaa").collect();
        assert_eq!(distinct, vec!["aaa"]);
    }

    #[test]
    fn test_empty_yields_one_empty_string() {
        assert_eq!(all_permutations("").collect::<Vec<_>>(), vec![""]);
    }

    #[test]
    fn test_counts_match_generators() {
        for word in ["cat", "aab", "banana", "AaBb", "abcdef", "zzzz"] {
            let raw = all_permutations(word).count() as u64;
            let distinct = distinct_permutations(word).count() as u64;
            let lex = LexicographicPermutations::new(word).count() as u64;

            assert_eq!(Some(raw), to_u64(&count_all(word)), "{}", word);
            assert_eq!(Some(distinct), to_u64(&count_distinct(word)), "{}", word);
            assert_eq!(lex, distinct, "{}", word);
            assert!(distinct <= raw);
        }
    }

    #[test]
    fn test_outputs_are_reorderings() {
        let word = "aBcaB";
        let want = letter_frequencies(word);
        for perm in all_permutations(word) {
            assert_eq!(letter_frequencies(&perm), want);
            assert_eq!(sorted_letters(&perm), sorted_letters(word));
        }
    }

    #[test]
    fn test_distinct_has_no_repeats() {
        let perms: Vec<String> = distinct_permutations("mississ").collect();
        let unique: HashSet<&String> = perms.iter().collect();
        assert_eq!(unique.len(), perms.len());
    }

    #[test]
    fn test_lexicographic_order() {
        let perms: Vec<String> = LexicographicPermutations::new("cat").collect();
        assert_eq!(perms, vec!["act", "atc", "cat", "cta", "tac", "tca"]);

        let perms: Vec<String> = LexicographicPermutations::new("aab").collect();
        assert_eq!(perms, vec!["aab", "aba", "baa"]);
    }

    #[test]
    fn test_stream_reports_skipped() {
        let mut stream = PermutationStream::new("aab", false, DedupStrategy::Memory, Some(3));
        let perms: Vec<String> = stream.by_ref().collect();
        assert_eq!(perms.len(), 3);
        assert_eq!(stream.duplicates_skipped(), 3);

        let mut stream = PermutationStream::new("aab", true, DedupStrategy::Lexicographic, None);
        assert_eq!(stream.by_ref().count(), 6);
        assert_eq!(stream.duplicates_skipped(), 0);
    }

    #[test]
    fn test_stream_prefix_under_take() {
        let full: Vec<String> =
            PermutationStream::new("abcd", false, DedupStrategy::Memory, None).collect();
        let capped: Vec<String> = PermutationStream::new("abcd", false, DedupStrategy::Memory, None)
            .take(5)
            .collect();
        assert_eq!(capped[..], full[..5]);
    }
}
