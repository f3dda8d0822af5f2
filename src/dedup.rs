//! Deduplication of generated permutations
//!
//! Distinct mode walks the same index-ordered sequence as raw mode and drops
//! any string it has already emitted. The seen-set lives here:
//! - Memory: ahash-backed `HashSet` of every emitted string
//! - None: passes everything through (raw mode)

use ahash::RandomState;
use hashbrown::HashSet;

/// Statistics for deduplication operations
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DedupStats {
    /// Total items processed
    pub total_processed: u64,
    /// Unique items found
    pub unique_count: u64,
    /// Duplicate items found
    pub duplicate_count: u64,
}

impl DedupStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_unique(&mut self) {
        self.total_processed += 1;
        self.unique_count += 1;
    }

    pub fn record_duplicate(&mut self) {
        self.total_processed += 1;
        self.duplicate_count += 1;
    }
}

/// Trait for deduplication implementations
pub trait Deduplicator {
    /// Check if item is unique and add it if so
    /// Returns true if the item is unique (not seen before)
    fn insert(&mut self, item: &str) -> bool;

    /// Get approximate memory usage in bytes
    fn memory_usage(&self) -> usize;
}

/// In-memory HashSet-based deduplicator
///
/// Holds every distinct permutation emitted so far, so memory grows with
/// the distinct count.
pub struct MemoryDeduplicator {
    set: HashSet<String, RandomState>,
}

impl MemoryDeduplicator {
    pub fn new() -> Self {
        Self {
            set: HashSet::with_hasher(RandomState::new()),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            set: HashSet::with_capacity_and_hasher(capacity, RandomState::new()),
        }
    }
}

impl Default for MemoryDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Deduplicator for MemoryDeduplicator {
    fn insert(&mut self, item: &str) -> bool {
        if self.set.contains(item) {
            return false;
        }
        self.set.insert(item.to_string())
    }

    fn memory_usage(&self) -> usize {
        // String header + content + one bucket per slot
        let content: usize = self.set.iter().map(|s| s.capacity()).sum();
        self.set.len() * std::mem::size_of::<String>() + content + self.set.capacity() * 8
    }
}

/// No-op deduplicator (allows duplicates)
pub struct NoOpDeduplicator;

impl NoOpDeduplicator {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpDeduplicator {
    fn default() -> Self {
        Self::new()
    }
}

impl Deduplicator for NoOpDeduplicator {
    fn insert(&mut self, _item: &str) -> bool {
        true
    }

    fn memory_usage(&self) -> usize {
        0
    }
}

/// Create the deduplicator for a run.
///
/// `expected` is the distinct count when it fits a `usize`; the set is
/// pre-sized up to a modest ceiling so a huge count does not reserve memory
/// that a capped run will never use.
pub fn create_deduplicator(
    allow_duplicates: bool,
    expected: Option<usize>,
) -> Box<dyn Deduplicator> {
    const MAX_PREALLOC: usize = 1 << 16;

    if allow_duplicates {
        Box::new(NoOpDeduplicator::new())
    } else {
        let capacity = expected.unwrap_or(MAX_PREALLOC).min(MAX_PREALLOC);
        Box::new(MemoryDeduplicator::with_capacity(capacity))
    }
}
