//! Permutation counting
//!
//! Counts are exact `BigUint` values. A `u64` would only hold n! up to
//! n = 20, so anything that needs a machine integer (progress bar length)
//! goes through [`ToPrimitive::to_u64`] and must handle `None`.

use ahash::RandomState;
use hashbrown::HashMap;
use num::{BigUint, One, ToPrimitive};

/// Letter multiplicities, case-sensitive
pub type Frequencies = HashMap<char, usize, RandomState>;

/// Exact n!
pub fn factorial(n: usize) -> BigUint {
    (2..=n as u64).fold(BigUint::one(), |acc, k| acc * k)
}

/// Count how often each letter occurs. `A` and `a` are separate entries.
pub fn letter_frequencies(s: &str) -> Frequencies {
    let mut freq = Frequencies::with_hasher(RandomState::new());
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }
    freq
}

/// Number of raw permutations, duplicates included: n!
pub fn count_all(s: &str) -> BigUint {
    factorial(s.chars().count())
}

/// Number of textually distinct permutations: n! / prod(freq!)
pub fn count_distinct(s: &str) -> BigUint {
    let denom = letter_frequencies(s)
        .values()
        .fold(BigUint::one(), |acc, &v| acc * factorial(v));

    count_all(s) / denom
}

/// Count for the active mode
pub fn count_for(s: &str, allow_duplicates: bool) -> BigUint {
    if allow_duplicates {
        count_all(s)
    } else {
        count_distinct(s)
    }
}

/// Narrow a count to `u64` if it fits
pub fn to_u64(count: &BigUint) -> Option<u64> {
    count.to_u64()
}
