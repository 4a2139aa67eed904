//! Suffix index search
//!
//! Provides O(m log n) substring lookup over a built suffix index. Because
//! entries are sorted by suffix, every suffix that starts with a term sits in
//! one contiguous run; two binary searches find that run and its value
//! counters are summed into the result.

use super::types::*;
use crate::utils::counter::{Counter, CounterView, FrozenCounter};
use log::debug;
use rustc_hash::FxHashSet;
use std::borrow::Borrow;
use std::hash::Hash;
use std::ops::Range;

/// Immutable, sorted suffix index
///
/// Built once by [`SuffixIndexBuilder`](super::SuffixIndexBuilder) and never
/// mutated afterwards, so it can be shared between threads and searched
/// concurrently without locking.
#[derive(Debug, Clone)]
pub struct SuffixIndex<V> {
    /// Entries strictly sorted by suffix
    entries: Vec<SuffixEntry<V>>,
    config: SuffixIndexConfig,
}

impl<V: Eq + Hash + Clone> SuffixIndex<V> {
    /// Wrap entries that are already sorted by suffix with no duplicates
    pub(crate) fn from_sorted(entries: Vec<SuffixEntry<V>>, config: SuffixIndexConfig) -> Self {
        debug_assert!(entries.windows(2).all(|w| w[0].suffix < w[1].suffix));
        Self { entries, config }
    }

    /// Search for values whose labels contain `term`
    ///
    /// Each value is counted once per distinct matching suffix, scaled by the
    /// weights it was added with. An empty term matches every suffix.
    pub fn search(&self, term: &str) -> SearchResult<V> {
        let range = self.matching_range(term);
        let matched = range.len();

        let mut frequencies = Counter::new();
        for entry in &self.entries[range] {
            frequencies.add(&entry.values);
        }

        debug!(
            "search {:?}: {} suffixes, {} values",
            term,
            matched,
            frequencies.len()
        );

        SearchResult {
            frequencies: frequencies.freeze(),
        }
    }

    /// Returns the range [lo, hi) of entry indices whose suffix starts with
    /// `term` after case folding
    pub fn matching_range(&self, term: &str) -> Range<usize> {
        let term = fold_case(term, self.config.case_insensitive);
        let lo = self.lower_bound(&term);
        let hi = self.upper_bound(&term, lo);
        lo..hi
    }

    /// Find first index whose suffix is not less than the term
    fn lower_bound(&self, term: &str) -> usize {
        let mut lo = 0;
        let mut hi = self.entries.len();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.entries[mid].suffix.as_str() < term {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        lo
    }

    /// Find first index at or after `start` whose suffix does NOT start with
    /// the term
    fn upper_bound(&self, term: &str, start: usize) -> usize {
        let mut lo = start;
        let mut hi = self.entries.len();

        while lo < hi {
            let mid = lo + (hi - lo) / 2;
            if self.entries[mid].suffix.starts_with(term) {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }

        lo
    }

    /// Get the number of distinct suffixes that start with `term`
    pub fn count_matches(&self, term: &str) -> usize {
        self.matching_range(term).len()
    }

    /// Check if any label contains `term`
    pub fn contains(&self, term: &str) -> bool {
        !self.matching_range(term).is_empty()
    }

    /// All entries in suffix order
    pub fn entries(&self) -> &[SuffixEntry<V>] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn config(&self) -> &SuffixIndexConfig {
        &self.config
    }

    /// Get statistics about this suffix index
    pub fn stats(&self) -> SuffixIndexStats {
        let mut values = FxHashSet::default();
        let mut total_weight: i64 = 0;
        let mut max_suffix_len = 0;

        for entry in &self.entries {
            max_suffix_len = max_suffix_len.max(entry.suffix.len());
            for (value, count) in entry.values.iter() {
                values.insert(value);
                total_weight = total_weight.saturating_add(count);
            }
        }

        SuffixIndexStats {
            entry_count: self.entries.len(),
            value_count: values.len(),
            total_weight,
            max_suffix_len,
        }
    }
}

/// Weighted values matched by a search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResult<V: Eq + Hash> {
    frequencies: FrozenCounter<V>,
}

impl<V: Eq + Hash> SearchResult<V> {
    /// Per-value counts of matching suffixes
    pub fn frequencies(&self) -> &FrozenCounter<V> {
        &self.frequencies
    }

    pub fn into_frequencies(self) -> FrozenCounter<V> {
        self.frequencies
    }

    pub fn get<Q>(&self, value: &Q) -> Option<i64>
    where
        V: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.frequencies.get(value)
    }

    /// Number of distinct values matched
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }

    /// Values ordered by descending count, ties broken by value order
    pub fn ranked(&self) -> Vec<(&V, i64)>
    where
        V: Ord,
    {
        let mut ranked: Vec<(&V, i64)> = self.frequencies.iter().collect();
        ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        ranked
    }
}

impl<V: Eq + Hash> From<SearchResult<V>> for FrozenCounter<V> {
    fn from(result: SearchResult<V>) -> Self {
        result.frequencies
    }
}
