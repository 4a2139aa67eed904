//! Suffix index builder
//!
//! Builds a suffix index from labeled values by:
//! 1. Case-folding each label and counting its value under every suffix
//! 2. Freezing the per-suffix counters and sorting them by suffix text
//!
//! The resulting index enables O(m log n) substring search.

use super::search::SuffixIndex;
use super::types::*;
use crate::utils::counter::{Counter, CounterView};
use log::debug;
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use std::hash::Hash;

/// Builder for constructing suffix indexes from labeled values
#[derive(Debug, Clone)]
pub struct SuffixIndexBuilder<V> {
    config: SuffixIndexConfig,
    /// Provisional buckets: suffix text to weighted value counts
    suffixes: FxHashMap<String, Counter<V>>,
    /// Number of labels that contributed at least one suffix
    label_count: usize,
}

impl<V: Eq + Hash + Clone> SuffixIndexBuilder<V> {
    /// Create a new suffix index builder with the given configuration
    pub fn new(config: SuffixIndexConfig) -> Self {
        Self {
            config,
            suffixes: FxHashMap::default(),
            label_count: 0,
        }
    }

    /// Create a builder with default configuration
    pub fn with_defaults() -> Self {
        Self::new(SuffixIndexConfig::default())
    }

    /// Index `value` under every suffix of `label` with weight 1
    pub fn add_label(&mut self, value: V, label: &str) {
        self.add_weighted_label(value, label, 1);
    }

    /// Index `value` under every suffix of `label`, adding `weight` per suffix
    ///
    /// Weights are not validated. A negative weight subtracts from earlier
    /// contributions and an empty label contributes nothing.
    pub fn add_weighted_label(&mut self, value: V, label: &str, weight: i64) {
        let normalized = fold_case(label, self.config.case_insensitive);
        if normalized.is_empty() {
            return;
        }

        for (offset, _) in normalized.char_indices() {
            let suffix = &normalized[offset..];
            match self.suffixes.get_mut(suffix) {
                Some(bucket) => bucket.increment(value.clone(), weight),
                None => {
                    let mut bucket = Counter::new();
                    bucket.increment(value.clone(), weight);
                    self.suffixes.insert(suffix.to_owned(), bucket);
                }
            }
        }

        self.label_count += 1;
    }

    /// Build the suffix index from accumulated labels
    ///
    /// Buckets whose counts cancelled out entirely are dropped.
    pub fn build(self) -> SuffixIndex<V>
    where
        V: Send,
    {
        let mut entries: Vec<SuffixEntry<V>> = self
            .suffixes
            .into_iter()
            .filter(|(_, bucket)| !bucket.is_empty())
            .map(|(suffix, bucket)| SuffixEntry {
                suffix,
                values: bucket.freeze(),
            })
            .collect();

        // Suffix keys are unique, so an unstable sort is still deterministic
        if entries.len() > PARALLEL_SORT_THRESHOLD {
            entries.par_sort_unstable_by(|a, b| a.suffix.cmp(&b.suffix));
        } else {
            entries.sort_unstable_by(|a, b| a.suffix.cmp(&b.suffix));
        }

        debug!(
            "built suffix index: {} entries from {} labels",
            entries.len(),
            self.label_count
        );

        SuffixIndex::from_sorted(entries, self.config)
    }

    /// Get the number of labels added
    pub fn label_count(&self) -> usize {
        self.label_count
    }

    /// Get the current number of distinct suffixes
    pub fn suffix_count(&self) -> usize {
        self.suffixes.len()
    }
}

impl<V: Eq + Hash + Clone> Default for SuffixIndexBuilder<V> {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_simple() {
        let mut builder = SuffixIndexBuilder::with_defaults();
        builder.add_label("banana", "banana");
        assert_eq!(builder.label_count(), 1);
        // banana, anana, nana, ana, na, a
        assert_eq!(builder.suffix_count(), 6);

        let index = builder.build();
        let suffixes: Vec<&str> = index.entries().iter().map(|e| e.suffix.as_str()).collect();
        assert_eq!(suffixes, vec!["a", "ana", "anana", "banana", "na", "nana"]);
    }

    #[test]
    fn test_shared_suffixes_are_merged() {
        let mut builder = SuffixIndexBuilder::with_defaults();
        builder.add_label(1, "cat");
        builder.add_label(2, "bat");
        let index = builder.build();

        let at = index.entries().iter().find(|e| e.suffix == "at").unwrap();
        assert_eq!(at.values.get(&1), Some(1));
        assert_eq!(at.values.get(&2), Some(1));
        assert_eq!(index.entries().iter().filter(|e| e.suffix == "at").count(), 1);
    }

    #[test]
    fn test_empty_label_is_noop() {
        let mut builder: SuffixIndexBuilder<u32> = SuffixIndexBuilder::with_defaults();
        builder.add_label(7, "");
        assert_eq!(builder.label_count(), 0);
        assert_eq!(builder.suffix_count(), 0);
        assert!(builder.build().is_empty());
    }

    #[test]
    fn test_case_insensitive() {
        let mut builder = SuffixIndexBuilder::with_defaults();
        builder.add_label("Rust", "RUST");
        let index = builder.build();
        assert_eq!(index.entries()[0].suffix, "rust");
    }

    #[test]
    fn test_case_sensitive_config() {
        let mut builder = SuffixIndexBuilder::new(SuffixIndexConfig {
            case_insensitive: false,
        });
        builder.add_label("Rust", "Rust");
        let index = builder.build();
        assert!(index.entries().iter().any(|e| e.suffix == "Rust"));
        assert!(!index.entries().iter().any(|e| e.suffix == "rust"));
    }

    #[test]
    fn test_multibyte_labels_split_on_char_boundaries() {
        let mut builder = SuffixIndexBuilder::with_defaults();
        builder.add_label("cafe", "Café");
        assert_eq!(builder.suffix_count(), 4);

        let index = builder.build();
        assert!(index.entries().iter().any(|e| e.suffix == "é"));
    }

    #[test]
    fn test_weight_scales_counts() {
        let mut builder = SuffixIndexBuilder::with_defaults();
        builder.add_weighted_label("docs", "go", 3);
        let index = builder.build();

        for entry in index.entries() {
            assert_eq!(entry.values.get("docs"), Some(3), "suffix {}", entry.suffix);
        }
    }

    #[test]
    fn test_cancelled_buckets_are_dropped() {
        let mut builder = SuffixIndexBuilder::with_defaults();
        builder.add_label("x", "ab");
        builder.add_weighted_label("x", "b", -1);
        let index = builder.build();

        let suffixes: Vec<&str> = index.entries().iter().map(|e| e.suffix.as_str()).collect();
        assert_eq!(suffixes, vec!["ab"]);
    }

    #[test]
    fn test_rebuild_is_deterministic() {
        let mut builder = SuffixIndexBuilder::with_defaults();
        for word in ["apple", "tomato", "cat", "japan", "ant"] {
            builder.add_label(word, word);
        }

        let first = builder.clone().build();
        let second = builder.build();
        assert_eq!(first.len(), second.len());
        for (a, b) in first.entries().iter().zip(second.entries()) {
            assert_eq!(a.suffix, b.suffix);
            assert_eq!(a.values, b.values);
        }
    }

    #[test]
    fn test_insertion_order_does_not_matter() {
        let words = ["apple", "tomato", "cat", "japan", "ant"];

        let mut forward = SuffixIndexBuilder::with_defaults();
        for word in words {
            forward.add_label(word, word);
        }
        let mut backward = SuffixIndexBuilder::with_defaults();
        for word in words.iter().rev() {
            backward.add_label(*word, word);
        }

        let forward = forward.build();
        let backward = backward.build();
        assert_eq!(forward.len(), backward.len());
        for (a, b) in forward.entries().iter().zip(backward.entries()) {
            assert_eq!(a.suffix, b.suffix);
            assert_eq!(a.values, b.values);
        }
    }

    #[test]
    fn test_parallel_sort_path() {
        let mut builder = SuffixIndexBuilder::with_defaults();
        // Distinct long labels push the bucket count past the threshold
        for i in 0..(PARALLEL_SORT_THRESHOLD / 8 + 1) {
            builder.add_label(i, &format!("label{:09}", i));
        }
        assert!(builder.suffix_count() > PARALLEL_SORT_THRESHOLD);

        let index = builder.build();
        assert!(index
            .entries()
            .windows(2)
            .all(|pair| pair[0].suffix < pair[1].suffix));
    }
}
