//! Types for suffix index search
//!
//! This module defines the entry, configuration and statistics types shared
//! by the builder and the searchable index.

use crate::utils::counter::FrozenCounter;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// Bucket count above which `build` sorts suffixes with rayon
pub const PARALLEL_SORT_THRESHOLD: usize = 100_000;

/// One distinct suffix and the weighted values that produced it
#[derive(Debug, Clone)]
pub struct SuffixEntry<V> {
    /// Case-folded suffix text
    pub suffix: String,
    /// Per-value weighted occurrence counts for this exact suffix
    pub values: FrozenCounter<V>,
}

/// Configuration for suffix index building
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuffixIndexConfig {
    /// Fold labels and search terms to lowercase (default: true)
    pub case_insensitive: bool,
}

impl Default for SuffixIndexConfig {
    fn default() -> Self {
        Self {
            case_insensitive: true,
        }
    }
}

/// Statistics about a built suffix index
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuffixIndexStats {
    /// Number of distinct suffix strings
    pub entry_count: usize,
    /// Number of distinct values across all entries
    pub value_count: usize,
    /// Sum of every weighted count in the index
    pub total_weight: i64,
    /// Length in bytes of the longest suffix
    pub max_suffix_len: usize,
}

/// Bring labels and terms into the form the index compares on
#[inline]
pub fn fold_case(text: &str, case_insensitive: bool) -> Cow<'_, str> {
    if case_insensitive {
        Cow::Owned(text.to_lowercase())
    } else {
        Cow::Borrowed(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fold_case() {
        assert_eq!(fold_case("HeLLo", true), "hello");
        assert_eq!(fold_case("HeLLo", false), "HeLLo");
        assert_eq!(fold_case("ÄPFEL", true), "äpfel");
    }

    #[test]
    fn test_default_config_is_case_insensitive() {
        assert!(SuffixIndexConfig::default().case_insensitive);
    }
}
