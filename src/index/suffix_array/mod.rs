//! Suffix index module
//!
//! This module provides O(m log n) substring search over labeled values.
//! Every suffix of every label is stored once, together with a frequency
//! counter of the values that produced it, so a search both finds the
//! matching values and weighs them.
//!
//! ## Architecture
//!
//! - `builder`: Collects labels and produces the sorted index
//! - `search`: The immutable index and its range lookups
//! - `types`: Core type definitions

pub mod builder;
pub mod search;
pub mod types;

// Re-exports for convenience
pub use builder::SuffixIndexBuilder;
pub use search::{SearchResult, SuffixIndex};
pub use types::{SuffixEntry, SuffixIndexConfig, SuffixIndexStats};
