//! # linkdex - Bookmark Search
//!
//! linkdex keeps a catalog of bookmarked links and finds them by any
//! substring of their name or tags, ranking matches by how many of their
//! suffixes match and how often they were picked before.
//!
//! ## Architecture
//!
//! - [`index`] - Suffix index: sorted suffixes with weighted value counters
//! - [`catalog`] - Link catalogs, `extends` resolution and usage tracking
//! - [`output`] - Result formatting
//! - [`utils`] - Frequency counters and app data configuration
//!
//! ## Quick Start
//!
//! ```
//! use linkdex::index::SuffixIndexBuilder;
//!
//! let mut builder = SuffixIndexBuilder::with_defaults();
//! for word in ["apple", "tomato", "cat", "japan", "ant"] {
//!     builder.add_label(word, word);
//! }
//! let index = builder.build();
//!
//! let result = index.search("t");
//! assert_eq!(result.get("tomato"), Some(2));
//! assert_eq!(result.get("cat"), Some(1));
//! assert_eq!(result.get("apple"), None);
//! ```

pub mod catalog;
pub mod index;
pub mod output;
pub mod utils;
