pub mod suffix_array;

pub use suffix_array::{SearchResult, SuffixIndex, SuffixIndexBuilder};
