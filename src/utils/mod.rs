//! Utility functions and data structures.
//!
//! ## Modules
//!
//! - [`app_data`] - Application data directory and configuration
//! - [`counter`] - Frequency counters (mutable and frozen)
//!
//! ```
//! use linkdex::utils::{Counter, CounterView};
//!
//! let mut counter = Counter::new();
//! counter.increment("link", 2);
//! counter.increment_one("link");
//! assert_eq!(counter.get("link"), Some(3));
//! ```

pub mod app_data;
pub mod counter;

pub use app_data::*;
pub use counter::*;
