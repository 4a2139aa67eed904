//! Link catalog with substring search.
//!
//! Each link is indexed under its name and tags with weight 1, and under
//! every term it was previously picked for, weighted by how often. A link
//! that keeps being chosen for "gh" therefore climbs for "g" and "gh".
//!
//! ## Modules
//!
//! - [`config`] - Catalog files and `extends` resolution
//! - [`usage`] - Per-link term counts (in memory or JSON-backed)

pub mod config;
pub mod usage;

pub use config::{load_links, CatalogConfig, Link};
pub use usage::{JsonUsageStore, MemoryUsageStore, UsageStore};

use crate::index::suffix_array::{
    SuffixIndex, SuffixIndexBuilder, SuffixIndexConfig, SuffixIndexStats,
};
use log::debug;
use serde::Serialize;

/// A link matched by a search
#[derive(Debug, Clone, Serialize)]
pub struct Hit<'a> {
    #[serde(flatten)]
    pub link: &'a Link,
    /// Weighted count of matching suffixes
    pub score: i64,
}

/// Summary of a built catalog
#[derive(Debug, Clone, Serialize)]
pub struct CatalogStats {
    pub link_count: usize,
    pub index: SuffixIndexStats,
}

/// Searchable set of links
///
/// Values in the index are positions in `links`, so ties in score fall back
/// to catalog order.
#[derive(Debug, Clone)]
pub struct Catalog {
    links: Vec<Link>,
    index: SuffixIndex<usize>,
}

impl Catalog {
    pub fn build(links: Vec<Link>, usage: &dyn UsageStore, config: SuffixIndexConfig) -> Self {
        let mut builder = SuffixIndexBuilder::new(config);

        for (id, link) in links.iter().enumerate() {
            for label in link.labels() {
                builder.add_label(id, label);
            }
            for (term, count) in usage.terms(link) {
                builder.add_weighted_label(id, &term, count);
            }
        }

        debug!(
            "catalog: {} links, {} labels",
            links.len(),
            builder.label_count()
        );

        Self {
            links,
            index: builder.build(),
        }
    }

    /// Up to `limit` links containing `term`, best first
    pub fn search(&self, term: &str, limit: usize) -> Vec<Hit<'_>> {
        self.index
            .search(term)
            .ranked()
            .into_iter()
            .take(limit)
            .map(|(&id, score)| Hit {
                link: &self.links[id],
                score,
            })
            .collect()
    }

    pub fn find(&self, uri: &str) -> Option<&Link> {
        self.links.iter().find(|link| link.uri == uri)
    }

    pub fn links(&self) -> &[Link] {
        &self.links
    }

    pub fn index(&self) -> &SuffixIndex<usize> {
        &self.index
    }

    pub fn stats(&self) -> CatalogStats {
        CatalogStats {
            link_count: self.links.len(),
            index: self.index.stats(),
        }
    }
}
