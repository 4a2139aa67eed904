//! Usage tracking
//!
//! Remembers which terms a link was picked for, so the catalog can index the
//! link under those terms with the pick count as weight.

use super::config::Link;
use anyhow::{Context, Result};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Source of per-link term counts
pub trait UsageStore {
    /// Terms recorded for `link`, with how often each was used
    fn terms(&self, link: &Link) -> Vec<(String, i64)>;

    /// Record that `link` was picked after searching for `term`
    fn record(&mut self, link: &Link, term: &str) -> Result<()>;
}

/// Trim a term; `None` if nothing is left
///
/// Case is kept as typed. The index folds it when it is configured to.
pub fn normalize_term(term: &str) -> Option<String> {
    let term = term.trim();
    if term.is_empty() {
        None
    } else {
        Some(term.to_owned())
    }
}

/// Term counts keyed by link uri
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
struct UsageTable {
    by_uri: BTreeMap<String, BTreeMap<String, i64>>,
}

impl UsageTable {
    fn terms(&self, link: &Link) -> Vec<(String, i64)> {
        self.by_uri
            .get(&link.uri)
            .map(|terms| terms.iter().map(|(t, &c)| (t.clone(), c)).collect())
            .unwrap_or_default()
    }

    /// Returns false if the term was empty and nothing was recorded
    fn increment(&mut self, link: &Link, term: &str) -> bool {
        let Some(term) = normalize_term(term) else {
            return false;
        };
        *self
            .by_uri
            .entry(link.uri.clone())
            .or_default()
            .entry(term)
            .or_insert(0) += 1;
        true
    }
}

/// In-memory usage store
#[derive(Debug, Clone, Default)]
pub struct MemoryUsageStore {
    table: UsageTable,
}

impl MemoryUsageStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UsageStore for MemoryUsageStore {
    fn terms(&self, link: &Link) -> Vec<(String, i64)> {
        self.table.terms(link)
    }

    fn record(&mut self, link: &Link, term: &str) -> Result<()> {
        self.table.increment(link, term);
        Ok(())
    }
}

/// Usage store persisted as a JSON file
///
/// Every `record` rewrites the file through a temporary file in the same
/// directory, so a crash never leaves a half-written store behind.
#[derive(Debug)]
pub struct JsonUsageStore {
    path: PathBuf,
    table: UsageTable,
}

impl JsonUsageStore {
    /// Open the store at `path`; a missing file is an empty store
    pub fn open(path: &Path) -> Result<Self> {
        let table = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("Failed to read usage store {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse usage store {}", path.display()))?
        } else {
            UsageTable::default()
        };

        Ok(Self {
            path: path.to_path_buf(),
            table,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn save(&self) -> Result<()> {
        let parent_dir = self
            .path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent_dir)?;

        let temp_file = NamedTempFile::new_in(parent_dir)
            .context("Failed to create temporary usage file")?;
        {
            let mut writer = BufWriter::new(&temp_file);
            serde_json::to_writer_pretty(&mut writer, &self.table)
                .context("Failed to serialize usage store")?;
            writer.flush()?;
        }

        temp_file
            .persist(&self.path)
            .with_context(|| format!("Failed to write usage store {}", self.path.display()))?;
        Ok(())
    }
}

impl UsageStore for JsonUsageStore {
    fn terms(&self, link: &Link) -> Vec<(String, i64)> {
        self.table.terms(link)
    }

    fn record(&mut self, link: &Link, term: &str) -> Result<()> {
        if !self.table.increment(link, term) {
            debug!("ignoring empty term for {}", link.uri);
            return Ok(());
        }
        self.save()
    }
}
