//! Catalog files
//!
//! A catalog is a JSON document listing links, optionally extending other
//! catalogs:
//!
//! ```json
//! {
//!   "extends": ["../team/links.json"],
//!   "links": [
//!     { "name": "GitHub", "uri": "https://github.com", "tags": ["code", "git"] }
//!   ]
//! }
//! ```
//!
//! Parent catalogs are loaded first, so their links come before the
//! including file's own links.

use anyhow::{bail, Context, Result};
use log::{info, warn};
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// A bookmarked link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Display name, searched as a label
    pub name: String,
    /// Target address; identifies the link
    pub uri: String,
    /// Extra labels the link can be found by
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Link {
    pub fn new(name: impl Into<String>, uri: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            tags: Vec::new(),
        }
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Name followed by every tag
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.tags.iter().map(String::as_str))
    }
}

/// On-disk catalog document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Parent catalogs, relative to this file's directory
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extends: Vec<String>,
    #[serde(default)]
    pub links: Vec<Link>,
}

impl CatalogConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read catalog {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse catalog {}", path.display()))
    }
}

/// Load every link reachable from the catalog at `path`
///
/// Links sharing a uri are collapsed to the first one loaded.
pub fn load_links(path: &Path) -> Result<Vec<Link>> {
    let mut stack = Vec::new();
    let mut collected = Vec::new();
    collect_links(path, &mut stack, &mut collected)?;

    let mut seen = FxHashSet::default();
    let mut links = Vec::with_capacity(collected.len());
    for link in collected {
        if seen.insert(link.uri.clone()) {
            links.push(link);
        } else {
            warn!("skipping duplicate link {} ({})", link.name, link.uri);
        }
    }

    info!("loaded {} links from {}", links.len(), path.display());
    Ok(links)
}

fn collect_links(path: &Path, stack: &mut Vec<PathBuf>, out: &mut Vec<Link>) -> Result<()> {
    let canonical = path
        .canonicalize()
        .with_context(|| format!("Failed to read catalog {}", path.display()))?;

    if stack.contains(&canonical) {
        bail!("Catalog {} extends itself", canonical.display());
    }

    let config = CatalogConfig::from_file(&canonical)?;
    let base = canonical.parent().map(Path::to_path_buf).unwrap_or_default();

    stack.push(canonical);
    for parent in &config.extends {
        if parent.starts_with("http://") || parent.starts_with("https://") {
            bail!("Remote catalog {} is not supported", parent);
        }
        collect_links(&base.join(parent), stack, out)?;
    }
    stack.pop();

    out.extend(config.links);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write(dir: &Path, name: &str, content: &str) -> PathBuf {
        let path = dir.join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_parse_link_without_tags() {
        let link: Link =
            serde_json::from_str(r#"{"name": "Mail", "uri": "https://mail"}"#).unwrap();
        assert_eq!(link, Link::new("Mail", "https://mail"));
        assert_eq!(link.labels().collect::<Vec<_>>(), vec!["Mail"]);
    }

    #[test]
    fn test_labels_include_tags() {
        let link = Link::new("GitHub", "https://github.com").with_tags(["code", "git"]);
        assert_eq!(link.labels().collect::<Vec<_>>(), vec!["GitHub", "code", "git"]);
    }

    #[test]
    fn test_load_single_file() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "links.json",
            r#"{"links": [{"name": "A", "uri": "a"}, {"name": "B", "uri": "b", "tags": ["x"]}]}"#,
        );

        let links = load_links(&path).unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[1].tags, vec!["x".to_string()]);
    }

    #[test]
    fn test_parents_come_first() {
        let dir = tempdir().unwrap();
        write(
            dir.path(),
            "shared/base.json",
            r#"{"links": [{"name": "Base", "uri": "base"}]}"#,
        );
        let path = write(
            dir.path(),
            "links.json",
            r#"{"extends": ["shared/base.json"], "links": [{"name": "Own", "uri": "own"}]}"#,
        );

        let names: Vec<String> = load_links(&path).unwrap().into_iter().map(|l| l.name).collect();
        assert_eq!(names, vec!["Base", "Own"]);
    }

    #[test]
    fn test_duplicate_uri_first_wins() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.json", r#"{"links": [{"name": "Shared", "uri": "s"}]}"#);
        write(dir.path(), "b.json", r#"{"extends": ["a.json"]}"#);
        let path = write(
            dir.path(),
            "top.json",
            r#"{"extends": ["a.json", "b.json"], "links": [{"name": "Again", "uri": "s"}]}"#,
        );

        let links = load_links(&path).unwrap();
        assert_eq!(links, vec![Link::new("Shared", "s")]);
    }

    #[test]
    fn test_cycle_is_rejected() {
        let dir = tempdir().unwrap();
        write(dir.path(), "a.json", r#"{"extends": ["b.json"]}"#);
        let path = write(dir.path(), "b.json", r#"{"extends": ["a.json"]}"#);

        let err = load_links(&path).unwrap_err();
        assert!(err.to_string().contains("extends itself"), "{}", err);
    }

    #[test]
    fn test_remote_parent_is_rejected() {
        let dir = tempdir().unwrap();
        let path = write(
            dir.path(),
            "links.json",
            r#"{"extends": ["https://example.com/links.json"]}"#,
        );

        let err = load_links(&path).unwrap_err();
        assert!(err.to_string().contains("not supported"));
    }

    #[test]
    fn test_missing_file_has_context() {
        let dir = tempdir().unwrap();
        let err = load_links(&dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read catalog"));
    }

    #[test]
    fn test_empty_document() {
        let dir = tempdir().unwrap();
        let path = write(dir.path(), "links.json", "{}");
        assert!(load_links(&path).unwrap().is_empty());
    }
}
