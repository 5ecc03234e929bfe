//! Shared test utilities for the microblog test suite.
//!
//! Provides a throwaway site root with the three well-known directories,
//! file writers, mtime control for draft promotion, and registry lookups.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let site = setup_site();
//! let draft = write_file(&site.drafts(), "hello.md", "# Hello\n");
//! set_mtime(&draft, utc(2024, 3, 5, 14, 22, 1));
//!
//! let summary = pipeline::run(site.root(), &SiteConfig::default(), None).unwrap();
//! assert_eq!(find_entry(&summary.registry, "Hello").url, "20240305-142201--hello.html");
//! ```

use chrono::{TimeZone, Utc};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::TempDir;

use crate::config::SiteConfig;
use crate::types::ArticleEntry;

// =========================================================================
// Fixture setup
// =========================================================================

/// A temporary site root laid out with the default directory names.
pub struct TestSite {
    dir: TempDir,
}

impl TestSite {
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn drafts(&self) -> PathBuf {
        self.root().join(SiteConfig::default().paths.drafts)
    }

    pub fn articles(&self) -> PathBuf {
        self.root().join(SiteConfig::default().paths.articles)
    }

    pub fn publish(&self) -> PathBuf {
        self.root().join(SiteConfig::default().paths.publish)
    }
}

/// Create a site root with empty `draft/`, `article/` and `publish/`.
pub fn setup_site() -> TestSite {
    let site = TestSite {
        dir: TempDir::new().unwrap(),
    };
    for dir in [site.drafts(), site.articles(), site.publish()] {
        fs::create_dir_all(dir).unwrap();
    }
    site
}

/// Write `content` to `dir/name` and return the full path.
pub fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Set a file's modification time.
pub fn set_mtime(path: &Path, time: SystemTime) {
    fs::File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(time)
        .unwrap();
}

/// A UTC wall-clock time as a `SystemTime`.
pub fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> SystemTime {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec)
        .unwrap()
        .into()
}

// =========================================================================
// Directory inspection
// =========================================================================

/// File names in `dir`, sorted.
pub fn list_names(dir: &Path) -> Vec<String> {
    let mut names = listing_order(dir);
    names.sort();
    names
}

/// File names in `dir`, in the order the filesystem lists them.
pub fn listing_order(dir: &Path) -> Vec<String> {
    fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

// =========================================================================
// Registry lookups — panics with a clear message on miss
// =========================================================================

/// Find a registry entry by title. Panics if not found.
pub fn find_entry<'a>(registry: &'a [ArticleEntry], title: &str) -> &'a ArticleEntry {
    registry
        .iter()
        .find(|e| e.title == title)
        .unwrap_or_else(|| {
            let titles = entry_titles(registry);
            panic!("entry '{title}' not found. Available: {titles:?}")
        })
}

/// All registry titles in order.
pub fn entry_titles(registry: &[ArticleEntry]) -> Vec<&str> {
    registry.iter().map(|e| e.title.as_str()).collect()
}

/// All registry urls in order.
pub fn entry_urls(registry: &[ArticleEntry]) -> Vec<&str> {
    registry.iter().map(|e| e.url.as_str()).collect()
}
