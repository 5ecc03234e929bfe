//! Build orchestration.
//!
//! A build runs these steps in order, each to completion before the next:
//!
//! ```text
//! 1. Layout     load templates + fragments       (fatal on error)
//! 2. Dirs       create draft/ article/ publish/  (fatal on error)
//! 3. Promote    draft/*.md  → article/           (per-file errors reported)
//! 4. Articles   article/*.md → publish/*.html    (per-file errors reported)
//! 5. Index      registry → publish/index.html    (error reported, build completes)
//! ```
//!
//! Promotion runs before article processing so drafts promoted in this build
//! are published in this build. Fatal errors come back as [`BuildError`];
//! everything else is reported through the event channel.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

use crate::articles;
use crate::config::{ConfigError, SiteConfig};
use crate::index;
use crate::layout::{Layout, LayoutError};
use crate::markdown::Markdown;
use crate::naming;
use crate::promote;
use crate::types::{ArticleEntry, BuildEvent, emit};

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Layout error: {0}")]
    Layout(#[from] LayoutError),
    #[error("can not create directory {path:?}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("can not read directory {path:?}: {source}")]
    ListDir {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Absolute locations of the well-known directories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitePaths {
    pub drafts: PathBuf,
    pub articles: PathBuf,
    pub publish: PathBuf,
}

impl SitePaths {
    pub fn resolve(root: &Path, config: &SiteConfig) -> Self {
        Self {
            drafts: root.join(&config.paths.drafts),
            articles: root.join(&config.paths.articles),
            publish: root.join(&config.paths.publish),
        }
    }

    /// Create any missing directory; existing ones are left alone.
    pub fn ensure(&self) -> Result<(), BuildError> {
        for dir in [&self.drafts, &self.articles, &self.publish] {
            fs::create_dir_all(dir).map_err(|source| BuildError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }
}

/// Outcome of a full build.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildSummary {
    pub promoted: usize,
    pub registry: Vec<ArticleEntry>,
    /// Path of `index.html`, or `None` if it could not be written
    pub index: Option<PathBuf>,
}

/// What a build would do, computed without writing anything.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct CheckReport {
    /// Markdown drafts that the next build will promote
    pub drafts: Vec<String>,
    /// Registry the next build will produce, excluding pending drafts
    pub articles: Vec<ArticleEntry>,
}

/// Run the full pipeline under `root`.
pub fn run(
    root: &Path,
    config: &SiteConfig,
    events: Option<&Sender<BuildEvent>>,
) -> Result<BuildSummary, BuildError> {
    let layout = Layout::load(root, config)?;
    let markdown = Markdown::from_config(&config.markdown);

    let paths = SitePaths::resolve(root, config);
    paths.ensure()?;

    let promoted = promote::promote_drafts(&paths.drafts, &paths.articles, events)?;
    let registry =
        articles::process_articles(&paths.articles, &paths.publish, &markdown, &layout, events)?;

    let index = match index::build_index(&paths.publish, &layout, &registry, events) {
        Ok(path) => Some(path),
        Err(e) => {
            emit(
                events,
                BuildEvent::Failed {
                    message: e.to_string(),
                },
            );
            None
        }
    };

    Ok(BuildSummary {
        promoted,
        registry,
        index,
    })
}

/// Promote drafts only.
pub fn promote(
    root: &Path,
    config: &SiteConfig,
    events: Option<&Sender<BuildEvent>>,
) -> Result<usize, BuildError> {
    let paths = SitePaths::resolve(root, config);
    paths.ensure()?;
    promote::promote_drafts(&paths.drafts, &paths.articles, events)
}

/// Inspect the site without touching it.
///
/// Missing directories are treated as empty rather than created.
pub fn check(
    root: &Path,
    config: &SiteConfig,
    events: Option<&Sender<BuildEvent>>,
) -> Result<CheckReport, BuildError> {
    Layout::load(root, config)?;
    let markdown = Markdown::from_config(&config.markdown);
    let paths = SitePaths::resolve(root, config);

    let drafts = if paths.drafts.is_dir() {
        pending_drafts(&paths.drafts)?
    } else {
        Vec::new()
    };
    let articles = if paths.articles.is_dir() {
        articles::preview_articles(&paths.articles, &markdown, events)?
    } else {
        Vec::new()
    };

    Ok(CheckReport { drafts, articles })
}

fn pending_drafts(drafts_dir: &Path) -> Result<Vec<String>, BuildError> {
    let to_err = |source: std::io::Error| BuildError::ListDir {
        path: drafts_dir.to_path_buf(),
        source,
    };
    let mut names = Vec::new();
    for entry in fs::read_dir(drafts_dir).map_err(to_err)? {
        let name = entry.map_err(to_err)?.file_name().to_string_lossy().into_owned();
        if naming::is_markdown(&name) {
            names.push(name);
        }
    }
    Ok(names)
}
