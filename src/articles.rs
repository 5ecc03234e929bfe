//! Article processing.
//!
//! Compiles every markdown file in the articles directory into a full HTML
//! page in the publish directory, and collects the article registry used by
//! the index page.
//!
//! ## Ordering
//!
//! The registry follows the order in which the filesystem lists the articles
//! directory: not sorted by name, title or date. Promoted drafts carry a
//! timestamp prefix, so on filesystems that list alphabetically this is also
//! chronological.
//!
//! ## Failures
//!
//! A file that can't be read, or whose page can't be written, is reported and
//! left out of the registry; the remaining articles are still processed.
//! Every article is recompiled on every run.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

use crate::compile::{self, CompileError, CompiledArticle};
use crate::layout::Layout;
use crate::markdown::Markdown;
use crate::naming;
use crate::pipeline::BuildError;
use crate::types::{Area, ArticleEntry, BuildEvent, emit};

#[derive(Error, Debug)]
pub enum ArticleError {
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error("can not write output file {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Compile every article into `output_dir`, returning the registry.
pub fn process_articles(
    articles_dir: &Path,
    output_dir: &Path,
    markdown: &Markdown,
    layout: &Layout,
    events: Option<&Sender<BuildEvent>>,
) -> Result<Vec<ArticleEntry>, BuildError> {
    let mut registry = Vec::new();

    for name in list_markdown(articles_dir, events)? {
        let input_path = articles_dir.join(&name);
        let url = naming::output_filename(&name);
        let output_path = output_dir.join(&url);

        match process_article(&input_path, &output_path, markdown, layout) {
            Ok(title) => {
                emit(
                    events,
                    BuildEvent::PageGenerated {
                        path: output_path,
                        title: title.clone(),
                    },
                );
                registry.push(ArticleEntry { title, url });
            }
            Err(e) => emit(
                events,
                BuildEvent::Failed {
                    message: e.to_string(),
                },
            ),
        }
    }

    Ok(registry)
}

/// Compile and write a single article, returning its title.
pub fn process_article(
    input_path: &Path,
    output_path: &Path,
    markdown: &Markdown,
    layout: &Layout,
) -> Result<String, ArticleError> {
    let CompiledArticle { title, html } = compile::compile(markdown, input_path)?;
    let page = layout.article(&title, &html).into_string();
    write_page(output_path, &page).map_err(|source| ArticleError::Write {
        path: output_path.to_path_buf(),
        source,
    })?;
    Ok(title)
}

/// Compile every article without writing anything: the registry a build
/// would produce.
pub fn preview_articles(
    articles_dir: &Path,
    markdown: &Markdown,
    events: Option<&Sender<BuildEvent>>,
) -> Result<Vec<ArticleEntry>, BuildError> {
    let mut registry = Vec::new();

    for name in list_markdown(articles_dir, events)? {
        match compile::compile(markdown, &articles_dir.join(&name)) {
            Ok(compiled) => registry.push(ArticleEntry {
                title: compiled.title,
                url: naming::output_filename(&name),
            }),
            Err(e) => emit(
                events,
                BuildEvent::Failed {
                    message: e.to_string(),
                },
            ),
        }
    }

    Ok(registry)
}

/// Markdown file names in listing order; everything else is reported and
/// skipped.
fn list_markdown(
    articles_dir: &Path,
    events: Option<&Sender<BuildEvent>>,
) -> Result<Vec<String>, BuildError> {
    let entries = fs::read_dir(articles_dir).map_err(|source| BuildError::ListDir {
        path: articles_dir.to_path_buf(),
        source,
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| BuildError::ListDir {
            path: articles_dir.to_path_buf(),
            source,
        })?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if naming::is_markdown(&name) {
            names.push(name);
        } else {
            emit(
                events,
                BuildEvent::Skipped {
                    area: Area::Article,
                    name,
                },
            );
        }
    }
    Ok(names)
}

/// Create or truncate `path` and write `content` to it.
pub(crate) fn write_page(path: &Path, content: &str) -> std::io::Result<()> {
    let mut file = fs::File::create(path)?;
    file.write_all(content.as_bytes())
}
