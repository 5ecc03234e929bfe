//! Single-document compilation: markdown file → title + HTML fragment.
//!
//! Compilation writes nothing; the caller decides where the result goes.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::markdown::Markdown;
use crate::naming;

#[derive(Error, Debug)]
pub enum CompileError {
    #[error("can not read input file {path:?}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Result of compiling one markdown file.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledArticle {
    pub title: String,
    /// Rendered body, not yet wrapped in the layout
    pub html: String,
}

/// Read, parse, and render one markdown file.
///
/// The title is the text of the first heading in document order; with no
/// heading it falls back to the filename without `.md`.
pub fn compile(markdown: &Markdown, input_path: &Path) -> Result<CompiledArticle, CompileError> {
    let bytes = fs::read(input_path).map_err(|source| CompileError::Read {
        path: input_path.to_path_buf(),
        source,
    })?;
    let source = String::from_utf8_lossy(&bytes);

    let document = markdown.parse(&source);
    let title = match document.first_heading() {
        Some(heading) => heading.text_content(),
        None => fallback_title(input_path),
    };
    let html = document.render();

    Ok(CompiledArticle { title, html })
}

/// Title derived from the file alone.
pub fn fallback_title(input_path: &Path) -> String {
    let name = input_path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    naming::strip_markdown_suffix(&name).to_string()
}
