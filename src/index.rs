//! Landing page generation from the article registry.

use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

use crate::articles::write_page;
use crate::layout::Layout;
use crate::naming::INDEX_FILENAME;
use crate::types::{ArticleEntry, BuildEvent, emit};

#[derive(Error, Debug)]
pub enum IndexError {
    #[error("can not write output file {path:?}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Write `index.html` listing `registry` in order.
///
/// An empty registry still produces a page, with an empty list.
pub fn build_index(
    output_dir: &Path,
    layout: &Layout,
    registry: &[ArticleEntry],
    events: Option<&Sender<BuildEvent>>,
) -> Result<PathBuf, IndexError> {
    let path = output_dir.join(INDEX_FILENAME);
    let page = layout.index(registry).into_string();

    write_page(&path, &page).map_err(|source| IndexError::Write {
        path: path.clone(),
        source,
    })?;

    emit(
        events,
        BuildEvent::IndexGenerated {
            path: path.clone(),
            entries: registry.len(),
        },
    );
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::fs;

    fn entry(title: &str, url: &str) -> ArticleEntry {
        ArticleEntry {
            title: title.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn index_lists_entries_in_registry_order() {
        let site = setup_site();
        let registry = vec![entry("b", "b.html"), entry("a", "a.html")];

        let path = build_index(&site.publish(), &Layout::default(), &registry, None).unwrap();

        let html = fs::read_to_string(path).unwrap();
        let b = html.find(r#"<a href="b.html">b</a>"#).unwrap();
        let a = html.find(r#"<a href="a.html">a</a>"#).unwrap();
        assert!(b < a);
    }

    #[test]
    fn empty_registry_renders_empty_list() {
        let site = setup_site();

        let path = build_index(&site.publish(), &Layout::default(), &[], None).unwrap();

        let html = fs::read_to_string(path).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>microblog</title>"));
        assert!(html.contains("<ul></ul>"));
        assert!(html.contains("<footer>"));
    }

    #[test]
    fn index_reports_entry_count() {
        let site = setup_site();
        let (tx, rx) = std::sync::mpsc::channel();

        build_index(
            &site.publish(),
            &Layout::default(),
            &[entry("x", "x.html")],
            Some(&tx),
        )
        .unwrap();

        let events: Vec<BuildEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![BuildEvent::IndexGenerated {
                path: site.publish().join("index.html"),
                entries: 1,
            }]
        );
    }

    #[test]
    fn unwritable_index_is_error() {
        let site = setup_site();
        fs::create_dir_all(site.publish().join("index.html")).unwrap();

        let result = build_index(&site.publish(), &Layout::default(), &[], None);
        assert!(matches!(result, Err(IndexError::Write { .. })));
    }
}
