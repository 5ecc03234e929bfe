//! Draft promotion.
//!
//! Moves every markdown file out of the drafts directory into the articles
//! directory, prefixing its name with its modification time so articles sort
//! chronologically:
//!
//! ```text
//! draft/hello.md      (mtime 2024-03-05 14:22:01 UTC)
//!   → article/20240305-142201--hello.md
//! draft/readme.txt    → left in place, warning
//! ```
//!
//! Promotion is best-effort per file: an entry that can't be inspected or
//! renamed is reported and skipped. Only failing to list the drafts directory
//! stops the build. Name collisions are not guarded; the last rename wins.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

use crate::naming;
use crate::pipeline::BuildError;
use crate::types::{Area, BuildEvent, emit};

#[derive(Error, Debug)]
pub enum PromoteError {
    #[error("can not get file info {path:?}: {source}")]
    Stat {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("can not move draft {from:?} to {to:?}: {source}")]
    Rename {
        from: PathBuf,
        to: PathBuf,
        source: std::io::Error,
    },
}

/// Promote all markdown drafts. Returns the number of files moved.
pub fn promote_drafts(
    drafts_dir: &Path,
    articles_dir: &Path,
    events: Option<&Sender<BuildEvent>>,
) -> Result<usize, BuildError> {
    let entries = fs::read_dir(drafts_dir).map_err(|source| BuildError::ListDir {
        path: drafts_dir.to_path_buf(),
        source,
    })?;

    let mut promoted = 0;
    for entry in entries {
        let entry = entry.map_err(|source| BuildError::ListDir {
            path: drafts_dir.to_path_buf(),
            source,
        })?;

        let name = entry.file_name().to_string_lossy().into_owned();
        if !naming::is_markdown(&name) {
            emit(
                events,
                BuildEvent::Skipped {
                    area: Area::Draft,
                    name,
                },
            );
            continue;
        }

        match promote_one(&entry.path(), &name, articles_dir) {
            Ok(to) => {
                promoted += 1;
                emit(
                    events,
                    BuildEvent::DraftPromoted {
                        from: entry.path(),
                        to,
                    },
                );
            }
            Err(e) => emit(
                events,
                BuildEvent::Failed {
                    message: e.to_string(),
                },
            ),
        }
    }

    Ok(promoted)
}

fn promote_one(draft: &Path, name: &str, articles_dir: &Path) -> Result<PathBuf, PromoteError> {
    let modified = fs::metadata(draft)
        .and_then(|meta| meta.modified())
        .map_err(|source| PromoteError::Stat {
            path: draft.to_path_buf(),
            source,
        })?;

    let target = articles_dir.join(naming::promoted_name(modified, name));
    fs::rename(draft, &target).map_err(|source| PromoteError::Rename {
        from: draft.to_path_buf(),
        to: target.clone(),
        source,
    })?;
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use std::sync::mpsc::channel;

    #[test]
    fn markdown_draft_renamed_with_utc_timestamp() {
        let site = setup_site();
        let draft = write_file(&site.drafts(), "hello.md", "# Hello\n");
        set_mtime(&draft, utc(2024, 3, 5, 14, 22, 1));

        let count = promote_drafts(&site.drafts(), &site.articles(), None).unwrap();

        assert_eq!(count, 1);
        assert!(!draft.exists());
        let promoted = site.articles().join("20240305-142201--hello.md");
        assert_eq!(fs::read_to_string(promoted).unwrap(), "# Hello\n");
    }

    #[test]
    fn non_markdown_draft_left_in_place() {
        let site = setup_site();
        let readme = write_file(&site.drafts(), "readme.txt", "not markdown");
        let (tx, rx) = channel();

        let count = promote_drafts(&site.drafts(), &site.articles(), Some(&tx)).unwrap();

        assert_eq!(count, 0);
        assert!(readme.exists());
        assert_eq!(list_names(&site.articles()), Vec::<String>::new());
        let events: Vec<BuildEvent> = rx.try_iter().collect();
        assert_eq!(
            events,
            vec![BuildEvent::Skipped {
                area: Area::Draft,
                name: "readme.txt".to_string(),
            }]
        );
    }

    #[test]
    fn colliding_names_last_rename_wins() {
        let site = setup_site();
        let when = utc(2024, 1, 1, 0, 0, 0);
        write_file(
            &site.articles(),
            "20240101-000000--same.md",
            "old article",
        );
        let draft = write_file(&site.drafts(), "same.md", "new draft");
        set_mtime(&draft, when);

        promote_drafts(&site.drafts(), &site.articles(), None).unwrap();

        let target = site.articles().join("20240101-000000--same.md");
        assert_eq!(fs::read_to_string(target).unwrap(), "new draft");
    }

    #[test]
    fn rename_failure_is_reported_and_skipped() {
        let site = setup_site();
        write_file(&site.drafts(), "a.md", "a");
        let (tx, rx) = channel();

        let missing_articles = site.root().join("no-such-dir");
        let count = promote_drafts(&site.drafts(), &missing_articles, Some(&tx)).unwrap();

        assert_eq!(count, 0);
        assert!(site.drafts().join("a.md").exists());
        let events: Vec<BuildEvent> = rx.try_iter().collect();
        assert!(matches!(
            events.as_slice(),
            [BuildEvent::Failed { message }] if message.contains("can not move draft")
        ));
    }

    #[cfg(unix)]
    #[test]
    fn stat_failure_is_reported_and_skipped() {
        let site = setup_site();
        // Listed by read_dir, but metadata follows the link to nothing.
        std::os::unix::fs::symlink(site.root().join("gone"), site.drafts().join("ghost.md"))
            .unwrap();
        let draft = write_file(&site.drafts(), "real.md", "# Real\n");
        set_mtime(&draft, utc(2024, 3, 5, 14, 22, 1));
        let (tx, rx) = channel();

        let count = promote_drafts(&site.drafts(), &site.articles(), Some(&tx)).unwrap();

        assert_eq!(count, 1);
        assert_eq!(list_names(&site.drafts()), vec!["ghost.md"]);
        assert_eq!(
            list_names(&site.articles()),
            vec!["20240305-142201--real.md"]
        );
        let failures: Vec<String> = rx
            .try_iter()
            .filter_map(|e| match e {
                BuildEvent::Failed { message } => Some(message),
                _ => None,
            })
            .collect();
        assert_eq!(failures.len(), 1);
        assert!(failures[0].contains("can not get file info"));
        assert!(failures[0].contains("ghost.md"));
    }

    #[test]
    fn missing_drafts_dir_is_fatal() {
        let site = setup_site();
        let result = promote_drafts(&site.root().join("nope"), &site.articles(), None);
        assert!(matches!(result, Err(BuildError::ListDir { .. })));
    }
}
