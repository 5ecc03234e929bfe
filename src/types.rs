//! Shared types passed between pipeline stages.
//!
//! The article registry flows from [`articles`](crate::articles) into
//! [`index`](crate::index); build events flow from every stage to whoever
//! holds the receiving end of the channel (the CLI printer, or a test).

use serde::Serialize;
use std::path::PathBuf;
use std::sync::mpsc::Sender;

/// One compiled article as listed on the index page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleEntry {
    /// First heading of the article, or its filename without `.md`
    pub title: String,
    /// Output filename, relative to the publish directory
    pub url: String,
}

/// Which well-known directory an event refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Area {
    Draft,
    Article,
}

impl Area {
    pub fn label(self) -> &'static str {
        match self {
            Area::Draft => "draft",
            Area::Article => "article",
        }
    }
}

/// Progress reported by the pipeline stages.
///
/// Warnings and per-item errors are reported here rather than returned, so a
/// single bad file never stops the build.
#[derive(Debug, Clone, PartialEq)]
pub enum BuildEvent {
    DraftPromoted {
        from: PathBuf,
        to: PathBuf,
    },
    /// A non-markdown entry was left untouched.
    Skipped {
        area: Area,
        name: String,
    },
    /// A single item failed; the stage moved on to the next one.
    Failed {
        message: String,
    },
    PageGenerated {
        path: PathBuf,
        title: String,
    },
    IndexGenerated {
        path: PathBuf,
        entries: usize,
    },
}

/// Send an event if anyone is listening.
///
/// A dropped receiver only means nobody wants progress output any more.
pub(crate) fn emit(events: Option<&Sender<BuildEvent>>, event: BuildEvent) {
    if let Some(tx) = events {
        tx.send(event).ok();
    }
}
