//! # Microblog
//!
//! A minimal static site generator for a personal microblog. The filesystem
//! is the data source: markdown drafts are promoted into timestamped articles,
//! every article becomes an HTML page, and an index page lists them all.
//!
//! # Architecture: Promote, Compile, Index
//!
//! A site root holds three directories. A build moves content through them in
//! three steps, each finishing before the next starts:
//!
//! ```text
//! 1. Promote   draft/*.md    →  article/<timestamp>--*.md
//! 2. Articles  article/*.md  →  publish/*.html      (+ article registry)
//! 3. Index     registry      →  publish/index.html
//! ```
//!
//! Every build recompiles every article from scratch, so two builds over the
//! same inputs produce identical output.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | Runs a build (or just promotion, or a dry-run check) over a site root |
//! | [`promote`] | Moves drafts into the articles directory with a UTC timestamp prefix |
//! | [`articles`] | Compiles each article into a page and collects the registry |
//! | [`index`] | Writes the landing page from the registry |
//! | [`compile`] | Single-file markdown → title + HTML fragment |
//! | [`markdown`] | pulldown-cmark wrapper: document tree, heading ids, first-heading search |
//! | [`layout`] | Maud page templates and optional user HTML fragments |
//! | [`config`] | `config.toml` loading, merging over stock defaults, validation |
//! | [`naming`] | Filename conventions: `.md`/`.html` suffixes, promoted names |
//! | [`types`] | Registry entries and build events shared between stages |
//! | [`output`] | CLI output formatting for build events and reports |
//!
//! # Design Decisions
//!
//! ## Filesystem Order
//!
//! The index lists articles in the order the filesystem lists the articles
//! directory. There is no front-matter and no date field: a promoted article's
//! timestamp prefix is the only chronology, and on filesystems that list
//! alphabetically the index reads oldest first.
//!
//! ## Best-Effort Builds
//!
//! Only problems with the site itself (unreadable config, missing layout
//! fragment, a directory that can't be created or listed) stop a build. A bad
//! article is reported through [`types::BuildEvent`] and left out of the
//! index; everything else is still published.

pub mod articles;
pub mod compile;
pub mod config;
pub mod index;
pub mod layout;
pub mod markdown;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod promote;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
