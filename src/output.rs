//! CLI output formatting.
//!
//! # Output Format
//!
//! ## Build
//!
//! ```text
//! promoted draft/hello.md → article/20240305-142201--hello.md
//! WARNING: skip non-markdown file in draft: "readme.txt"
//! generated publish/20240305-142201--hello.html
//! ERROR: can not write output file "publish/broken.html": Is a directory (os error 21)
//! generated publish/index.html
//!
//! Built 1 article, promoted 1 draft
//! ```
//!
//! ## Check
//!
//! ```text
//! Drafts
//!     hello.md
//!
//! Articles
//! 001 First Post → 20240101-000000--first.html
//! ```
//!
//! # Architecture
//!
//! Each kind of output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format functions
//! are pure.

use std::path::Path;

use crate::pipeline::{BuildSummary, CheckReport};
use crate::types::BuildEvent;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

fn display(path: &Path) -> String {
    path.display().to_string()
}

// ============================================================================
// Build events
// ============================================================================

/// Format a single build event as display lines.
pub fn format_event(event: &BuildEvent) -> Vec<String> {
    match event {
        BuildEvent::DraftPromoted { from, to } => {
            vec![format!("promoted {} \u{2192} {}", display(from), display(to))]
        }
        BuildEvent::Skipped { area, name } => vec![format!(
            "WARNING: skip non-markdown file in {}: {:?}",
            area.label(),
            name
        )],
        BuildEvent::Failed { message } => vec![format!("ERROR: {message}")],
        BuildEvent::PageGenerated { path, .. } | BuildEvent::IndexGenerated { path, .. } => {
            vec![format!("generated {}", display(path))]
        }
    }
}

/// Print one event. Errors and warnings go to stderr.
pub fn print_event(event: &BuildEvent) {
    let to_stderr = matches!(event, BuildEvent::Failed { .. } | BuildEvent::Skipped { .. });
    for line in format_event(event) {
        if to_stderr {
            eprintln!("{}", line);
        } else {
            println!("{}", line);
        }
    }
}

// ============================================================================
// Build summary
// ============================================================================

pub fn format_summary(summary: &BuildSummary) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!(
            "Built {}, promoted {}",
            plural(summary.registry.len(), "article"),
            plural(summary.promoted, "draft")
        ),
    ];
    if summary.index.is_none() {
        lines.push("Index page was not written".to_string());
    }
    lines
}

pub fn print_summary(summary: &BuildSummary) {
    for line in format_summary(summary) {
        println!("{}", line);
    }
}

// ============================================================================
// Check report
// ============================================================================

/// Format a check report: pending drafts, then the registry a build would
/// produce from the current articles.
pub fn format_check_report(report: &CheckReport) -> Vec<String> {
    let mut lines = vec!["Drafts".to_string()];
    if report.drafts.is_empty() {
        lines.push("    (none)".to_string());
    }
    for name in &report.drafts {
        lines.push(format!("    {name}"));
    }

    lines.push(String::new());
    lines.push("Articles".to_string());
    if report.articles.is_empty() {
        lines.push("    (none)".to_string());
    }
    for (i, entry) in report.articles.iter().enumerate() {
        lines.push(format!(
            "{} {} \u{2192} {}",
            format_index(i + 1),
            entry.title,
            entry.url
        ));
    }
    lines
}

pub fn print_check_report(report: &CheckReport) {
    for line in format_check_report(report) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Area, ArticleEntry};
    use std::path::PathBuf;

    fn entry(title: &str, url: &str) -> ArticleEntry {
        ArticleEntry {
            title: title.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn promoted_line_shows_both_paths() {
        let lines = format_event(&BuildEvent::DraftPromoted {
            from: PathBuf::from("draft/hello.md"),
            to: PathBuf::from("article/20240305-142201--hello.md"),
        });
        assert_eq!(
            lines,
            vec!["promoted draft/hello.md \u{2192} article/20240305-142201--hello.md"]
        );
    }

    #[test]
    fn skipped_line_quotes_name() {
        let lines = format_event(&BuildEvent::Skipped {
            area: Area::Draft,
            name: "readme.txt".to_string(),
        });
        assert_eq!(
            lines,
            vec![r#"WARNING: skip non-markdown file in draft: "readme.txt""#]
        );
    }

    #[test]
    fn failed_line_prefixed_with_error() {
        let lines = format_event(&BuildEvent::Failed {
            message: "boom".to_string(),
        });
        assert_eq!(lines, vec!["ERROR: boom"]);
    }

    #[test]
    fn generated_lines_for_pages_and_index() {
        let page = format_event(&BuildEvent::PageGenerated {
            path: PathBuf::from("publish/a.html"),
            title: "A".to_string(),
        });
        let index = format_event(&BuildEvent::IndexGenerated {
            path: PathBuf::from("publish/index.html"),
            entries: 3,
        });
        assert_eq!(page, vec!["generated publish/a.html"]);
        assert_eq!(index, vec!["generated publish/index.html"]);
    }

    #[test]
    fn summary_pluralizes() {
        let summary = BuildSummary {
            promoted: 1,
            registry: vec![entry("a", "a.html"), entry("b", "b.html")],
            index: Some(PathBuf::from("publish/index.html")),
        };
        assert_eq!(
            format_summary(&summary),
            vec!["", "Built 2 articles, promoted 1 draft"]
        );
    }

    #[test]
    fn summary_notes_missing_index() {
        let summary = BuildSummary {
            promoted: 0,
            registry: Vec::new(),
            index: None,
        };
        let lines = format_summary(&summary);
        assert_eq!(lines[1], "Built 0 articles, promoted 0 drafts");
        assert_eq!(lines[2], "Index page was not written");
    }

    #[test]
    fn check_report_lists_drafts_and_registry() {
        let report = CheckReport {
            drafts: vec!["hello.md".to_string()],
            articles: vec![entry("First Post", "20240101-000000--first.html")],
        };
        assert_eq!(
            format_check_report(&report),
            vec![
                "Drafts",
                "    hello.md",
                "",
                "Articles",
                "001 First Post \u{2192} 20240101-000000--first.html",
            ]
        );
    }

    #[test]
    fn empty_check_report() {
        let report = CheckReport {
            drafts: Vec::new(),
            articles: Vec::new(),
        };
        assert_eq!(
            format_check_report(&report),
            vec!["Drafts", "    (none)", "", "Articles", "    (none)"]
        );
    }
}
