//! Centralized filename handling for drafts, articles and published pages.
//!
//! Every stage of the pipeline agrees on the same few conventions:
//! - markdown sources end in `.md`; anything else is skipped with a warning
//! - a published page replaces `.md` with `.html`
//! - a promoted draft is renamed `<YYYYMMDD-HHMMSS>--<original-name>`, the
//!   timestamp being the draft's modification time in UTC
//!
//! ```text
//! draft/hello.md   (mtime 2024-03-05 14:22:01 UTC)
//!   → article/20240305-142201--hello.md
//!   → publish/20240305-142201--hello.html
//! ```

use chrono::{DateTime, Utc};
use std::time::SystemTime;

/// Suffix identifying markdown sources.
pub const MARKDOWN_SUFFIX: &str = ".md";

/// Suffix of generated pages.
pub const HTML_SUFFIX: &str = ".html";

/// Filename of the generated landing page.
pub const INDEX_FILENAME: &str = "index.html";

/// Separator between the timestamp and the original draft name.
const PROMOTED_SEPARATOR: &str = "--";

/// Sortable UTC timestamp layout used for promoted drafts.
const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

pub fn is_markdown(name: &str) -> bool {
    name.ends_with(MARKDOWN_SUFFIX)
}

/// Strip the markdown suffix, or return the name unchanged if it has none.
///
/// - `"notes.md"` → `"notes"`
/// - `"20240305-142201--hello.md"` → `"20240305-142201--hello"`
/// - `"readme.txt"` → `"readme.txt"`
pub fn strip_markdown_suffix(name: &str) -> &str {
    name.strip_suffix(MARKDOWN_SUFFIX).unwrap_or(name)
}

/// Output page filename for a markdown source: `a.md` → `a.html`.
pub fn output_filename(name: &str) -> String {
    format!("{}{}", strip_markdown_suffix(name), HTML_SUFFIX)
}

/// Format a modification time as `YYYYMMDD-HHMMSS` in UTC.
pub fn format_timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time)
        .format(TIMESTAMP_FORMAT)
        .to_string()
}

/// Name a draft receives when promoted into the articles directory.
pub fn promoted_name(modified: SystemTime, name: &str) -> String {
    format!(
        "{}{}{}",
        format_timestamp(modified),
        PROMOTED_SEPARATOR,
        name
    )
}
