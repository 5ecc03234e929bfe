//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. The file lives in
//! the site root, next to the `draft/`, `article/` and `publish/` directories.
//! User values are layered on top of stock defaults, so a config file only
//! needs the keys it wants to change. A missing file means "all defaults".
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! site_title = "microblog"    # <title> of the index page
//!
//! [paths]
//! drafts = "draft"            # Drafts awaiting promotion
//! articles = "article"        # Markdown articles to compile
//! publish = "publish"         # Generated HTML
//!
//! [markdown]
//! tables = true
//! strikethrough = true
//! footnotes = true
//! tasklists = true
//! heading_attributes = true   # `# Title {#id .class}`
//! heading_ids = true          # Automatic anchor ids on headings
//! autolinks = true            # Bare URLs and emails become links
//!
//! [layout]
//! back_link = true            # "back" link above each article
//! # head = "layout/head.html"     # Extra HTML appended to every <head>
//! # footer = "layout/footer.html" # Replaces the stock footer
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Name of the config file inside the site root.
pub const CONFIG_FILENAME: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Title of the index page.
    pub site_title: String,
    /// Locations of the well-known directories, relative to the site root.
    pub paths: PathsConfig,
    /// Markdown extensions.
    pub markdown: MarkdownConfig,
    /// Shared page layout.
    pub layout: LayoutConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            site_title: "microblog".to_string(),
            paths: PathsConfig::default(),
            markdown: MarkdownConfig::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.site_title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site_title must not be empty".into(),
            ));
        }
        let dirs = [
            ("paths.drafts", &self.paths.drafts),
            ("paths.articles", &self.paths.articles),
            ("paths.publish", &self.paths.publish),
        ];
        for (key, value) in dirs {
            if value.trim().is_empty() {
                return Err(ConfigError::Validation(format!("{key} must not be empty")));
            }
        }
        for (i, (key_a, a)) in dirs.iter().enumerate() {
            for (key_b, b) in &dirs[i + 1..] {
                if Path::new(a.as_str()) == Path::new(b.as_str()) {
                    return Err(ConfigError::Validation(format!(
                        "{key_a} and {key_b} must point to different directories"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// Well-known directories, relative to the site root.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    pub drafts: String,
    pub articles: String,
    pub publish: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            drafts: "draft".to_string(),
            articles: "article".to_string(),
            publish: "publish".to_string(),
        }
    }
}

/// Markdown extensions passed to the parser.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MarkdownConfig {
    pub tables: bool,
    pub strikethrough: bool,
    pub footnotes: bool,
    pub tasklists: bool,
    /// Allow `{#id .class}` after heading text.
    pub heading_attributes: bool,
    /// Generate anchor ids for headings that have none.
    pub heading_ids: bool,
    /// Turn bare URLs and email addresses into links.
    pub autolinks: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            footnotes: true,
            tasklists: true,
            heading_attributes: true,
            heading_ids: true,
            autolinks: true,
        }
    }
}

/// Page layout settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Show a "back" link to the index above each article.
    pub back_link: bool,
    /// HTML file appended verbatim to every `<head>`, relative to the site root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub head: Option<String>,
    /// HTML file replacing the stock footer, relative to the site root.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub footer: Option<String>,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            back_link: true,
            head: None,
            footer: None,
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(SiteConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `config.toml` from the site root as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(root: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = root.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load the site config from `config.toml` in `root`.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# microblog configuration
# =======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys cause an error.

# Title of the generated index page.
site_title = "microblog"

# ---------------------------------------------------------------------------
# Directories, relative to the site root
# ---------------------------------------------------------------------------
[paths]
# Drafts are renamed into `articles` as <YYYYMMDD-HHMMSS>--<name>.md,
# using their modification time (UTC).
drafts = "draft"
articles = "article"
# Every build overwrites one .html per article plus index.html here.
publish = "publish"

# ---------------------------------------------------------------------------
# Markdown extensions
# ---------------------------------------------------------------------------
[markdown]
tables = true
strikethrough = true
footnotes = true
tasklists = true
# Allow `# Title {#custom-id .class}`.
heading_attributes = true
# Give every heading without an explicit id an anchor derived from its text.
heading_ids = true
# Link bare URLs (https://...) and email addresses found in plain text.
autolinks = true

# ---------------------------------------------------------------------------
# Layout
# ---------------------------------------------------------------------------
[layout]
# Show a "back" link to the index above each article.
back_link = true

# HTML appended verbatim to every <head> (stylesheets, analytics, ...).
# head = "layout/head.html"

# HTML replacing the stock "Powered by microblog" footer.
# footer = "layout/footer.html"
"##
}
