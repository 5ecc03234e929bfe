//! Shared page layout.
//!
//! Every generated page is `header` + body + `footer`. Article pages wrap a
//! compiled markdown fragment; the index page wraps the article `list`.
//!
//! Templates are [maud](https://maud.lambda.xyz/) markup, checked at compile
//! time. Interpolated strings (page and article titles) are escaped; the
//! compiled markdown fragment and the optional user head/footer fragments are
//! trusted HTML and emitted as-is.
//!
//! The user fragments are read once when the [`Layout`] is loaded, before the
//! pipeline touches any content, so a missing fragment aborts the build early.

use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::SiteConfig;
use crate::naming::INDEX_FILENAME;
use crate::types::ArticleEntry;

#[derive(Error, Debug)]
pub enum LayoutError {
    #[error("can not read layout fragment {path:?}: {source}")]
    Fragment {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Templates plus the site-wide values they need.
#[derive(Debug, Clone)]
pub struct Layout {
    site_title: String,
    back_link: bool,
    head_html: Option<String>,
    footer_html: Option<String>,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            site_title: SiteConfig::default().site_title,
            back_link: true,
            head_html: None,
            footer_html: None,
        }
    }
}

impl Layout {
    /// Build the layout from config, reading any fragment files under `root`.
    pub fn load(root: &Path, config: &SiteConfig) -> Result<Self, LayoutError> {
        let head_html = config
            .layout
            .head
            .as_deref()
            .map(|rel| read_fragment(&root.join(rel)))
            .transpose()?;
        let footer_html = config
            .layout
            .footer
            .as_deref()
            .map(|rel| read_fragment(&root.join(rel)))
            .transpose()?;

        Ok(Self {
            site_title: config.site_title.clone(),
            back_link: config.layout.back_link,
            head_html,
            footer_html,
        })
    }

    pub fn site_title(&self) -> &str {
        &self.site_title
    }

    /// `<head>` section with the escaped page title.
    pub fn header(&self, title: &str) -> Markup {
        html! {
            head {
                meta charset="UTF-8";
                title { (title) }
                meta name="viewport" content="width=device-width, initial-scale=1";
                @if let Some(extra) = &self.head_html {
                    (PreEscaped(extra))
                }
            }
        }
    }

    pub fn footer(&self) -> Markup {
        html! {
            hr;
            footer {
                @match &self.footer_html {
                    Some(custom) => (PreEscaped(custom)),
                    None => p { small { "Powered by microblog" } },
                }
            }
        }
    }

    /// Full document: header, body, footer.
    pub fn page(&self, title: &str, body: Markup) -> Markup {
        html! {
            (DOCTYPE)
            html {
                (self.header(title))
                body {
                    (body)
                    (self.footer())
                }
            }
        }
    }

    /// Article page around an already-rendered HTML fragment.
    pub fn article(&self, title: &str, content_html: &str) -> Markup {
        let body = html! {
            @if self.back_link {
                a.back href=(INDEX_FILENAME) { "back" }
            }
            article {
                (PreEscaped(content_html))
            }
        };
        self.page(title, body)
    }

    /// Unordered list of links, one per entry, in the given order.
    pub fn list(&self, entries: &[ArticleEntry]) -> Markup {
        html! {
            ul {
                @for entry in entries {
                    li { a href=(entry.url) { (entry.title) } }
                }
            }
        }
    }

    /// Landing page listing every entry under the site title.
    pub fn index(&self, entries: &[ArticleEntry]) -> Markup {
        self.page(&self.site_title, self.list(entries))
    }
}

fn read_fragment(path: &Path) -> Result<String, LayoutError> {
    fs::read_to_string(path).map_err(|source| LayoutError::Fragment {
        path: path.to_path_buf(),
        source,
    })
}
