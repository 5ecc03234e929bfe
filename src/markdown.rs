//! Markdown parsing into a document tree, heading search, and HTML rendering.
//!
//! pulldown-cmark hands out a flat stream of start/end events. The stream is
//! collected once into a [`Document`], which keeps the events for rendering
//! and builds a [`Node`] tree over them for structural queries. Rendering
//! replays the stored events, so a document is never parsed twice.
//!
//! ## Heading Anchors
//!
//! Headings without an explicit `{#id}` attribute get one derived from their
//! text: lowercased, alphanumerics kept, spaces and dashes collapsed to `-`.
//! Repeats are suffixed `-1`, `-2`, ... in document order.
//!
//! ```text
//! # Hello, World!   → <h1 id="hello-world">
//! ## Setup          → <h2 id="setup">
//! ## Setup          → <h2 id="setup-1">
//! ```
//!
//! Explicit ids are reserved before any id is generated, so a generated id
//! never collides with an explicit one, wherever it appears in the document.
//!
//! ## Bare Links
//!
//! With `autolinks` on, URLs and email addresses in plain text become links,
//! as `<https://...>` would. Text already inside a link, an image or a code
//! block is left alone.

use linkify::{LinkFinder, LinkKind};
use pulldown_cmark::{
    CowStr, Event, HeadingLevel, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream, html,
};
use std::collections::HashMap;

use crate::config::MarkdownConfig;

/// Structural role of a tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Document,
    Heading(HeadingLevel),
    Paragraph,
    BlockQuote,
    List,
    Item,
    /// Any other container: emphasis, links, tables, code blocks, ...
    Container,
    /// Text or inline code; carries its content in [`Node::text`].
    Text,
    /// Leaf without text content: rules, raw HTML, breaks, ...
    Leaf,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub text: String,
    pub children: Vec<Node>,
}

impl Node {
    pub fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            text: String::new(),
            children: Vec::new(),
        }
    }

    pub fn text(content: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Text,
            text: content.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(kind: NodeKind, children: Vec<Node>) -> Self {
        Self {
            kind,
            text: String::new(),
            children,
        }
    }

    pub fn is_heading(&self) -> bool {
        matches!(self.kind, NodeKind::Heading(_))
    }

    /// Concatenated text of all descendants, in document order.
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        self.collect_text(&mut out);
        out
    }

    fn collect_text(&self, out: &mut String) {
        out.push_str(&self.text);
        for child in &self.children {
            child.collect_text(out);
        }
    }
}

/// Find the first heading in document order.
///
/// A heading nested under an earlier sibling wins over a heading that is a
/// later sibling itself: `> # A` followed by `# B` yields `A`.
pub fn find_first_heading(root: &Node) -> Option<&Node> {
    first_heading_in(std::slice::from_ref(root))
}

/// Search `siblings`, the first of which is the node being entered.
fn first_heading_in(siblings: &[Node]) -> Option<&Node> {
    let first = siblings.first()?;
    if first.is_heading() {
        return Some(first);
    }

    for node in siblings {
        if !node.children.is_empty() {
            if let Some(found) = first_heading_in(&node.children) {
                return Some(found);
            }
        }
        if node.is_heading() {
            return Some(node);
        }
    }

    None
}

/// A parsed markdown document: the event stream plus its tree.
#[derive(Debug)]
pub struct Document<'a> {
    events: Vec<Event<'a>>,
    root: Node,
}

impl Document<'_> {
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn first_heading(&self) -> Option<&Node> {
        find_first_heading(&self.root)
    }

    /// Render the already-parsed document to an HTML fragment.
    pub fn render(&self) -> String {
        let mut out = String::new();
        html::push_html(&mut out, self.events.iter().cloned());
        out
    }
}

/// Markdown front-end configured with the enabled extensions.
#[derive(Debug, Clone)]
pub struct Markdown {
    options: Options,
    heading_ids: bool,
    autolinks: bool,
}

impl Default for Markdown {
    fn default() -> Self {
        Self::from_config(&MarkdownConfig::default())
    }
}

impl Markdown {
    pub fn from_config(config: &MarkdownConfig) -> Self {
        let mut options = Options::empty();
        options.set(Options::ENABLE_TABLES, config.tables);
        options.set(Options::ENABLE_STRIKETHROUGH, config.strikethrough);
        options.set(Options::ENABLE_FOOTNOTES, config.footnotes);
        options.set(Options::ENABLE_TASKLISTS, config.tasklists);
        options.set(Options::ENABLE_HEADING_ATTRIBUTES, config.heading_attributes);
        Self {
            options,
            heading_ids: config.heading_ids,
            autolinks: config.autolinks,
        }
    }

    pub fn parse<'a>(&self, source: &'a str) -> Document<'a> {
        let mut events: Vec<Event<'a>> =
            TextMergeStream::new(Parser::new_ext(source, self.options)).collect();
        if self.autolinks {
            events = link_bare_urls(events);
        }
        if self.heading_ids {
            assign_heading_ids(&mut events);
        }
        let root = build_tree(&events);
        Document { events, root }
    }
}

fn build_tree(events: &[Event<'_>]) -> Node {
    let mut stack = vec![Node::new(NodeKind::Document)];

    for event in events {
        match event {
            Event::Start(tag) => stack.push(Node::new(kind_of(tag))),
            Event::End(_) => {
                // The document node is never closed by an event.
                if stack.len() > 1 {
                    if let Some(node) = stack.pop() {
                        push_child(&mut stack, node);
                    }
                }
            }
            Event::Text(text)
            | Event::Code(text)
            | Event::InlineMath(text)
            | Event::DisplayMath(text) => push_child(&mut stack, Node::text(text.to_string())),
            Event::SoftBreak | Event::HardBreak => push_child(&mut stack, Node::text(" ")),
            _ => push_child(&mut stack, Node::new(NodeKind::Leaf)),
        }
    }

    // Unbalanced streams fold whatever is still open into its parent.
    while stack.len() > 1 {
        if let Some(node) = stack.pop() {
            push_child(&mut stack, node);
        }
    }
    stack.pop().unwrap_or_else(|| Node::new(NodeKind::Document))
}

fn push_child(stack: &mut [Node], node: Node) {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
    }
}

fn kind_of(tag: &Tag<'_>) -> NodeKind {
    match tag {
        Tag::Heading { level, .. } => NodeKind::Heading(*level),
        Tag::Paragraph => NodeKind::Paragraph,
        Tag::BlockQuote(_) => NodeKind::BlockQuote,
        Tag::List(_) => NodeKind::List,
        Tag::Item => NodeKind::Item,
        _ => NodeKind::Container,
    }
}

/// Split plain text around the URLs and email addresses it contains.
fn link_bare_urls(events: Vec<Event<'_>>) -> Vec<Event<'_>> {
    let mut finder = LinkFinder::new();
    finder.kinds(&[LinkKind::Url, LinkKind::Email]);

    let mut out = Vec::with_capacity(events.len());
    // Depth of links, images and code blocks around the current event.
    let mut opaque = 0usize;

    for event in events {
        match &event {
            Event::Start(Tag::Link { .. } | Tag::Image { .. } | Tag::CodeBlock(_)) => opaque += 1,
            Event::End(TagEnd::Link | TagEnd::Image | TagEnd::CodeBlock) => {
                opaque = opaque.saturating_sub(1)
            }
            Event::Text(text) if opaque == 0 && finder.links(text).next().is_some() => {
                for span in finder.spans(text) {
                    let piece = CowStr::from(span.as_str().to_string());
                    let link_type = match span.kind() {
                        Some(LinkKind::Email) => LinkType::Email,
                        Some(_) => LinkType::Autolink,
                        None => {
                            out.push(Event::Text(piece));
                            continue;
                        }
                    };
                    out.push(Event::Start(Tag::Link {
                        link_type,
                        dest_url: piece.clone(),
                        title: CowStr::Borrowed(""),
                        id: CowStr::Borrowed(""),
                    }));
                    out.push(Event::Text(piece));
                    out.push(Event::End(TagEnd::Link));
                }
                continue;
            }
            _ => {}
        }
        out.push(event);
    }

    out
}

fn assign_heading_ids(events: &mut [Event<'_>]) {
    let mut used: HashMap<String, usize> = HashMap::new();
    for event in events.iter() {
        if let Event::Start(Tag::Heading { id: Some(id), .. }) = event {
            used.entry(id.to_string()).or_insert(0);
        }
    }

    for i in 0..events.len() {
        let generated = match &events[i] {
            Event::Start(Tag::Heading { id: None, .. }) => {
                unique_id(slugify(&heading_text(&events[i + 1..])), &mut used)
            }
            _ => continue,
        };
        if let Event::Start(Tag::Heading { id, .. }) = &mut events[i] {
            *id = Some(CowStr::from(generated));
        }
    }
}

/// Text of a heading, given the events following its start tag.
fn heading_text(events: &[Event<'_>]) -> String {
    let mut text = String::new();
    for event in events {
        match event {
            Event::End(TagEnd::Heading(_)) => break,
            Event::Text(t) | Event::Code(t) => text.push_str(t),
            Event::SoftBreak | Event::HardBreak => text.push(' '),
            _ => {}
        }
    }
    text
}

fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    for c in text.trim().chars() {
        if c.is_alphanumeric() || c == '_' {
            slug.extend(c.to_lowercase());
        } else if (c == ' ' || c == '-') && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    let slug = slug.trim_matches('-');
    if slug.is_empty() {
        "heading".to_string()
    } else {
        slug.to_string()
    }
}

fn unique_id(base: String, used: &mut HashMap<String, usize>) -> String {
    let Some(&seen) = used.get(&base) else {
        used.insert(base.clone(), 0);
        return base;
    };

    let mut count = seen;
    let id = loop {
        count += 1;
        let candidate = format!("{}-{}", base, count);
        if !used.contains_key(&candidate) {
            break candidate;
        }
    };
    used.insert(base, count);
    used.insert(id.clone(), 0);
    id
}
