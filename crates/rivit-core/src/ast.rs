//! Document model produced by the parser.
//!
//! A Rivit document is a flat sequence of [`Line`] constructs. Only lists
//! nest, through [`ListItem::sublist`]. Everything is owned: a parsed
//! [`Document`] does not borrow from its source text.

use std::fmt;
use std::ops::Index;

use crate::span::Span;

/// A parsed Rivit document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    /// Line constructs in source order.
    pub lines: Vec<Line>,
    /// Span covering the entire source text.
    pub span: Span,
}

impl Document {
    #[inline]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }
}

impl Index<usize> for Document {
    type Output = Line;

    fn index(&self, index: usize) -> &Line {
        &self.lines[index]
    }
}

impl IntoIterator for Document {
    type Item = Line;
    type IntoIter = std::vec::IntoIter<Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.into_iter()
    }
}

impl<'d> IntoIterator for &'d Document {
    type Item = &'d Line;
    type IntoIter = std::slice::Iter<'d, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}

/// Tag identifying which construct a [`Line`] holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineKind {
    Header,
    NavLink,
    Paragraph,
    Block,
    List,
    Embed,
}

impl LineKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            LineKind::Header => "header",
            LineKind::NavLink => "nav_link",
            LineKind::Paragraph => "paragraph",
            LineKind::Block => "block",
            LineKind::List => "list",
            LineKind::Embed => "embed",
        }
    }
}

impl fmt::Display for LineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A top-level line construct.
///
/// Blank lines and `#` comments never produce a `Line`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    /// An all-uppercase line, stored verbatim (trailing whitespace removed).
    Header(String),
    /// Target of a `/` navigation line.
    NavLink(String),
    /// Flowing prose with inline styling.
    Paragraph(Vec<StyledText>),
    /// An `@` media reference.
    Embed(Embed),
    /// Verbatim indented lines.
    Block(Block),
    /// A `-` bulleted list.
    List(List),
}

impl Line {
    pub fn kind(&self) -> LineKind {
        match self {
            Line::Header(_) => LineKind::Header,
            Line::NavLink(_) => LineKind::NavLink,
            Line::Paragraph(_) => LineKind::Paragraph,
            Line::Embed(_) => LineKind::Embed,
            Line::Block(_) => LineKind::Block,
            Line::List(_) => LineKind::List,
        }
    }

    pub fn as_header(&self) -> Option<&str> {
        match self {
            Line::Header(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_nav_link(&self) -> Option<&str> {
        match self {
            Line::NavLink(target) => Some(target),
            _ => None,
        }
    }

    pub fn as_paragraph(&self) -> Option<&[StyledText]> {
        match self {
            Line::Paragraph(runs) => Some(runs),
            _ => None,
        }
    }

    pub fn as_embed(&self) -> Option<&Embed> {
        match self {
            Line::Embed(embed) => Some(embed),
            _ => None,
        }
    }

    pub fn as_block(&self) -> Option<&Block> {
        match self {
            Line::Block(block) => Some(block),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&List> {
        match self {
            Line::List(list) => Some(list),
            _ => None,
        }
    }
}

/// Media embed: `@path alt text`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Embed {
    /// Path exactly as written; escapes are not processed.
    pub path: String,
    /// Inline-parsed alt text, empty when none was given.
    pub alt: Vec<StyledText>,
}

/// Verbatim block of indented lines.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Block {
    /// Leading space (or tab) count of the first line.
    pub indent: usize,
    /// Source lines including their indentation.
    pub body: Vec<String>,
}

/// A bulleted list; also used for each item's children.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct List {
    pub items: Vec<ListItem>,
}

impl List {
    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, ListItem> {
        self.items.iter()
    }

    /// Number of nesting levels: 0 for an empty list, 1 for a flat one.
    pub fn depth(&self) -> usize {
        self.items
            .iter()
            .map(|item| 1 + item.sublist.depth())
            .max()
            .unwrap_or(0)
    }

    /// Total number of items, counting every nested sublist.
    pub fn item_count(&self) -> usize {
        self.items
            .iter()
            .map(|item| 1 + item.sublist.item_count())
            .sum()
    }
}

impl Index<usize> for List {
    type Output = ListItem;

    fn index(&self, index: usize) -> &ListItem {
        &self.items[index]
    }
}

impl<'l> IntoIterator for &'l List {
    type Item = &'l ListItem;
    type IntoIter = std::slice::Iter<'l, ListItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// One list entry and the entries nested below it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListItem {
    /// Dash count of the source line; top-level items are 1.
    pub level: usize,
    pub value: Vec<StyledText>,
    pub sublist: List,
}

/// Inline style of a [`StyledText`] run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Style {
    #[default]
    None,
    Italic,
    Bold,
    Mono,
    InternalLink,
    ExternalLink,
}

impl Style {
    pub const fn is_link(self) -> bool {
        matches!(self, Style::InternalLink | Style::ExternalLink)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Style::None => "none",
            Style::Italic => "italic",
            Style::Bold => "bold",
            Style::Mono => "mono",
            Style::InternalLink => "internal_link",
            Style::ExternalLink => "external_link",
        }
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One inline run of text.
///
/// `link` is only set for [`Style::InternalLink`] and [`Style::ExternalLink`];
/// a link run may have an empty `value`, in which case it displays its target.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StyledText {
    pub style: Style,
    pub value: String,
    pub link: String,
}

impl StyledText {
    pub fn new(style: Style, value: impl Into<String>) -> Self {
        Self {
            style,
            value: value.into(),
            link: String::new(),
        }
    }

    /// Unstyled text.
    pub fn plain(value: impl Into<String>) -> Self {
        Self::new(Style::None, value)
    }

    pub fn link(style: Style, link: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            style,
            value: value.into(),
            link: link.into(),
        }
    }

    #[inline]
    pub fn is_link(&self) -> bool {
        self.style.is_link()
    }

    /// Text a reader sees: the value, or the target for a bare link.
    pub fn display_text(&self) -> &str {
        if self.is_link() && self.value.is_empty() {
            &self.link
        } else {
            &self.value
        }
    }
}
