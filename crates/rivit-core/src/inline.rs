//! Inline scanner for Rivit text.
//!
//! Greedy, left to right, no backtracking and no nesting: a styled run
//! extends to its first closing delimiter (or the end of the line) and its
//! inner text is taken literally. Plain runs apply backslash escapes and stop
//! at any `*`, `` ` ``, `{` or `[` that is followed by a non-whitespace
//! character.

use memchr::{memchr, memchr2, memchr3};

use crate::ast::{Style, StyledText};
use crate::chars;

/// Parse a single line of inline content into styled runs.
///
/// Never fails: unterminated delimiters run to the end of the line, and runs
/// that end up empty (or links without a target) are dropped.
///
/// ```rust
/// use rivit_core::{parse_inline, Style};
///
/// let runs = parse_inline("see **this** {home}");
/// assert_eq!(runs.len(), 4);
/// assert_eq!(runs[1].style, Style::Bold);
/// assert_eq!(runs[2].value, " ");
/// assert_eq!(runs[3].link, "home");
/// ```
pub fn parse_inline(line: &str) -> Vec<StyledText> {
    if line.is_empty() {
        return Vec::new();
    }

    InlineParser::new(line).parse()
}

struct InlineParser<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> InlineParser<'a> {
    #[inline]
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
        }
    }

    fn parse(&mut self) -> Vec<StyledText> {
        let mut runs = Vec::with_capacity(8);

        while self.pos < self.bytes.len() {
            let run = match self.bytes[self.pos] {
                b'*' => self.parse_emphasis(),
                b'`' => self.parse_mono(),
                b'{' => self.parse_link(b'}', Style::InternalLink),
                b'[' => self.parse_link(b']', Style::ExternalLink),
                _ => self.parse_plain(),
            };

            if let Some(run) = run {
                runs.push(run);
            }
        }

        runs
    }

    /// Position of the next byte that may interrupt a plain run.
    #[inline(always)]
    fn find_next_special(&self) -> usize {
        let remaining = &self.bytes[self.pos..];

        let common = memchr3(b'*', b'`', b'\\', remaining);
        let links = memchr2(b'{', b'[', remaining);

        match (common, links) {
            (Some(a), Some(b)) => self.pos + a.min(b),
            (Some(a), None) => self.pos + a,
            (None, Some(b)) => self.pos + b,
            (None, None) => self.bytes.len(),
        }
    }

    /// Inner text from `start` up to the next `close` byte, or to end of line.
    ///
    /// Leaves `pos` just past the closer.
    #[inline]
    fn take_until(&mut self, start: usize, close: u8) -> &'a str {
        match memchr(close, &self.bytes[start..]) {
            Some(offset) => {
                let end = start + offset;
                self.pos = end + 1;
                &self.text[start..end]
            }
            None => self.take_rest(start),
        }
    }

    #[inline]
    fn take_rest(&mut self, start: usize) -> &'a str {
        self.pos = self.bytes.len();
        &self.text[start..]
    }

    fn styled(style: Style, inner: &str) -> Option<StyledText> {
        let inner = chars::trim(inner);
        if inner.is_empty() {
            None
        } else {
            Some(StyledText::new(style, inner))
        }
    }

    /// `*italic*` or `**bold**`.
    fn parse_emphasis(&mut self) -> Option<StyledText> {
        let start = self.pos;

        if self.bytes.get(start + 1) != Some(&b'*') {
            let inner = self.take_until(start + 1, b'*');
            return Self::styled(Style::Italic, inner);
        }

        let content_start = start + 2;
        let mut search_pos = content_start;

        while let Some(offset) = memchr(b'*', &self.bytes[search_pos..]) {
            let abs_pos = search_pos + offset;
            if self.bytes.get(abs_pos + 1) == Some(&b'*') {
                self.pos = abs_pos + 2;
                return Self::styled(Style::Bold, &self.text[content_start..abs_pos]);
            }
            search_pos = abs_pos + 1;
        }

        let inner = self.take_rest(content_start);
        Self::styled(Style::Bold, inner)
    }

    /// `` `mono` ``.
    fn parse_mono(&mut self) -> Option<StyledText> {
        let inner = self.take_until(self.pos + 1, b'`');
        Self::styled(Style::Mono, inner)
    }

    /// `{target display}` or `[target display]`.
    fn parse_link(&mut self, close: u8, style: Style) -> Option<StyledText> {
        let start = self.pos;
        let inner = chars::trim(self.take_until(start + 1, close));

        let (link, value) = match inner.split_once(' ') {
            Some((link, value)) => (chars::trim(link), chars::trim(value)),
            None => (inner, ""),
        };

        if link.is_empty() {
            log::trace!("dropping {style} with empty target at byte {start}");
            return None;
        }

        Some(StyledText::link(style, link, value))
    }

    /// Plain text up to the next construct, with escapes applied.
    fn parse_plain(&mut self) -> Option<StyledText> {
        let mut value = String::new();

        loop {
            let next = self.find_next_special();
            value.push_str(&self.text[self.pos..next]);
            self.pos = next;

            if self.pos >= self.bytes.len() {
                break;
            }

            match self.bytes[self.pos] {
                b'\\' => self.push_escaped(&mut value),
                _ if self.opens_run() => break,
                delim => {
                    value.push(char::from(delim));
                    self.pos += 1;
                }
            }
        }

        if value.is_empty() {
            None
        } else {
            Some(StyledText::plain(value))
        }
    }

    /// Whether the delimiter at `pos` starts a styled run.
    #[inline]
    fn opens_run(&self) -> bool {
        let next = self.pos + 1;
        next < self.bytes.len() && !chars::is_whitespace_at(self.text, next)
    }

    /// Handle the backslash at `pos`.
    ///
    /// The backslash is dropped before any multi-byte character or ASCII
    /// non-whitespace, and the escaped character is taken literally. Before
    /// ASCII whitespace or at end of line the backslash is kept.
    fn push_escaped(&mut self, value: &mut String) {
        match self.text[self.pos + 1..].chars().next() {
            Some(c) if c.len_utf8() > 1 || !c.is_whitespace() => {
                value.push(c);
                self.pos += 1 + c.len_utf8();
            }
            _ => {
                value.push('\\');
                self.pos += 1;
            }
        }
    }
}
