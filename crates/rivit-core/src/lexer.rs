//! Line splitter for the block scanner.
//!
//! Rivit is line oriented: the block scanner only ever needs the current
//! line and a one-line lookahead to decide whether a list or indented block
//! continues. Lines borrow from the input and carry their byte span.
//!
//! The source is split on `\n` only. A carriage return stays part of the
//! line text; the block scanner's trailing-whitespace trim removes it where
//! it matters, and verbatim block bodies keep it.

use memchr::memchr;

use crate::chars;
use crate::span::Span;

/// A single raw source line, without its line feed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    pub text: &'a str,
    /// Byte span in the original input.
    pub span: Span,
}

impl<'a> Line<'a> {
    /// First byte of the raw line, if any.
    #[inline(always)]
    pub fn first_byte(&self) -> Option<u8> {
        self.text.as_bytes().first().copied()
    }

    /// Number of leading bytes equal to `delim`.
    #[inline(always)]
    pub fn count_prefix(&self, delim: u8) -> usize {
        chars::count_prefix(self.text, delim)
    }

    /// Line text with trailing Unicode whitespace removed.
    #[inline(always)]
    pub fn trimmed(&self) -> &'a str {
        chars::trim_right(self.text)
    }
}

/// Peek/consume access to the lines of a source text.
pub struct Lexer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    /// Byte offset of the next unread line.
    offset: usize,
    peeked: Option<Line<'a>>,
}

impl<'a> Lexer<'a> {
    #[inline]
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            offset: 0,
            peeked: None,
        }
    }

    /// Peek at the next line without consuming it.
    #[inline]
    pub fn peek_line(&mut self) -> Option<&Line<'a>> {
        if self.peeked.is_none() {
            self.peeked = self.read_line();
        }
        self.peeked.as_ref()
    }

    /// Consume and return the next line.
    #[inline]
    pub fn next_line(&mut self) -> Option<Line<'a>> {
        if let Some(line) = self.peeked.take() {
            return Some(line);
        }
        self.read_line()
    }

    /// Consume the next line only if `accept` returns true for it.
    #[inline]
    pub fn next_line_if(&mut self, accept: impl FnOnce(&Line<'a>) -> bool) -> Option<Line<'a>> {
        if self.peek_line().is_some_and(accept) {
            self.next_line()
        } else {
            None
        }
    }

    fn read_line(&mut self) -> Option<Line<'a>> {
        if self.offset >= self.bytes.len() {
            return None;
        }

        let start = self.offset;
        let end = match memchr(b'\n', &self.bytes[start..]) {
            Some(pos) => start + pos,
            None => self.bytes.len(),
        };

        self.offset = if end < self.bytes.len() { end + 1 } else { end };

        // `start` and `end` sit on line feeds or the ends of the input,
        // which are always character boundaries.
        Some(Line {
            text: &self.input[start..end],
            span: Span::new(start, end),
        })
    }
}
