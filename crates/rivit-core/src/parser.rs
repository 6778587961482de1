//! Block scanner for Rivit documents.
//!
//! Each source line is classified by its first byte after trailing
//! whitespace is removed. Lists and indented blocks pull further raw lines
//! from the lexer for as long as they continue; every other construct is a
//! single line. Malformed or empty constructs are skipped, never reported.

use crate::ast::{Block, Document, Embed, Line, List, ListItem, StyledText};
use crate::chars;
use crate::inline::parse_inline;
use crate::lexer::{Lexer, Line as SourceLine};
use crate::span::Span;

/// Parse a complete Rivit source text.
///
/// ```rust
/// use rivit_core::{parse, LineKind};
///
/// let doc = parse("TITLE\n# a comment\n/home\nSome *styled* prose.");
/// assert_eq!(doc.len(), 3);
/// assert_eq!(doc[0].kind(), LineKind::Header);
/// assert_eq!(doc[1].as_nav_link(), Some("home"));
/// assert_eq!(doc[2].kind(), LineKind::Paragraph);
/// ```
pub fn parse(input: &str) -> Document {
    let lines = BlockParser::new(input).parse_lines();

    log::debug!(
        "parsed {} bytes into {} line constructs",
        input.len(),
        lines.len()
    );

    Document {
        lines,
        span: Span::new(0, input.len()),
    }
}

struct BlockParser<'a> {
    lexer: Lexer<'a>,
}

impl<'a> BlockParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lexer: Lexer::new(input),
        }
    }

    fn parse_lines(&mut self) -> Vec<Line> {
        let mut lines = Vec::with_capacity(16);

        while let Some(raw) = self.lexer.next_line() {
            if let Some(line) = self.parse_line(raw) {
                lines.push(line);
            }
        }

        lines
    }

    fn parse_line(&mut self, raw: SourceLine<'a>) -> Option<Line> {
        let text = raw.trimmed();
        let delim = *text.as_bytes().first()?;

        match delim {
            b'#' => {
                log::trace!("skipping comment at byte {}", raw.span.start);
                None
            }
            b'/' => Self::parse_nav_link(raw, text),
            b'@' => Self::parse_embed(raw, text),
            b'-' => self.parse_list(raw, text),
            b' ' | b'\t' => Some(self.parse_block(raw, text, delim)),
            _ => Self::parse_text_line(raw, text),
        }
    }

    /// `/target`
    fn parse_nav_link(raw: SourceLine<'a>, text: &str) -> Option<Line> {
        let target = chars::trim_left(&text[1..]);
        if target.is_empty() {
            log::trace!("skipping empty nav link at byte {}", raw.span.start);
            return None;
        }

        Some(Line::NavLink(target.to_owned()))
    }

    /// `@path alt text`; the path is taken as written, escapes included.
    fn parse_embed(raw: SourceLine<'a>, text: &str) -> Option<Line> {
        let rest = chars::trim_left(&text[1..]);

        let (path, alt_text) = match rest.find(' ') {
            Some(idx) => (&rest[..idx], chars::trim_left(&rest[idx..])),
            None => (rest, ""),
        };

        if path.is_empty() {
            log::trace!("skipping embed without path at byte {}", raw.span.start);
            return None;
        }

        let alt = if alt_text.is_empty() {
            Vec::new()
        } else {
            parse_inline(alt_text)
        };

        Some(Line::Embed(Embed {
            path: path.to_owned(),
            alt,
        }))
    }

    /// A run of `-` lines. The list ends at the first raw line that does not
    /// start with `-`, including a blank one.
    fn parse_list(&mut self, raw: SourceLine<'a>, text: &str) -> Option<Line> {
        let level = chars::count_prefix(text, b'-');
        let first = chars::trim_left(&text[level..]);
        if first.is_empty() {
            log::trace!("skipping empty list item at byte {}", raw.span.start);
            return None;
        }

        let mut builder = ListBuilder::new(level, parse_inline(first));

        while let Some(line) = self.lexer.next_line_if(|l| l.first_byte() == Some(b'-')) {
            let sub_level = line.count_prefix(b'-');
            let rest = chars::trim_left(&line.text[sub_level..]);
            if rest.is_empty() {
                log::trace!("skipping empty list item at byte {}", line.span.start);
                continue;
            }

            builder.push(sub_level, parse_inline(rest));
        }

        Some(Line::List(builder.finish()))
    }

    /// Lines indented by at least as many of the opening byte (space or
    /// tab) as the first line, kept verbatim.
    fn parse_block(&mut self, raw: SourceLine<'a>, text: &str, delim: u8) -> Line {
        let indent = chars::count_prefix(text, delim);
        let mut body = vec![raw.text.to_owned()];
        let mut span = raw.span;

        while let Some(line) = self.lexer.next_line_if(|l| l.count_prefix(delim) >= indent) {
            body.push(line.text.to_owned());
            span = span.merge(line.span);
        }

        log::trace!(
            "block of {} lines ({} bytes), indent {indent}, at bytes {}..{}",
            body.len(),
            span.len(),
            span.start,
            span.end
        );

        Line::Block(Block { indent, body })
    }

    /// Header when every Latin letter is uppercase, otherwise a paragraph.
    fn parse_text_line(raw: SourceLine<'a>, text: &str) -> Option<Line> {
        if chars::is_header_text(text) {
            return Some(Line::Header(text.to_owned()));
        }

        let runs = parse_inline(text);
        if runs.is_empty() {
            log::trace!("skipping paragraph with no content at byte {}", raw.span.start);
            return None;
        }

        Some(Line::Paragraph(runs))
    }
}

/// Builds a list tree from items in source order.
///
/// Items live in a flat arena and refer to their children by index, so the
/// "current" chain can be tracked while the arena grows. `path` holds that
/// chain: the current top-level parent first, the current item last. It is
/// never empty.
struct ListBuilder {
    nodes: Vec<ListNode>,
    roots: Vec<usize>,
    path: Vec<usize>,
}

struct ListNode {
    level: usize,
    value: Vec<StyledText>,
    children: Vec<usize>,
}

impl ListBuilder {
    fn new(level: usize, value: Vec<StyledText>) -> Self {
        let mut builder = Self {
            nodes: Vec::with_capacity(8),
            roots: Vec::with_capacity(4),
            path: Vec::with_capacity(4),
        };
        let id = builder.alloc(level, value);
        builder.roots.push(id);
        builder.path.push(id);
        builder
    }

    fn alloc(&mut self, level: usize, value: Vec<StyledText>) -> usize {
        self.nodes.push(ListNode {
            level,
            value,
            children: Vec::new(),
        });
        self.nodes.len() - 1
    }

    /// Last item on the current chain.
    #[inline]
    fn current(&self) -> usize {
        self.path[self.path.len() - 1]
    }

    /// Append an item of the given dash count.
    ///
    /// One dash starts a new top-level item. Two dashes always attach to
    /// the current top-level item, whatever its own level. Deeper items
    /// attach to the nearest item on the current chain with a smaller level,
    /// falling back to the top-level item.
    fn push(&mut self, level: usize, value: Vec<StyledText>) {
        let id = self.alloc(level, value);

        match level {
            1 => {
                self.roots.push(id);
                self.path.clear();
            }
            2 => {
                self.path.truncate(1);
                self.nodes[self.path[0]].children.push(id);
            }
            _ => {
                while self.path.len() > 1 && self.nodes[self.current()].level >= level {
                    self.path.pop();
                }
                let parent = self.current();
                self.nodes[parent].children.push(id);
            }
        }

        self.path.push(id);
    }

    /// Materialise the arena into owned item trees.
    fn finish(self) -> List {
        let ListBuilder { nodes, roots, .. } = self;

        // Children are always allocated after their parent, so walking the
        // arena backwards finishes every subtree before it is needed.
        let mut built: Vec<Option<ListItem>> = Vec::with_capacity(nodes.len());
        built.resize_with(nodes.len(), || None);

        for (id, node) in nodes.into_iter().enumerate().rev() {
            let items = node
                .children
                .iter()
                .filter_map(|&child| built[child].take())
                .collect();
            built[id] = Some(ListItem {
                level: node.level,
                value: node.value,
                sublist: List { items },
            });
        }

        List {
            items: roots
                .iter()
                .filter_map(|&root| built[root].take())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{LineKind, Style};

    fn labels(list: &List) -> Vec<String> {
        list.iter()
            .map(|item| item.value.iter().map(|t| t.value.as_str()).collect())
            .collect()
    }

    #[test]
    fn blank_and_comment_lines_are_skipped() {
        let doc = parse("\n   \n# comment\n#another\n\t\n");
        assert!(doc.is_empty());
    }

    #[test]
    fn document_span_covers_input() {
        let input = "PAGE\ntext";
        assert_eq!(parse(input).span, Span::new(0, input.len()));
    }

    #[test]
    fn nav_link_trims_leading_whitespace() {
        let doc = parse("/   it-works\n/\n/   \n/ *also{works}*");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc[0].as_nav_link(), Some("it-works"));
        assert_eq!(doc[1].as_nav_link(), Some("*also{works}*"));
    }

    #[test]
    fn embed_splits_path_and_alt() {
        let doc = parse("@foo.png it's an image\n@\n@   \n@bare.png");
        assert_eq!(doc.len(), 2);

        let embed = doc[0].as_embed().unwrap();
        assert_eq!(embed.path, "foo.png");
        assert_eq!(embed.alt, vec![StyledText::plain("it's an image")]);

        let bare = doc[1].as_embed().unwrap();
        assert_eq!(bare.path, "bare.png");
        assert!(bare.alt.is_empty());
    }

    #[test]
    fn carriage_returns_are_trimmed_before_classification() {
        let doc = parse("HEADER\r\n/link\r\n");
        assert_eq!(doc[0].as_header(), Some("HEADER"));
        assert_eq!(doc[1].as_nav_link(), Some("link"));
    }

    #[test]
    fn empty_first_list_item_does_not_open_list() {
        let doc = parse("-\n--   \nafter");
        // The bare `-` is skipped; `--   ` trims to `--` and is skipped too.
        assert_eq!(doc.len(), 1);
        assert_eq!(doc[0].kind(), LineKind::Paragraph);
    }

    #[test]
    fn empty_continuation_items_are_consumed() {
        let doc = parse("- a\n-\n- b");
        let list = doc[0].as_list().unwrap();
        assert_eq!(labels(list), vec!["a", "b"]);
    }

    #[test]
    fn blank_line_ends_list() {
        let doc = parse("- a\n\n- b");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc[0].as_list().unwrap().len(), 1);
        assert_eq!(doc[1].as_list().unwrap().len(), 1);
    }

    #[test]
    fn list_continuation_ignores_other_delimiters() {
        let doc = parse("- a\n -- not a list line\n- b");
        assert_eq!(doc.len(), 3);
        assert_eq!(doc[1].kind(), LineKind::Block);
    }

    #[test]
    fn level_three_nests_under_level_two() {
        let doc = parse("- a\n-- b\n--- c\n--- d\n---- e\n-- f");
        let list = doc[0].as_list().unwrap();
        assert_eq!(list.len(), 1);

        let a = &list[0];
        assert_eq!(labels(&a.sublist), vec!["b", "f"]);

        let b = &a.sublist[0];
        assert_eq!(labels(&b.sublist), vec!["c", "d"]);
        assert_eq!(b.sublist[0].level, 3);

        let d = &b.sublist[1];
        assert_eq!(labels(&d.sublist), vec!["e"]);
        assert_eq!(d.sublist[0].level, 4);
        assert_eq!(list.depth(), 4);
    }

    #[test]
    fn level_three_without_level_two_attaches_to_top_item() {
        let doc = parse("- a\n--- deep");
        let list = doc[0].as_list().unwrap();
        assert_eq!(labels(&list[0].sublist), vec!["deep"]);
        assert_eq!(list[0].sublist[0].level, 3);
    }

    #[test]
    fn list_opening_at_level_two_collects_children() {
        let doc = parse("-- root\n-- child\n- next");
        let list = doc[0].as_list().unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].level, 2);
        assert_eq!(labels(&list[0].sublist), vec!["child"]);
    }

    #[test]
    fn block_keeps_lines_verbatim() {
        let doc = parse("  fn main() {\n      body();\n  }\n end");
        assert_eq!(doc.len(), 2);

        let block = doc[0].as_block().unwrap();
        assert_eq!(block.indent, 2);
        assert_eq!(block.body, vec!["  fn main() {", "      body();", "  }"]);

        let tail = doc[1].as_block().unwrap();
        assert_eq!(tail.indent, 1);
        assert_eq!(tail.body, vec![" end"]);
    }

    #[test]
    fn block_counts_only_its_own_delimiter() {
        let doc = parse("\tone\n\t\ttwo\n  three");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc[0].as_block().unwrap().body, vec!["\tone", "\t\ttwo"]);
        assert_eq!(doc[1].as_block().unwrap().indent, 2);
    }

    #[test]
    fn block_ends_at_blank_line_and_keeps_trailing_whitespace() {
        let doc = parse("  a  \n\n  b");
        assert_eq!(doc.len(), 2);
        assert_eq!(doc[0].as_block().unwrap().body, vec!["  a  "]);
    }

    #[test]
    fn header_requires_uppercase_latin() {
        let doc = parse("ALL CAPS\nMixed Case\n1234\n헤더");
        assert_eq!(doc[0].as_header(), Some("ALL CAPS"));
        assert_eq!(doc[1].kind(), LineKind::Paragraph);
        assert_eq!(doc[2].kind(), LineKind::Paragraph);
        assert_eq!(doc[3].kind(), LineKind::Paragraph);
    }

    #[test]
    fn header_is_not_inline_parsed() {
        let doc = parse("*BOLD* [HEADER]");
        assert_eq!(doc[0].as_header(), Some("*BOLD* [HEADER]"));
    }

    #[test]
    fn paragraph_without_runs_is_skipped() {
        let doc = parse("**\n{ }\ntext");
        assert_eq!(doc.len(), 1);
        assert_eq!(
            doc[0].as_paragraph(),
            Some(&[StyledText::plain("text")][..])
        );
    }

    #[test]
    fn embed_alt_is_inline_parsed() {
        let doc = parse("@ 안녕.tga [foo.bar Hello]");
        let embed = doc[0].as_embed().unwrap();
        assert_eq!(embed.path, "안녕.tga");
        assert_eq!(embed.alt.len(), 1);
        assert_eq!(embed.alt[0].style, Style::ExternalLink);
        assert_eq!(embed.alt[0].link, "foo.bar");
        assert_eq!(embed.alt[0].value, "Hello");
    }
}
