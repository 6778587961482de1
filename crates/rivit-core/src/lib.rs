//! # Rivit Core
//!
//! Parser for Rivit, a strict line-oriented markup language in the spirit of
//! Gemtext. Each line is classified by its first character; paragraphs, list
//! items and embed captions carry inline styling.
//!
//! ## Quick Start
//!
//! ```rust
//! use rivit_core::{parse, Line, Style};
//!
//! let input = "WELCOME\n/index\n- first *point*\n-- detail\nSee [https://example.com docs].";
//! let doc = parse(input);
//!
//! assert_eq!(doc.len(), 4);
//! if let Line::List(list) = &doc[2] {
//!     assert_eq!(list[0].sublist.len(), 1);
//!     assert_eq!(list[0].value[1].style, Style::Italic);
//! }
//! ```
//!
//! ## Syntax
//!
//! | Line starts with | Construct |
//! |---|---|
//! | `#` | comment (dropped) |
//! | `/` | navigation link |
//! | `@` | embed: `@path alt text` |
//! | `-`, `--`, `---` ... | list item at that level |
//! | space or tab | verbatim indented block |
//! | anything else | header if every Latin letter is uppercase, else paragraph |
//!
//! Inline: `*italic*`, `**bold**`, `` `mono` ``, `{internal target text}`,
//! `[external target text]`, and `\x` to take `x` literally.
//!
//! Parsing never fails. Malformed input degrades to the closest structure.

pub mod ast;
pub mod chars;
pub mod inline;
pub mod lexer;
pub mod parser;
pub mod span;

pub use ast::{Block, Document, Embed, Line, LineKind, List, ListItem, Style, StyledText};
pub use inline::parse_inline;
pub use parser::parse;
