//! Character classification shared by the block and inline scanners.
//!
//! Whitespace always means the Unicode `White_Space` property. Delimiters
//! are single ASCII bytes, so prefix counting works on bytes, while header
//! detection needs script and general-category data per character.

use unicode_categories::UnicodeCategories;
use unicode_script::{Script, UnicodeScript};

/// Per-character tests used when classifying header lines.
pub trait RivitChar: Sized + Copy {
    /// Whether the character belongs to the Latin script.
    fn is_latin(&self) -> bool;
    /// Whether the character is a Latin letter in general category `Lu`.
    fn is_latin_uppercase(&self) -> bool;
}

impl RivitChar for char {
    #[inline]
    fn is_latin(&self) -> bool {
        self.script() == Script::Latin
    }

    #[inline]
    fn is_latin_uppercase(&self) -> bool {
        self.is_latin() && self.is_letter_uppercase()
    }
}

/// Strip leading Unicode whitespace.
#[inline]
pub fn trim_left(s: &str) -> &str {
    s.trim_start_matches(char::is_whitespace)
}

/// Strip trailing Unicode whitespace.
#[inline]
pub fn trim_right(s: &str) -> &str {
    s.trim_end_matches(char::is_whitespace)
}

/// Strip Unicode whitespace from both ends.
#[inline]
pub fn trim(s: &str) -> &str {
    s.trim_matches(char::is_whitespace)
}

/// Count the leading bytes of `s` equal to `delim`.
#[inline]
pub fn count_prefix(s: &str, delim: u8) -> usize {
    s.bytes().take_while(|&b| b == delim).count()
}

/// Whether the character starting at byte `pos` of `s` is whitespace.
///
/// Returns `false` at end of input or when `pos` is not a character boundary.
#[inline]
pub fn is_whitespace_at(s: &str, pos: usize) -> bool {
    s.get(pos..)
        .and_then(|rest| rest.chars().next())
        .is_some_and(char::is_whitespace)
}

/// Whether a trimmed, non-delimiter line reads as a header.
///
/// Every Latin-script character must be an uppercase letter and at least one
/// must be present. Digits, punctuation and other scripts are ignored.
pub fn is_header_text(line: &str) -> bool {
    let mut saw_upper = false;
    for c in line.chars().filter(|c| c.is_latin()) {
        if !c.is_latin_uppercase() {
            return false;
        }
        saw_upper = true;
    }
    saw_upper
}
