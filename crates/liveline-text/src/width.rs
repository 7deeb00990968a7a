#![forbid(unsafe_code)]

//! Display width of styled text, ignoring escape sequences.
//!
//! Width is codepoint-level: 0 for zero-width marks and control codes,
//! 1 for ordinary characters, 2 for wide (East Asian) characters, per
//! `unicode-width`. Escape runs contribute nothing.

use memchr::memchr;
use unicode_width::UnicodeWidthChar;

use crate::token::{AnsiToken, tokenize};

/// Display width of a single codepoint in terminal cells.
///
/// Control codes and zero-width marks report 0; wide characters 2.
#[inline]
#[must_use]
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

/// Display width of a styled string, escape sequences excluded.
#[must_use]
pub fn display_width(text: &str) -> usize {
    // Printable-ASCII fast path: no escapes, one cell per printable byte.
    if text.is_ascii() && memchr(0x1b, text.as_bytes()).is_none() {
        return text.bytes().filter(|b| (0x20..=0x7e).contains(b)).count();
    }
    tokenize(text)
        .map(|t| match t {
            AnsiToken::Escape(_) => 0,
            AnsiToken::Char { width, .. } => width,
        })
        .sum()
}

/// Remove all escape runs, keeping only visible characters.
#[must_use]
pub fn strip_escapes(text: &str) -> String {
    if memchr(0x1b, text.as_bytes()).is_none() {
        return text.to_string();
    }
    let mut out = String::with_capacity(text.len());
    for tok in tokenize(text) {
        if let AnsiToken::Char { ch, .. } = tok {
            out.push(ch);
        }
    }
    out
}
