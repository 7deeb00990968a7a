#![forbid(unsafe_code)]

//! Escape-aware tokenization of styled strings.
//!
//! A styled string is a flat sequence of two kinds of units: escape runs
//! (consumed verbatim, zero display width) and visible characters. Two
//! escape families are recognized:
//!
//! | Family | Introducer | Terminator |
//! |--------|-----------|------------|
//! | CSI (cursor/style) | `ESC [` | byte in `@`..=`~` |
//! | OSC (hyperlinks etc.) | `ESC ]` | BEL or `ESC \` |
//!
//! Any other `ESC x` pair is passed through as a two-codepoint escape.
//! A sequence with no terminator before end of input is consumed to the
//! end, best effort; tokenization never fails.

use memchr::memchr;

use crate::width::char_width;

const ESC: u8 = 0x1b;
const BEL: u8 = 0x07;

/// One unit of a styled string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiToken<'a> {
    /// A complete escape run, zero display width, emitted verbatim.
    Escape(&'a str),
    /// A single visible codepoint and its display width (0, 1 or 2).
    Char {
        /// The codepoint.
        ch: char,
        /// Display width in terminal cells.
        width: usize,
    },
}

/// Iterator over the tokens of a styled string.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    rest: &'a str,
}

/// Tokenize a styled string into escape runs and visible characters.
#[must_use]
pub fn tokenize(text: &str) -> Tokens<'_> {
    Tokens { rest: text }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = AnsiToken<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.rest.is_empty() {
            return None;
        }
        if self.rest.as_bytes()[0] == ESC {
            let len = escape_len(self.rest);
            let (run, rest) = self.rest.split_at(len);
            self.rest = rest;
            return Some(AnsiToken::Escape(run));
        }
        let mut chars = self.rest.chars();
        let ch = chars.next()?;
        self.rest = chars.as_str();
        Some(AnsiToken::Char {
            ch,
            width: char_width(ch),
        })
    }
}

/// Byte length of the escape run starting at `s` (which begins with ESC).
///
/// Always returns a valid char boundary: terminators are ASCII, and the
/// unterminated fallback is the full remaining length.
fn escape_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    debug_assert_eq!(bytes[0], ESC);

    if bytes.len() == 1 {
        return 1;
    }
    match bytes[1] {
        b'[' => csi_len(bytes),
        b']' => osc_len(bytes),
        _ => {
            // Two-unit escape: ESC plus one codepoint, passed through as-is.
            match s[1..].chars().next() {
                Some(ch) => 1 + ch.len_utf8(),
                None => 1,
            }
        }
    }
}

/// CSI run: `ESC [` up to and including the first final byte in `@`..=`~`.
fn csi_len(bytes: &[u8]) -> usize {
    for (i, &b) in bytes.iter().enumerate().skip(2) {
        if (0x40..=0x7e).contains(&b) {
            return i + 1;
        }
    }
    bytes.len()
}

/// OSC run: `ESC ]` up to and including BEL or the `ESC \` string terminator.
fn osc_len(bytes: &[u8]) -> usize {
    let body = &bytes[2..];
    let bel = memchr(BEL, body);
    let st = find_st(body);
    match (bel, st) {
        (Some(b), Some(s)) if b < s => 2 + b + 1,
        (Some(_) | None, Some(s)) => 2 + s + 2,
        (Some(b), None) => 2 + b + 1,
        (None, None) => bytes.len(),
    }
}

/// Position of the first `ESC \` pair in `body`, if any.
fn find_st(body: &[u8]) -> Option<usize> {
    let mut from = 0;
    while let Some(i) = memchr(ESC, &body[from..]) {
        let at = from + i;
        if body.get(at + 1) == Some(&b'\\') {
            return Some(at);
        }
        from = at + 1;
    }
    None
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn tokens_cover_input_losslessly(s in "[ -~\u{1b}\u{7}]{0,80}") {
            let rebuilt: String = tokenize(&s)
                .map(|t| match t {
                    AnsiToken::Escape(run) => run.to_string(),
                    AnsiToken::Char { ch, .. } => ch.to_string(),
                })
                .collect();
            prop_assert_eq!(rebuilt, s);
        }

        #[test]
        fn tokenize_never_panics_on_unicode(s in "\\PC{0,40}") {
            let _ = tokenize(&s).count();
        }
    }
}
