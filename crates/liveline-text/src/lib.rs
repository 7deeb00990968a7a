#![forbid(unsafe_code)]

//! Styled-text primitives for the liveline redraw engine.
//!
//! This crate handles everything below the frame level:
//! - [`token`] - escape-aware tokenization of styled strings
//! - [`width`] - codepoint display width, ignoring escape sequences
//! - [`sgr`] - active style-run tracking across wrap points
//! - [`split`] - logical lines to width-bounded physical rows
//!
//! Width accounting is codepoint-level (via `unicode-width`). Grapheme
//! clusters are not kept together across wrap points; ZWJ emoji sequences
//! may split. This is a known approximation, not a bug.

pub mod sgr;
pub mod split;
pub mod token;
pub mod width;

pub use sgr::SgrState;
pub use split::{logical_lines, split_line, split_text};
pub use token::{AnsiToken, Tokens, tokenize};
pub use width::{char_width, display_width, strip_escapes};
