#![forbid(unsafe_code)]

//! Logical lines to width-bounded physical rows.
//!
//! A logical line is a newline-delimited slice of the styled buffer. A
//! physical row is what actually occupies one terminal row after width
//! budgeting. Wrapping accumulates characters until the next one would
//! exceed the column budget, then opens a new row that starts by
//! re-emitting the active style (see [`crate::sgr`]).

use crate::sgr::SgrState;
use crate::token::{AnsiToken, tokenize};

/// Logical lines of a styled buffer.
///
/// Splits on `\n` and drops the single trailing empty line produced by a
/// final newline. An empty buffer is one empty logical line.
#[must_use]
pub fn logical_lines(text: &str) -> Vec<&str> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    if lines.len() > 1 && lines.last() == Some(&"") {
        lines.pop();
    }
    lines
}

/// Split one logical line into physical rows.
///
/// Always yields at least one row. `width == 0` disables splitting and
/// returns the line as a single row. Escape runs are carried verbatim
/// and cost nothing; every continuation row is prefixed with the style
/// active at its wrap point.
#[must_use]
pub fn split_line(line: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![line.to_string()];
    }

    let mut rows = Vec::new();
    let mut style = SgrState::new();
    let mut row = String::new();
    let mut used = 0;

    for tok in tokenize(line) {
        match tok {
            AnsiToken::Escape(seq) => {
                style.observe(seq);
                row.push_str(seq);
            }
            AnsiToken::Char { ch, width: w } => {
                if used + w > width && used > 0 {
                    rows.push(row);
                    row = style.prefix();
                    used = 0;
                }
                row.push(ch);
                used += w;
            }
        }
    }
    rows.push(row);
    rows
}

/// Split a whole styled buffer into per-logical-line physical rows.
///
/// The outer vector has one entry per logical line; its length is the
/// line's physical height.
#[must_use]
pub fn split_text(text: &str, width: usize) -> Vec<Vec<String>> {
    let lines = logical_lines(text);
    let split: Vec<Vec<String>> = lines.iter().map(|l| split_line(l, width)).collect();
    tracing::trace!(
        lines = split.len(),
        rows = split.iter().map(Vec::len).sum::<usize>(),
        width,
        "buffer split"
    );
    split
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::width::display_width;

    #[test]
    fn short_line_is_one_row() {
        assert_eq!(split_line("hello", 80), vec!["hello"]);
    }

    #[test]
    fn empty_line_is_one_empty_row() {
        assert_eq!(split_line("", 80), vec![""]);
    }

    #[test]
    fn wraps_at_width() {
        assert_eq!(split_line("abcdef", 4), vec!["abcd", "ef"]);
    }

    #[test]
    fn exact_fit_does_not_spill() {
        assert_eq!(split_line("abcd", 4), vec!["abcd"]);
    }

    #[test]
    fn zero_width_disables_splitting() {
        assert_eq!(split_line("abcdef", 0), vec!["abcdef"]);
    }

    #[test]
    fn wide_chars_wrap_on_cells_not_chars() {
        // Width 4 holds two CJK cells per row.
        assert_eq!(split_line("你好世界", 4), vec!["你好", "世界"]);
    }

    #[test]
    fn wide_char_never_straddles_the_boundary() {
        // "a" leaves 1 cell at width 2; the 2-cell char moves down whole.
        assert_eq!(split_line("a中", 2), vec!["a", "中"]);
    }

    #[test]
    fn oversized_char_still_placed() {
        // A 2-cell char on a 1-cell budget overflows rather than loops.
        assert_eq!(split_line("中", 1), vec!["中"]);
    }

    #[test]
    fn style_continues_across_wrap() {
        let rows = split_line("\x1b[1mabcdef", 4);
        assert_eq!(rows, vec!["\x1b[1mabcd", "\x1b[1mef"]);
    }

    #[test]
    fn reset_stops_style_continuation() {
        let rows = split_line("\x1b[1mab\x1b[0mcdef", 4);
        assert_eq!(rows, vec!["\x1b[1mab\x1b[0mcd", "ef"]);
    }

    #[test]
    fn stacked_styles_all_reopen() {
        let rows = split_line("\x1b[1m\x1b[4mabcdef", 4);
        assert_eq!(rows, vec!["\x1b[1m\x1b[4mabcd", "\x1b[1m\x1b[4mef"]);
    }

    #[test]
    fn escapes_cost_no_width() {
        // Four visible cells plus styling fits a width-4 row exactly.
        let rows = split_line("\x1b[31mabcd\x1b[0m", 4);
        assert_eq!(rows, vec!["\x1b[31mabcd\x1b[0m"]);
    }

    #[test]
    fn logical_lines_basic() {
        assert_eq!(logical_lines("a\nb"), vec!["a", "b"]);
    }

    #[test]
    fn trailing_newline_dropped() {
        assert_eq!(logical_lines("a\n"), vec!["a"]);
    }

    #[test]
    fn only_single_trailing_empty_dropped() {
        assert_eq!(logical_lines("a\n\n"), vec!["a", ""]);
    }

    #[test]
    fn empty_buffer_is_one_empty_line() {
        assert_eq!(logical_lines(""), vec![""]);
    }

    #[test]
    fn lone_newline_is_one_empty_line() {
        assert_eq!(logical_lines("\n"), vec![""]);
    }

    #[test]
    fn split_text_heights() {
        let split = split_text("abcdef\nxy\n", 4);
        assert_eq!(split.len(), 2);
        assert_eq!(split[0], vec!["abcd", "ef"]);
        assert_eq!(split[1], vec!["xy"]);
    }

    #[test]
    fn narrow_lines_keep_unit_height() {
        // Every logical line within budget: one physical row each.
        let split = split_text("a\nbb\nccc", 80);
        assert!(split.iter().all(|rows| rows.len() == 1));
    }

    #[test]
    fn rows_respect_width_budget() {
        for row in split_line("the quick brown fox jumps over", 7) {
            assert!(display_width(&row) <= 7);
        }
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::width::{display_width, strip_escapes};
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn rows_never_exceed_width(s in "[a-zA-Z 你好]{0,60}", width in 1usize..40) {
            for row in split_line(&s, width) {
                // A single oversized codepoint may overflow a 1-cell budget.
                prop_assert!(display_width(&row) <= width.max(2));
            }
        }

        #[test]
        fn visible_content_preserved(s in "[a-zA-Z]{0,60}", width in 1usize..40) {
            let rejoined: String = split_line(&s, width)
                .iter()
                .map(|r| strip_escapes(r))
                .collect();
            prop_assert_eq!(rejoined, s);
        }

        #[test]
        fn at_least_one_row(s in "[a-zA-Z \\n]{0,60}", width in 0usize..40) {
            for line in logical_lines(&s) {
                prop_assert!(!split_line(line, width).is_empty());
            }
        }
    }
}
