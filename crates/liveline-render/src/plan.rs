#![forbid(unsafe_code)]

//! Redraw decision: exactly one of these paths executes per call.
//!
//! The engine reduces every `render()` call to a single tagged decision
//! instead of threading the choice through nested conditionals, which
//! keeps the "one path per call" property testable.

/// What a `render()` call will do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedrawPlan {
    /// Frames are identical: write nothing, touch nothing.
    Noop,
    /// Pure growth: emit only the styled-text suffix from this byte offset.
    Append {
        /// Byte offset into the new styled text where the suffix begins.
        suffix_start: usize,
    },
    /// Repaint from this row to the end of the frame.
    Partial {
        /// First changed row index.
        first_row: usize,
    },
    /// Repaint the whole frame from row 0.
    Full,
}

impl RedrawPlan {
    /// Short label for tracing.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Noop => "noop",
            Self::Append { .. } => "append",
            Self::Partial { .. } => "partial",
            Self::Full => "full",
        }
    }
}

/// Whether a partial repaint starting at `first_row` stays inside the
/// rewritable viewport.
///
/// With a row budget configured, rows above `cursor_row - max_rows` may
/// have scrolled out of the terminal's rewritable region; repainting
/// from there would corrupt the display, so the engine falls back to a
/// full repaint.
#[must_use]
pub fn partial_is_safe(first_row: usize, cursor_row: usize, max_rows: Option<usize>) -> bool {
    match max_rows {
        Some(max) => first_row >= cursor_row.saturating_sub(max),
        None => true,
    }
}
