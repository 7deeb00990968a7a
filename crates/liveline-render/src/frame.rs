#![forbid(unsafe_code)]

//! Frame composition: a styled buffer snapshot as physical rows.
//!
//! A frame is the unit handed to the differ and the sequencer: the
//! ordered physical rows of one `render()` call, plus the per-logical-line
//! row counts the splitter produced. Rows embed raw styling escapes;
//! their display width ignores them.

use liveline_text::split::split_text;

/// One composed snapshot of the live region.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Frame {
    rows: Vec<String>,
    heights: Vec<usize>,
}

impl Frame {
    /// A frame with no rows (the state before the first emit).
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Compose a styled buffer into physical rows at the given width.
    #[must_use]
    pub fn compose(styled: &str, width: usize) -> Self {
        let mut rows = Vec::new();
        let mut heights = Vec::new();
        for line_rows in split_text(styled, width) {
            heights.push(line_rows.len());
            rows.extend(line_rows);
        }
        debug_assert_eq!(heights.iter().sum::<usize>(), rows.len());
        Self { rows, heights }
    }

    /// Keep only the last `keep` physical rows, each of unit height.
    ///
    /// Tail windows cut across logical lines, so per-line heights stop
    /// being meaningful; every kept row counts as its own line.
    #[must_use]
    pub fn tail(mut self, keep: usize) -> Self {
        if self.rows.len() > keep {
            self.rows.drain(..self.rows.len() - keep);
        }
        self.heights = vec![1; self.rows.len()];
        self
    }

    /// The physical rows, in order.
    #[must_use]
    pub fn rows(&self) -> &[String] {
        &self.rows
    }

    /// Physical row count per logical line.
    #[must_use]
    pub fn heights(&self) -> &[usize] {
        &self.heights
    }

    /// Number of logical lines.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.heights.len()
    }

    /// Total physical row count.
    #[must_use]
    pub fn total_rows(&self) -> usize {
        self.rows.len()
    }

    /// Decompose into rows and per-line heights.
    #[must_use]
    pub fn into_parts(self) -> (Vec<String>, Vec<usize>) {
        (self.rows, self.heights)
    }
}
