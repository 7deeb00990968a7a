#![forbid(unsafe_code)]

//! Diff computation between frames.
//!
//! The live region repaints from the first changed row to the end, so
//! the diff is a single index: scan both row lists from the top and find
//! the first position where they diverge by strict content equality
//! (styling included). Rows beyond the shorter frame count as changed.
//! Equal frames produce no index, and the render is a no-op.

/// The diff between the previously emitted frame and the new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameDiff {
    first_changed: Option<usize>,
}

impl FrameDiff {
    /// Compare two row lists from index 0.
    #[must_use]
    pub fn compute(prev: &[String], next: &[String]) -> Self {
        let shared = prev.len().min(next.len());
        for i in 0..shared {
            if prev[i] != next[i] {
                return Self {
                    first_changed: Some(i),
                };
            }
        }
        Self {
            first_changed: (prev.len() != next.len()).then_some(shared),
        }
    }

    /// Index of the first changed row, or `None` when the frames match.
    #[must_use]
    pub fn first_changed(&self) -> Option<usize> {
        self.first_changed
    }

    /// True when nothing changed and no bytes should be written.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.first_changed.is_none()
    }
}
