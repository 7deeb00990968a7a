#![forbid(unsafe_code)]

//! Live-region kernel: frames, diffs, redraw planning, and ANSI emission.

pub mod ansi;
pub mod diff;
pub mod engine;
pub mod frame;
pub mod plan;
