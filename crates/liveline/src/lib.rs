#![forbid(unsafe_code)]

//! Liveline public facade crate.
//!
//! Re-exports the stable surface of the internal crates and offers a
//! lightweight prelude. The engine repaints a live terminal region in
//! place: feed it the whole logical buffer on every update and it emits
//! the minimal control sequences to bring the screen up to date.
//!
//! ```
//! use liveline::prelude::*;
//!
//! let mut region = LiveRegion::new(
//!     std::io::stdout(),
//!     |input: &str| input.to_string(),
//!     LiveOptions::new().with_width(100),
//! );
//! region.render("step 1: fetching").unwrap();
//! region.render("step 1: fetching\nstep 2: building").unwrap();
//! region.finish(None).unwrap();
//! ```

// --- Engine re-exports -----------------------------------------------------

pub use liveline_render::engine::{DEFAULT_WIDTH, LiveOptions, LiveRegion};

// --- Kernel re-exports -----------------------------------------------------

pub use liveline_render::ansi;
pub use liveline_render::diff::FrameDiff;
pub use liveline_render::frame::Frame;
pub use liveline_render::plan::RedrawPlan;

// --- Text re-exports -------------------------------------------------------

pub use liveline_text::sgr::SgrState;
pub use liveline_text::split::{logical_lines, split_line, split_text};
pub use liveline_text::token::{AnsiToken, tokenize};
pub use liveline_text::width::{char_width, display_width, strip_escapes};

/// Day-to-day imports.
pub mod prelude {
    pub use crate::{Frame, LiveOptions, LiveRegion, display_width, strip_escapes};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn facade_round_trip() {
        let mut region = LiveRegion::new(
            Vec::new(),
            |input: &str| input.to_string(),
            LiveOptions::new().with_width(20).with_hide_cursor(false),
        );
        region.render("hi").unwrap();
        region.finish(None).unwrap();
        let out = String::from_utf8(region.into_inner()).unwrap();
        assert!(strip_escapes(&out).contains("hi"));
    }

    #[test]
    fn width_helpers_reachable() {
        assert_eq!(display_width("\x1b[1mok\x1b[0m"), 2);
    }
}
