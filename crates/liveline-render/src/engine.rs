#![forbid(unsafe_code)]

//! The live region engine: state-tracked in-place redraw.
//!
//! A [`LiveRegion`] owns a write sink and a pure `render_frame` callback.
//! Every [`render`](LiveRegion::render) call receives the *entire*
//! current logical buffer (never a delta), styles it through the
//! callback, composes a [`Frame`], decides between no-op, append,
//! partial, and full redraw, and emits one batch through the sink.
//!
//! # Design Principles
//!
//! - **Single owner**: engine state lives in one struct behind `&mut
//!   self`; there is no internal synchronization and no global state.
//! - **Single write**: each call assembles its whole batch and writes it
//!   with one `write_all`, optionally wrapped in synchronized-output
//!   framing so a compatible terminal applies it atomically.
//! - **Commit after emit**: state is only updated once the batch has
//!   been handed to the sink, so a propagated sink error never leaves
//!   state ahead of the terminal.
//!
//! # Usage
//!
//! ```
//! use liveline_render::engine::{LiveOptions, LiveRegion};
//!
//! let mut region = LiveRegion::new(
//!     Vec::new(),
//!     |input: &str| input.to_string(),
//!     LiveOptions::new().with_width(40),
//! );
//! region.render("building...").unwrap();
//! region.render("building...\ndone").unwrap();
//! region.finish(None).unwrap();
//! ```

use std::io::{self, Write};

use crate::ansi;
use crate::diff::FrameDiff;
use crate::frame::Frame;
use crate::plan::{RedrawPlan, partial_is_safe};

/// Fallback column budget when none (or zero) is configured.
pub const DEFAULT_WIDTH: usize = 80;

/// Construction-time engine options, immutable for the engine lifetime.
///
/// Zero-valued `width`, `max_rows`, or `tail_rows` fall back to the
/// default / unset rather than failing construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LiveOptions {
    /// Column budget for row splitting.
    pub width: usize,
    /// Overflow threshold: total rows in normal mode, windowed rows in
    /// tail mode.
    pub max_rows: Option<usize>,
    /// Keep only the last N physical rows on screen. Disables the
    /// append fast path.
    pub tail_rows: Option<usize>,
    /// Hide the cursor for the region's lifetime.
    pub hide_cursor: bool,
    /// Wrap each emitted batch in synchronized-update framing.
    pub synchronized_output: bool,
    /// Emit only the suffix when the new text strictly extends the old.
    ///
    /// The prefix check is byte-level: a caller whose previous text did
    /// not end in a newline gets mid-line continuation semantics.
    /// Ignored whenever `tail_rows` is set.
    pub append_when_possible: bool,
    /// Clear the visible region when overflow triggers.
    pub clear_on_overflow: bool,
    /// Clear terminal scrollback and screen when overflow triggers.
    /// Takes precedence over `clear_on_overflow`.
    pub clear_scrollback_on_overflow: bool,
}

impl Default for LiveOptions {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            max_rows: None,
            tail_rows: None,
            hide_cursor: true,
            synchronized_output: true,
            append_when_possible: false,
            clear_on_overflow: true,
            clear_scrollback_on_overflow: false,
        }
    }
}

impl LiveOptions {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the column budget.
    #[must_use]
    pub const fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the overflow threshold.
    #[must_use]
    pub const fn with_max_rows(mut self, max_rows: usize) -> Self {
        self.max_rows = Some(max_rows);
        self
    }

    /// Keep only the last N physical rows on screen.
    #[must_use]
    pub const fn with_tail_rows(mut self, tail_rows: usize) -> Self {
        self.tail_rows = Some(tail_rows);
        self
    }

    /// Enable or disable cursor hiding.
    #[must_use]
    pub const fn with_hide_cursor(mut self, hide: bool) -> Self {
        self.hide_cursor = hide;
        self
    }

    /// Enable or disable synchronized-output framing.
    #[must_use]
    pub const fn with_synchronized_output(mut self, sync: bool) -> Self {
        self.synchronized_output = sync;
        self
    }

    /// Enable the prefix-extension fast path.
    #[must_use]
    pub const fn with_append_when_possible(mut self, append: bool) -> Self {
        self.append_when_possible = append;
        self
    }

    /// Clear the visible region when overflow triggers.
    #[must_use]
    pub const fn with_clear_on_overflow(mut self, clear: bool) -> Self {
        self.clear_on_overflow = clear;
        self
    }

    /// Clear scrollback and screen when overflow triggers.
    #[must_use]
    pub const fn with_clear_scrollback_on_overflow(mut self, clear: bool) -> Self {
        self.clear_scrollback_on_overflow = clear;
        self
    }

    /// Out-of-range values silently fall back to defaults.
    const fn normalized(mut self) -> Self {
        if self.width == 0 {
            self.width = DEFAULT_WIDTH;
        }
        if let Some(0) = self.max_rows {
            self.max_rows = None;
        }
        if let Some(0) = self.tail_rows {
            self.tail_rows = None;
        }
        self
    }
}

/// Engine state, mutated only after a successful emit.
#[derive(Debug, Default)]
struct EngineState {
    /// The last emitted frame: physical rows plus per-logical-line
    /// heights.
    frame: Frame,
    /// Total physical rows of the last emitted frame; the anchor for
    /// cursor-movement deltas.
    cursor_row: usize,
    /// Whether the hide-cursor sequence has been emitted.
    cursor_hidden: bool,
    /// One-way overflow latch; never resets.
    overflowed: bool,
    /// Full styled text last rendered, for the append prefix check.
    last_text: String,
}

/// A live, in-place updating region of the terminal.
///
/// `W` is the byte sink, `F` the styling callback mapping the whole
/// logical buffer to styled text. Both are injected; the engine emits
/// only relative cursor movement and never reads terminal state.
pub struct LiveRegion<W, F> {
    writer: W,
    render_frame: F,
    opts: LiveOptions,
    on_overflow: Option<Box<dyn FnMut(usize, usize)>>,
    state: EngineState,
}

impl<W: Write, F: FnMut(&str) -> String> LiveRegion<W, F> {
    /// Create an engine over `writer` with the given styling callback.
    pub fn new(writer: W, render_frame: F, options: LiveOptions) -> Self {
        Self {
            writer,
            render_frame,
            opts: options.normalized(),
            on_overflow: None,
            state: EngineState::default(),
        }
    }

    /// Install the overflow hook, invoked exactly once on the
    /// normal-to-overflowed transition with (observed rows, max rows).
    #[must_use]
    pub fn overflow_hook(mut self, hook: impl FnMut(usize, usize) + 'static) -> Self {
        self.on_overflow = Some(Box::new(hook));
        self
    }

    /// The normalized options this engine runs with.
    #[must_use]
    pub fn options(&self) -> &LiveOptions {
        &self.opts
    }

    /// Render the full current buffer, emitting the minimal repaint.
    ///
    /// Repeated calls with identical content write zero bytes.
    pub fn render(&mut self, input: &str) -> io::Result<()> {
        // Normal-mode overflow is terminal: the engine acts as a
        // backpressure valve and emits nothing further.
        if self.state.overflowed && self.opts.tail_rows.is_none() {
            return Ok(());
        }

        let styled = (self.render_frame)(input);
        let full = Frame::compose(&styled, self.opts.width);
        let frame = match self.opts.tail_rows {
            Some(keep) => full.tail(keep),
            None => full,
        };

        #[cfg(feature = "tracing")]
        let _span = tracing::debug_span!("render", rows = frame.total_rows());
        #[cfg(feature = "tracing")]
        let _guard = _span.enter();

        let mut batch = String::new();
        let mut cursor_row = self.state.cursor_row;
        let mut prev_cleared = false;

        if let Some(max) = self.opts.max_rows
            && !self.state.overflowed
            && frame.total_rows() > max
        {
            let observed = frame.total_rows();
            // Latch before anything else: the hook fires at most once
            // per engine lifetime, even if the emit below fails.
            self.state.overflowed = true;
            if let Some(hook) = self.on_overflow.as_mut() {
                hook(observed, max);
            }
            if self.opts.clear_scrollback_on_overflow {
                batch.push_str(ansi::CLEAR_SCROLLBACK);
                prev_cleared = true;
                cursor_row = 0;
            } else if self.opts.clear_on_overflow {
                ansi::cursor_up(&mut batch, cursor_row);
                batch.push('\r');
                batch.push_str(ansi::CLEAR_TO_END);
                prev_cleared = true;
                cursor_row = 0;
            }
            if self.opts.tail_rows.is_none() {
                if !batch.is_empty() {
                    self.emit(&batch)?;
                }
                if prev_cleared {
                    self.state.frame = Frame::empty();
                    self.state.cursor_row = 0;
                }
                return Ok(());
            }
            // Tail mode: the window keeps future output bounded, so
            // rendering continues after the one-shot notification.
        }

        let plan = self.choose_plan(&styled, &frame, prev_cleared, cursor_row);
        #[cfg(feature = "tracing")]
        tracing::trace!(plan = plan.label(), cursor_row, "plan chosen");

        let emitted = match plan {
            RedrawPlan::Noop => {
                debug_assert!(batch.is_empty());
                false
            }
            RedrawPlan::Append { suffix_start } => {
                push_append(&mut batch, &styled[suffix_start..]);
                true
            }
            RedrawPlan::Partial { first_row } => {
                push_redraw(&mut batch, frame.rows(), first_row, cursor_row);
                true
            }
            RedrawPlan::Full => {
                push_redraw(&mut batch, frame.rows(), 0, cursor_row);
                true
            }
        };
        if emitted {
            self.emit(&batch)?;
            self.commit(frame, styled);
        }
        Ok(())
    }

    /// Final repaint and cursor restoration.
    ///
    /// With `final_input`, performs one last *full* repaint (bypassing
    /// the tail window) before restoring the cursor. With no prior
    /// output and cursor hiding disabled this writes zero bytes.
    pub fn finish(&mut self, final_input: Option<&str>) -> io::Result<()> {
        if let Some(input) = final_input {
            let halted = self.state.overflowed && self.opts.tail_rows.is_none();
            if !halted {
                let styled = (self.render_frame)(input);
                let frame = Frame::compose(&styled, self.opts.width);
                let mut batch = String::new();
                push_redraw(&mut batch, frame.rows(), 0, self.state.cursor_row);
                self.emit(&batch)?;
                self.commit(frame, styled);
            }
        }
        if self.state.cursor_hidden {
            self.writer.write_all(ansi::CURSOR_SHOW.as_bytes())?;
            self.writer.flush()?;
            self.state.cursor_hidden = false;
        }
        Ok(())
    }

    /// Recover the sink (consuming the engine).
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Pick exactly one path for this call.
    fn choose_plan(
        &self,
        styled: &str,
        frame: &Frame,
        prev_cleared: bool,
        cursor_row: usize,
    ) -> RedrawPlan {
        if self.opts.append_when_possible
            && self.opts.tail_rows.is_none()
            && !prev_cleared
            && styled.len() > self.state.last_text.len()
            && styled.starts_with(&self.state.last_text)
        {
            return RedrawPlan::Append {
                suffix_start: self.state.last_text.len(),
            };
        }
        let prev: &[String] = if prev_cleared {
            &[]
        } else {
            self.state.frame.rows()
        };
        match FrameDiff::compute(prev, frame.rows()).first_changed() {
            None => RedrawPlan::Noop,
            Some(first) if partial_is_safe(first, cursor_row, self.opts.max_rows) => {
                RedrawPlan::Partial { first_row: first }
            }
            Some(_) => RedrawPlan::Full,
        }
    }

    /// Wrap the batch (hide-cursor on first output, sync framing) and
    /// hand it to the sink in one write.
    fn emit(&mut self, batch: &str) -> io::Result<()> {
        debug_assert!(!batch.is_empty());
        let hide = self.opts.hide_cursor && !self.state.cursor_hidden;
        let mut out = String::with_capacity(batch.len() + 24);
        if hide {
            out.push_str(ansi::CURSOR_HIDE);
        }
        if self.opts.synchronized_output {
            out.push_str(ansi::SYNC_BEGIN);
            out.push_str(batch);
            out.push_str(ansi::SYNC_END);
        } else {
            out.push_str(batch);
        }
        self.writer.write_all(out.as_bytes())?;
        self.writer.flush()?;
        if hide {
            self.state.cursor_hidden = true;
        }
        #[cfg(feature = "tracing")]
        tracing::trace!(bytes = out.len(), "batch emitted");
        Ok(())
    }

    /// Adopt the emitted frame as the new previous state.
    fn commit(&mut self, frame: Frame, styled: String) {
        self.state.cursor_row = frame.total_rows();
        self.state.frame = frame;
        self.state.last_text = styled;
    }
}

/// Cursor movement + clear + rows from `first` to the end, each row
/// CRLF-terminated so redraws are robust to line-discipline settings.
fn push_redraw(batch: &mut String, rows: &[String], first: usize, cursor_row: usize) {
    if first < cursor_row {
        ansi::cursor_up(batch, cursor_row - first);
    } else {
        ansi::cursor_down(batch, first - cursor_row);
    }
    batch.push('\r');
    batch.push_str(ansi::CLEAR_TO_END);
    for row in &rows[first..] {
        batch.push_str(row);
        batch.push_str(ansi::CRLF);
    }
}

/// Append-path suffix with newlines translated to CRLF. No movement, no
/// clearing.
fn push_append(batch: &mut String, suffix: &str) {
    for ch in suffix.chars() {
        if ch == '\n' {
            batch.push_str(ansi::CRLF);
        } else {
            batch.push(ch);
        }
    }
}
