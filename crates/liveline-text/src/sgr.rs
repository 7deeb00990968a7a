#![forbid(unsafe_code)]

//! Active SGR style-run tracking.
//!
//! The row splitter re-emits the currently active style at the start of
//! every continuation row, so a style opened before a wrap point visually
//! continues on the next physical row. This module tracks what "currently
//! active" means: SGR sequences accumulate, and any SGR whose parameter
//! list is empty or contains a reset code clears the accumulated state.
//!
//! Sequences are carried as opaque byte runs and re-emitted verbatim;
//! they are never decoded into attribute flags.

use smallvec::SmallVec;

/// Accumulated SGR state for one logical line.
#[derive(Debug, Clone, Default)]
pub struct SgrState {
    active: SmallVec<[String; 2]>,
}

impl SgrState {
    /// Fresh state with no active style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one escape run. Non-SGR runs (OSC, cursor movement) are ignored.
    pub fn observe(&mut self, seq: &str) {
        let Some(params) = sgr_params(seq) else {
            return;
        };
        if has_reset(params) {
            self.active.clear();
        } else {
            self.active.push(seq.to_string());
        }
    }

    /// True if no style is active.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        self.active.is_empty()
    }

    /// Append the active style runs to `out`, in observation order.
    pub fn write_prefix(&self, out: &mut String) {
        for seq in &self.active {
            out.push_str(seq);
        }
    }

    /// The active style runs concatenated into a row prefix.
    #[must_use]
    pub fn prefix(&self) -> String {
        let mut out = String::new();
        self.write_prefix(&mut out);
        out
    }
}

/// Parameter list of an SGR sequence (`ESC [ params m`), or `None` if
/// `seq` is not SGR.
fn sgr_params(seq: &str) -> Option<&str> {
    let rest = seq.strip_prefix("\x1b[")?;
    rest.strip_suffix('m')
}

/// Whether the parameter list carries a reset.
///
/// An empty list or an empty/`0` parameter resets. Color arguments of
/// the extended forms (`38;2;r;g;b`, `38;5;n`, same for 48/58) are
/// skipped so a zero color component is not mistaken for a reset.
fn has_reset(params: &str) -> bool {
    if params.is_empty() {
        return true;
    }
    let mut it = params.split(';');
    while let Some(p) = it.next() {
        if p.is_empty() || p == "0" {
            return true;
        }
        if p == "38" || p == "48" || p == "58" {
            match it.next() {
                Some("2") => {
                    let _ = it.nth(2);
                }
                Some("5") => {
                    let _ = it.next();
                }
                _ => {}
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_plain() {
        let state = SgrState::new();
        assert!(state.is_plain());
        assert_eq!(state.prefix(), "");
    }

    #[test]
    fn style_accumulates() {
        let mut state = SgrState::new();
        state.observe("\x1b[1m");
        state.observe("\x1b[31m");
        assert_eq!(state.prefix(), "\x1b[1m\x1b[31m");
    }

    #[test]
    fn explicit_reset_clears() {
        let mut state = SgrState::new();
        state.observe("\x1b[1m");
        state.observe("\x1b[0m");
        assert!(state.is_plain());
    }

    #[test]
    fn bare_sgr_is_reset() {
        let mut state = SgrState::new();
        state.observe("\x1b[31m");
        state.observe("\x1b[m");
        assert!(state.is_plain());
    }

    #[test]
    fn reset_anywhere_in_params_clears() {
        let mut state = SgrState::new();
        state.observe("\x1b[1m");
        state.observe("\x1b[0;31m");
        assert!(state.is_plain());
    }

    #[test]
    fn non_sgr_sequences_ignored() {
        let mut state = SgrState::new();
        state.observe("\x1b[1m");
        state.observe("\x1b]8;;https://example.com\x07");
        state.observe("\x1b[2A");
        assert_eq!(state.prefix(), "\x1b[1m");
    }

    #[test]
    fn truecolor_run_kept_verbatim() {
        let mut state = SgrState::new();
        state.observe("\x1b[38;2;200;100;0m");
        assert_eq!(state.prefix(), "\x1b[38;2;200;100;0m");
    }

    #[test]
    fn zero_color_component_is_not_a_reset() {
        let mut state = SgrState::new();
        state.observe("\x1b[38;2;0;0;0m");
        state.observe("\x1b[48;5;0m");
        assert_eq!(state.prefix(), "\x1b[38;2;0;0;0m\x1b[48;5;0m");
    }

    #[test]
    fn reset_after_color_args_still_clears() {
        let mut state = SgrState::new();
        state.observe("\x1b[38;5;10;0m");
        assert!(state.is_plain());
    }
}
