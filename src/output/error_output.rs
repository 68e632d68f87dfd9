//! Colored error and warning lines on stderr.
//!
//! Format: `✖ Error Type: message` or `⚠ Warning: message`, followed by an
//! optional `× detail` line and an optional `help:` line.

use std::error::Error as _;
use std::io::{IsTerminal, Write};

use super::{ColorMode, ansi};
use crate::error::InsekiError;
use crate::structure::ImportWarning;

pub struct ErrorOutput {
    use_colors: bool,
}

impl ErrorOutput {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self {
            use_colors: mode.enabled(std::io::stderr().is_terminal()),
        }
    }

    /// Auto-detect color support on stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self::new(ColorMode::Auto)
    }

    #[cfg(test)]
    pub const fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Print a crate error with its underlying cause and remediation hint.
    pub fn report(&self, err: &InsekiError) {
        self.write_report(&mut std::io::stderr().lock(), err);
    }

    pub fn write_report<W: Write>(&self, w: &mut W, err: &InsekiError) {
        let cause = err.source().map(ToString::to_string);
        self.write_error(w, err.error_type(), &err.to_string(), cause.as_deref(), err.suggestion());
    }

    /// Print a skipped template.
    pub fn import_warning(&self, warning: &ImportWarning) {
        self.write_warning(&mut std::io::stderr().lock(), &warning.message(), None, None);
    }

    pub fn write_error<W: Write>(
        &self,
        w: &mut W,
        error_type: &str,
        message: &str,
        detail: Option<&str>,
        suggestion: Option<&str>,
    ) {
        let head = format!("✖ {error_type}:");
        self.write_message(w, &head, ansi::RED, message, detail, suggestion);
    }

    pub fn write_warning<W: Write>(
        &self,
        w: &mut W,
        message: &str,
        detail: Option<&str>,
        suggestion: Option<&str>,
    ) {
        self.write_message(w, "⚠ Warning:", ansi::YELLOW, message, detail, suggestion);
    }

    // Write failures on stderr are ignored.
    fn write_message<W: Write>(
        &self,
        w: &mut W,
        head: &str,
        color: &str,
        message: &str,
        detail: Option<&str>,
        suggestion: Option<&str>,
    ) {
        if self.use_colors {
            let _ = writeln!(w, "{}{color}{head}{} {message}", ansi::BOLD, ansi::RESET);
        } else {
            let _ = writeln!(w, "{head} {message}");
        }

        if let Some(d) = detail {
            if self.use_colors {
                let _ = writeln!(w, "  {}× {d}{}", ansi::DIM, ansi::RESET);
            } else {
                let _ = writeln!(w, "  × {d}");
            }
        }

        if let Some(s) = suggestion {
            if self.use_colors {
                let _ = writeln!(w, "  {}help:{} {s}", ansi::CYAN, ansi::RESET);
            } else {
                let _ = writeln!(w, "  help: {s}");
            }
        }
    }
}

impl Default for ErrorOutput {
    fn default() -> Self {
        Self::stderr()
    }
}

#[cfg(test)]
#[path = "error_output_tests.rs"]
mod tests;
