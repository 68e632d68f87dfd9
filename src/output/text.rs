use std::fmt::Write;

use crate::error::Result;
use crate::verifier::Response;

use super::{ColorMode, OutputFormatter, ansi, distinct_roots};

pub struct TextFormatter {
    use_colors: bool,
    verbose: u8,
}

impl TextFormatter {
    #[must_use]
    pub fn new(mode: ColorMode) -> Self {
        Self::with_verbose(mode, 0)
    }

    /// With `verbose >= 1` each match also shows the anchor that found it.
    #[must_use]
    pub fn with_verbose(mode: ColorMode, verbose: u8) -> Self {
        let is_tty = std::io::IsTerminal::is_terminal(&std::io::stdout());
        Self {
            use_colors: mode.enabled(is_tty),
            verbose,
        }
    }

    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        format!("{color}{text}{}", ansi::RESET)
    }

    fn format_match(&self, response: &Response<'_>, output: &mut String) {
        let icon = self.colorize("✓", ansi::GREEN);
        let name = self.colorize(response.structure.name(), ansi::CYAN);
        let _ = writeln!(output, "{icon} {name} at {}", response.root.display());
        if self.verbose >= 1 {
            let _ = writeln!(output, "   Anchor: {}", response.anchor.display());
        }
    }

    fn format_summary(&self, matches: usize, roots: usize) -> String {
        if matches == 0 {
            return self.colorize("No structures detected", ansi::YELLOW);
        }
        let matches_str = self.colorize(&matches.to_string(), ansi::GREEN);
        format!("Summary: {matches_str} matches in {roots} directories")
    }
}

impl Default for TextFormatter {
    fn default() -> Self {
        Self::new(ColorMode::Auto)
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, matches: &[Response<'_>]) -> Result<String> {
        let mut output = String::new();

        for response in matches {
            self.format_match(response, &mut output);
        }
        if !matches.is_empty() {
            output.push('\n');
        }

        let summary = self.format_summary(matches.len(), distinct_roots(matches));
        let _ = writeln!(output, "{summary}");

        Ok(output)
    }
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
