//! Terminal styling helpers
//!
//! Output goes through `anstream`, which strips the ANSI codes when stdout is
//! not a terminal.

use indicatif::ProgressStyle;
use owo_colors::{Style, Styled};
use std::fmt::Display;

/// Check mark used in success lines
pub const CHECK: &str = "✓";

/// Semantic styles for CLI output
pub trait Stylize: Display {
    /// De-emphasized text (hints, secondary info)
    fn muted(&self) -> Styled<&Self> {
        Style::new().dimmed().style(self)
    }

    /// Headings and key values
    fn emphasis(&self) -> Styled<&Self> {
        Style::new().bold().style(self)
    }

    /// Names and counts
    fn accent(&self) -> Styled<&Self> {
        Style::new().cyan().style(self)
    }

    /// Successful outcomes
    fn success(&self) -> Styled<&Self> {
        Style::new().green().style(self)
    }

    /// Problems the user should look at
    fn warn(&self) -> Styled<&Self> {
        Style::new().yellow().style(self)
    }
}

impl<T: Display + ?Sized> Stylize for T {}

/// Green check mark
pub fn check() -> Styled<&'static str> {
    Style::new().green().style(CHECK)
}

/// Spinner style shared by long-running steps
pub fn spinner_style() -> ProgressStyle {
    ProgressStyle::with_template("{spinner:.cyan} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
}
