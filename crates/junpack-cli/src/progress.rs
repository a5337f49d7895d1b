//! Spinner for long-running extraction work.
//!
//! Extraction blocks on external tools or in-process decompression with no
//! meaningful progress granularity, so a spinner (not a bar) is shown on
//! TTYs.

use console::Term;
use indicatif::ProgressBar;
use indicatif::ProgressStyle;
use std::time::Duration;

/// TTY spinner that cleans up on drop.
pub struct CliSpinner {
    bar: ProgressBar,
}

impl CliSpinner {
    /// Creates and starts a spinner with the given message.
    #[must_use]
    pub fn new(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.cyan} {msg} ({elapsed})")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(100));
        Self { bar }
    }

    /// Checks if we should show a spinner (TTY detection).
    #[must_use]
    pub fn should_show() -> bool {
        Term::stdout().is_term()
    }

    /// Stops the spinner and clears its line.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }
}

impl Drop for CliSpinner {
    fn drop(&mut self) {
        self.bar.finish_and_clear();
    }
}
