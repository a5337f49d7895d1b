//! Installation result reporting.

use std::path::PathBuf;
use std::time::Duration;

/// Report of one JDK installation run.
#[derive(Debug, Clone, Default)]
pub struct InstallReport {
    /// Detected root directory of the extracted JDK.
    pub jdk_root: PathBuf,

    /// Number of `.pack` files converted to `.jar`.
    pub packs_converted: usize,

    /// Duration of the whole operation.
    pub duration: Duration,

    /// Non-fatal events, e.g. a staging directory that could not be
    /// removed.
    pub warnings: Vec<String>,
}

impl InstallReport {
    /// Creates a new empty report.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a warning message to the report.
    pub fn add_warning(&mut self, message: String) {
        self.warnings.push(message);
    }

    /// Returns whether any warnings were generated.
    #[must_use]
    pub fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}
