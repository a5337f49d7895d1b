//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use anyhow::Result;
use console::Term;
use console::style;
use junpack_core::InstallReport;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_install_result(&self, report: &InstallReport) -> Result<()> {
        if self.quiet {
            // Emit just the root path for pipeline consumption.
            let _ = self.term.write_line(&report.jdk_root.display().to_string());
            return Ok(());
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} JDK installed", style("✓").green().bold()));
        } else {
            let _ = self.term.write_line("JDK installed");
        }

        let _ = self
            .term
            .write_line(&format!("  Root: {}", report.jdk_root.display()));
        let _ = self.term.write_line(&format!(
            "  Packs converted: {}",
            report.packs_converted
        ));

        if self.verbose {
            let _ = self
                .term
                .write_line(&format!("  Duration: {:?}", report.duration));
        }

        for warning in &report.warnings {
            self.format_warning(warning);
        }

        Ok(())
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }
        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("warning:").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("warning: {message}"));
        }
    }
}
