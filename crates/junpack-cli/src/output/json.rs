//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use anyhow::Result;
use junpack_core::InstallReport;
use serde::Serialize;
use std::io::Write;
use std::io::{self};

pub struct JsonFormatter;

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_install_result(&self, report: &InstallReport) -> Result<()> {
        #[derive(Serialize)]
        struct InstallOutput {
            jdk_root: String,
            packs_converted: usize,
            duration_ms: u128,
            warnings: Vec<String>,
        }

        let data = InstallOutput {
            jdk_root: report.jdk_root.display().to_string(),
            packs_converted: report.packs_converted,
            duration_ms: report.duration.as_millis(),
            warnings: report.warnings.clone(),
        };

        let output = JsonOutput::success("install", data);
        Self::output(&output)
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        let output = JsonOutput::success(
            "warning",
            WarningData {
                message: message.to_string(),
            },
        );
        let _ = Self::output(&output);
    }
}
