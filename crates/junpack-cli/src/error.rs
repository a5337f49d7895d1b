//! Error conversion utilities for CLI.
//!
//! Converts junpack-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::Result;
use anyhow::anyhow;
use junpack_core::InstallError;
use std::path::Path;

/// Converts `InstallError` to user-friendly anyhow error with context
pub fn convert_install_error(err: InstallError, archive: &Path) -> anyhow::Error {
    match err {
        InstallError::SourceNotFound { path } => {
            anyhow!(
                "Archive not found: {}\n\
                 HINT: Check that the download step completed and the path is correct.",
                path.display()
            )
        }
        InstallError::SourceIsDirectory { path } => {
            anyhow!(
                "Expected an archive file but found a directory: {}\n\
                 HINT: Pass the downloaded archive file, not its containing folder.",
                path.display()
            )
        }
        InstallError::ToolNotFound { tool } => {
            anyhow!(
                "Required tool not found: {tool}\n\
                 HINT: Install it or point at it with --seven-zip."
            )
        }
        InstallError::ToolFailed { tool, code, stderr } => {
            anyhow!(
                "Extraction tool '{tool}' failed (exit code {code:?}) while processing '{}':\n{stderr}\n\
                 HINT: The archive may be corrupted; re-download and retry.",
                archive.display()
            )
        }
        InstallError::ToolTimeout { tool, limit } => {
            anyhow!(
                "Tool '{tool}' timed out after {}s\n\
                 HINT: Raise --tool-timeout or remove it to wait indefinitely.",
                limit.as_secs()
            )
        }
        InstallError::StagingAmbiguous { staging, entries } => {
            anyhow!(
                "First extraction pass of '{}' produced {entries} entries in {} (expected exactly 1)\n\
                 HINT: The archive layout is unusual; extract it manually to inspect.",
                archive.display(),
                staging.display()
            )
        }
        InstallError::AmbiguousRoot { candidates } => {
            anyhow!(
                "Cannot determine the extracted JDK root for '{}': {} new top-level directories\n\
                 HINT: JDK archives are expected to contain exactly one top-level directory.",
                archive.display(),
                candidates.len()
            )
        }
        InstallError::PackConversion { path, detail } => {
            anyhow!(
                "pack200 conversion failed for {}: {detail}\n\
                 HINT: The JDK is unusable without its jars; provisioning was aborted.",
                path.display()
            )
        }
        InstallError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {reason}\n\
                 HINT: The archive may be corrupted or mislabeled; check --file-ending.",
                archive.display()
            )
        }
        InstallError::Io(io_err) => {
            anyhow!(
                "I/O error while processing '{}': {io_err}",
                archive.display()
            )
        }
    }
}

/// Adds context to a core result about archive installation
pub fn add_install_context<T>(
    result: Result<T, InstallError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_install_error(e, archive))
}
