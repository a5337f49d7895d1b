//! Installation orchestration.
//!
//! Ties the pieces together: precondition checks, strategy extraction,
//! root detection via directory snapshots, and pack conversion.

use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use std::time::Instant;

use crate::InstallError;
use crate::Result;
use crate::pack;
use crate::report::InstallReport;
use crate::snapshot::DirectorySnapshot;
use crate::strategy::ExtractionStrategy;
use crate::strategy::select_strategy;
use crate::tool::SystemRunner;
use crate::tool::ToolRunner;

/// One JDK archive to install.
#[derive(Debug, Clone)]
pub struct InstallRequest {
    /// Path to the downloaded archive file.
    pub archive_path: PathBuf,
    /// Declared suffix hint, e.g. ".tar.gz" or ".zip".
    pub file_ending: String,
    /// Destination directory; created if absent.
    pub destination: PathBuf,
}

impl InstallRequest {
    /// Creates a request.
    pub fn new(
        archive_path: impl Into<PathBuf>,
        file_ending: impl Into<String>,
        destination: impl Into<PathBuf>,
    ) -> Self {
        Self {
            archive_path: archive_path.into(),
            file_ending: file_ending.into(),
            destination: destination.into(),
        }
    }
}

/// Run configuration for one installation.
#[derive(Debug, Clone)]
pub struct InstallOptions {
    /// Deadline for each external tool invocation; `None` waits forever.
    pub tool_timeout: Option<Duration>,
    /// Convert `.pack` files under the extracted root to `.jar`.
    pub unpack_jars: bool,
    /// Explicit location of the 7-zip-style tool, overriding path lookup.
    pub seven_zip: Option<PathBuf>,
}

impl Default for InstallOptions {
    fn default() -> Self {
        Self {
            tool_timeout: None,
            unpack_jars: true,
            seven_zip: None,
        }
    }
}

/// Installs a JDK archive and returns the detected JDK root.
///
/// Extracts the archive into the destination using the platform's
/// strategy, infers the newly created root directory by diffing directory
/// snapshots, then converts any `.pack` files under it.
///
/// # Errors
///
/// Precondition failures ([`InstallError::SourceNotFound`],
/// [`InstallError::SourceIsDirectory`]) are raised before any side effect.
/// Extraction tool failures, ambiguous root detection and pack conversion
/// failures all abort the operation.
///
/// # Examples
///
/// ```no_run
/// use junpack_core::InstallOptions;
/// use junpack_core::InstallRequest;
/// use junpack_core::install_jdk;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let request = InstallRequest::new("jdk-11.0.2.tar.gz", ".tar.gz", "/opt/jdks");
/// let report = install_jdk(&request, &InstallOptions::default())?;
/// println!("JDK root: {}", report.jdk_root.display());
/// # Ok(())
/// # }
/// ```
pub fn install_jdk(request: &InstallRequest, options: &InstallOptions) -> Result<InstallReport> {
    // Preconditions come before strategy selection so a bad request is
    // reported even when the platform tool is missing.
    check_preconditions(request)?;
    let strategy = select_strategy(options.seven_zip.clone(), options.tool_timeout)?;
    install_jdk_with(strategy.as_ref(), &SystemRunner, request, options)
}

/// [`install_jdk`] with explicit strategy and tool runner.
///
/// This is the seam used by tests and by callers that manage their own
/// strategy selection.
pub fn install_jdk_with<R: ToolRunner>(
    strategy: &dyn ExtractionStrategy,
    runner: &R,
    request: &InstallRequest,
    options: &InstallOptions,
) -> Result<InstallReport> {
    let started = Instant::now();

    check_preconditions(request)?;

    fs::create_dir_all(&request.destination)?;

    let before = DirectorySnapshot::capture(&request.destination)?;

    let mut report = InstallReport::new();
    strategy.extract(
        &request.archive_path,
        &request.file_ending,
        &request.destination,
        &mut report,
    )?;

    let after = DirectorySnapshot::capture(&request.destination)?;
    let root = after.new_root_since(&before)?;

    if options.unpack_jars {
        report.packs_converted =
            pack::unpack_jars(&root, &root.join("bin"), runner, options.tool_timeout)?;
    }

    report.jdk_root = root;
    report.duration = started.elapsed();
    Ok(report)
}

/// Validates the request before any side effect on the destination.
fn check_preconditions(request: &InstallRequest) -> Result<()> {
    if !request.archive_path.exists() {
        return Err(InstallError::SourceNotFound {
            path: request.archive_path.clone(),
        });
    }
    if request.archive_path.is_dir() {
        return Err(InstallError::SourceIsDirectory {
            path: request.archive_path.clone(),
        });
    }
    Ok(())
}
