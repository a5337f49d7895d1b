//! Platform extraction strategies.
//!
//! The two platform families differ in what is guaranteed to be available:
//! POSIX hosts can unpack tar/gzip/zip natively, while on Windows only a
//! bundled 7-zip-style tool can be relied on. Instead of branching on the
//! platform at every call site, one [`ExtractionStrategy`] is selected at
//! startup and used for the whole run.

mod native;
mod restricted;

pub use native::NativeToolStrategy;
pub use restricted::RestrictedToolStrategy;

use std::ffi::OsString;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::InstallError;
use crate::Result;
use crate::report::InstallReport;
use crate::tool::SystemRunner;
use crate::tool::ToolRunner;
use crate::tool::locate_tool;

/// Name of the 7-zip-style tool on the search path.
pub const SEVEN_ZIP_TOOL: &str = "7z";

/// One way of turning an archive into files under a destination directory.
pub trait ExtractionStrategy {
    /// Extracts `archive` into `dest`.
    ///
    /// `file_ending` is the caller's declared suffix hint (e.g. ".tar.gz");
    /// it drives dispatch together with the archive's actual file name.
    /// Non-fatal events are recorded on `report`.
    ///
    /// # Errors
    ///
    /// Any tool failure is fatal: non-zero exits surface as
    /// [`InstallError::ToolFailed`], never as a silent success.
    fn extract(
        &self,
        archive: &Path,
        file_ending: &str,
        dest: &Path,
        report: &mut InstallReport,
    ) -> Result<()>;

    /// Strategy name, for diagnostics.
    fn name(&self) -> &'static str;
}

/// Selects the extraction strategy for the host platform.
///
/// `seven_zip` overrides the 7-zip-style tool location; without it the
/// tool is looked up on the search path (eagerly on the restricted
/// platform, where every format goes through it).
///
/// # Errors
///
/// Fails with [`InstallError::ToolNotFound`] on the restricted platform if
/// no 7-zip-style tool can be located.
pub fn select_strategy(
    seven_zip: Option<PathBuf>,
    timeout: Option<Duration>,
) -> Result<Box<dyn ExtractionStrategy>> {
    if cfg!(windows) {
        let tool = match seven_zip {
            Some(path) => path,
            None => locate_tool(SEVEN_ZIP_TOOL)?,
        };
        Ok(Box::new(RestrictedToolStrategy::new(
            SystemRunner,
            tool,
            timeout,
        )))
    } else {
        Ok(Box::new(NativeToolStrategy::new(
            SystemRunner,
            seven_zip,
            timeout,
        )))
    }
}

/// Builds the `7z x -o<dest> -y <archive>` argument list.
fn seven_zip_args(archive: &Path, dest: &Path) -> Vec<OsString> {
    let mut output_flag = OsString::from("-o");
    output_flag.push(dest.as_os_str());
    vec![
        OsString::from("x"),
        output_flag,
        OsString::from("-y"),
        archive.as_os_str().to_os_string(),
    ]
}

/// Runs one `7z x` pass, turning a non-zero exit into a hard error.
fn run_seven_zip<R: ToolRunner>(
    runner: &R,
    tool: &Path,
    archive: &Path,
    dest: &Path,
    timeout: Option<Duration>,
) -> Result<()> {
    let output = runner.run(tool, &seven_zip_args(archive, dest), timeout)?;
    if output.success() {
        Ok(())
    } else {
        Err(InstallError::ToolFailed {
            tool: tool.display().to_string(),
            code: output.code,
            stderr: output.stderr.trim().to_string(),
        })
    }
}
