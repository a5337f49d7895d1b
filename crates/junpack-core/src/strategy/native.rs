//! Extraction using the platform's native format support.

use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::Result;
use crate::formats::native;
use crate::report::InstallReport;
use crate::tool::ToolRunner;
use crate::tool::locate_tool;

use super::ExtractionStrategy;
use super::SEVEN_ZIP_TOOL;
use super::run_seven_zip;

/// Strategy for platforms with native tar/gzip/zip support (POSIX).
///
/// Tar, gzipped tar and zip archives are unpacked in-process; any other
/// format falls back to a 7-zip-style tool on the search path.
pub struct NativeToolStrategy<R: ToolRunner> {
    runner: R,
    seven_zip: Option<PathBuf>,
    timeout: Option<Duration>,
}

impl<R: ToolRunner> NativeToolStrategy<R> {
    /// Creates a strategy, optionally pinning the fallback tool location.
    pub fn new(runner: R, seven_zip: Option<PathBuf>, timeout: Option<Duration>) -> Self {
        Self {
            runner,
            seven_zip,
            timeout,
        }
    }

    fn seven_zip_fallback(&self, archive: &Path, dest: &Path) -> Result<()> {
        let tool = match &self.seven_zip {
            Some(path) => path.clone(),
            None => locate_tool(SEVEN_ZIP_TOOL)?,
        };
        run_seven_zip(&self.runner, &tool, archive, dest, self.timeout)
    }
}

impl<R: ToolRunner> ExtractionStrategy for NativeToolStrategy<R> {
    fn extract(
        &self,
        archive: &Path,
        file_ending: &str,
        dest: &Path,
        _report: &mut InstallReport,
    ) -> Result<()> {
        match file_ending.to_ascii_lowercase().as_str() {
            ".tar" => native::extract_tar(archive, dest),
            ".tar.gz" => native::extract_tar_gz(archive, dest),
            ".zip" => native::extract_zip(archive, dest),
            _ => self.seven_zip_fallback(archive, dest),
        }
    }

    fn name(&self) -> &'static str {
        "native-tool"
    }
}
