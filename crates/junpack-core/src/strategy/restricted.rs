//! Extraction via the bundled 7-zip-style tool only.

use std::fs;
use std::io;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use crate::InstallError;
use crate::Result;
use crate::formats::is_tar_archive;
use crate::report::InstallReport;
use crate::tool::ToolRunner;

use super::ExtractionStrategy;
use super::run_seven_zip;

/// Strategy for platforms where only a 7-zip-style tool is guaranteed
/// (Windows).
///
/// The tool decompresses one layer per invocation, so compressed tar
/// archives need two passes: outer layer into a staging directory, inner
/// tar into the final destination.
pub struct RestrictedToolStrategy<R: ToolRunner> {
    runner: R,
    seven_zip: PathBuf,
    timeout: Option<Duration>,
}

impl<R: ToolRunner> RestrictedToolStrategy<R> {
    /// Creates a strategy using `seven_zip` as the resolved tool binary.
    pub fn new(runner: R, seven_zip: PathBuf, timeout: Option<Duration>) -> Self {
        Self {
            runner,
            seven_zip,
            timeout,
        }
    }

    fn seven_zip_extract(&self, archive: &Path, dest: &Path) -> Result<()> {
        run_seven_zip(&self.runner, &self.seven_zip, archive, dest, self.timeout)
    }

    /// Two-pass extraction for a compressed tar archive.
    ///
    /// The staging directory name is derived from the archive file name so
    /// that sibling extractions of differently named archives cannot
    /// collide. Staging is removed unconditionally afterwards; a removal
    /// failure is recorded as a warning, not an error.
    fn extract_two_pass(
        &self,
        archive: &Path,
        file_name: &str,
        dest: &Path,
        report: &mut InstallReport,
    ) -> Result<()> {
        let staging = dest.join(format!("_{file_name}_"));
        fs::create_dir_all(&staging)?;

        let result = self.run_two_pass(archive, &staging, dest);

        if let Err(err) = fs::remove_dir_all(&staging) {
            report.add_warning(format!(
                "failed to remove staging directory {}: {err}",
                staging.display()
            ));
        }
        result
    }

    fn run_two_pass(&self, archive: &Path, staging: &Path, dest: &Path) -> Result<()> {
        self.seven_zip_extract(archive, staging)?;

        // The outer pass must yield exactly the decompressed inner tar.
        let mut entries = fs::read_dir(staging)?.collect::<io::Result<Vec<_>>>()?;
        if entries.len() != 1 {
            return Err(InstallError::StagingAmbiguous {
                staging: staging.to_path_buf(),
                entries: entries.len(),
            });
        }
        let inner = entries.remove(0).path();

        self.seven_zip_extract(&inner, dest)
    }
}

impl<R: ToolRunner> ExtractionStrategy for RestrictedToolStrategy<R> {
    fn extract(
        &self,
        archive: &Path,
        file_ending: &str,
        dest: &Path,
        report: &mut InstallReport,
    ) -> Result<()> {
        let file_name = archive
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or_default();

        if file_ending.eq_ignore_ascii_case(".tar") {
            self.seven_zip_extract(archive, dest)
        } else if is_tar_archive(file_name) {
            self.extract_two_pass(archive, file_name, dest, report)
        } else {
            // zip, 7z and anything else the tool understands directly.
            self.seven_zip_extract(archive, dest)
        }
    }

    fn name(&self) -> &'static str {
        "restricted-tool"
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_tar;
    use crate::test_utils::gzip_bytes;
    use crate::tool::ToolOutput;
    use std::cell::RefCell;
    use std::ffi::OsString;
    use std::io::Read;
    use tempfile::TempDir;

    /// Fake 7z: performs real single-layer extraction so the two-pass flow
    /// can be exercised end to end without the binary.
    struct FakeSevenZip {
        calls: RefCell<usize>,
    }

    impl FakeSevenZip {
        fn new() -> Self {
            Self {
                calls: RefCell::new(0),
            }
        }

        fn extract_one_layer(archive: &Path, dest: &Path) {
            fs::create_dir_all(dest).unwrap();
            let name = archive.file_name().unwrap().to_str().unwrap();
            if let Some(stem) = name.strip_suffix(".gz") {
                // Decompress the gzip layer only, like 7z does.
                let mut decoder =
                    flate2::read::GzDecoder::new(fs::File::open(archive).unwrap());
                let mut inner = Vec::new();
                decoder.read_to_end(&mut inner).unwrap();
                fs::write(dest.join(stem), inner).unwrap();
            } else if name.ends_with(".tar") {
                let mut ar = tar::Archive::new(fs::File::open(archive).unwrap());
                ar.unpack(dest).unwrap();
            } else {
                panic!("fake 7z got unexpected archive {name}");
            }
        }
    }

    impl ToolRunner for FakeSevenZip {
        fn run(
            &self,
            _program: &Path,
            args: &[OsString],
            _timeout: Option<Duration>,
        ) -> Result<ToolOutput> {
            *self.calls.borrow_mut() += 1;
            assert_eq!(args[0], OsString::from("x"));
            let dest = PathBuf::from(
                args[1].to_str().unwrap().strip_prefix("-o").unwrap(),
            );
            let archive = PathBuf::from(&args[3]);
            Self::extract_one_layer(&archive, &dest);
            Ok(ToolOutput {
                code: Some(0),
                stdout: String::new(),
                stderr: String::new(),
            })
        }
    }

    /// Fake 7z that always fails.
    struct BrokenSevenZip;

    impl ToolRunner for BrokenSevenZip {
        fn run(
            &self,
            _program: &Path,
            _args: &[OsString],
            _timeout: Option<Duration>,
        ) -> Result<ToolOutput> {
            Ok(ToolOutput {
                code: Some(2),
                stdout: String::new(),
                stderr: "cannot open archive".to_string(),
            })
        }
    }

    fn write_tar_gz_fixture(dir: &Path) -> PathBuf {
        let tar_data = create_test_tar(vec![
            ("jdk-11.0.2/release", b"JAVA_VERSION=11.0.2"),
            ("jdk-11.0.2/bin/java", b"\x7fELF"),
        ]);
        let archive = dir.join("jdk-11.0.2.tar.gz");
        fs::write(&archive, gzip_bytes(&tar_data)).unwrap();
        archive
    }

    #[test]
    fn test_two_pass_extracts_and_removes_staging() {
        let temp = TempDir::new().unwrap();
        let archive = write_tar_gz_fixture(temp.path());
        let dest = temp.path().join("jdks");
        fs::create_dir(&dest).unwrap();

        let strategy =
            RestrictedToolStrategy::new(FakeSevenZip::new(), PathBuf::from("7z.exe"), None);
        let mut report = InstallReport::new();
        strategy
            .extract(&archive, ".tar.gz", &dest, &mut report)
            .unwrap();

        assert!(dest.join("jdk-11.0.2/release").exists());
        assert!(dest.join("jdk-11.0.2/bin/java").exists());
        assert!(!dest.join("_jdk-11.0.2.tar.gz_").exists());
        assert!(!report.has_warnings());
        assert_eq!(*strategy.runner.calls.borrow(), 2);
    }

    #[test]
    fn test_plain_tar_hint_is_single_pass() {
        let temp = TempDir::new().unwrap();
        let tar_data = create_test_tar(vec![("jdk-17/release", b"JAVA_VERSION=17")]);
        let archive = temp.path().join("jdk-17.tar");
        fs::write(&archive, tar_data).unwrap();
        let dest = temp.path().join("jdks");

        let strategy =
            RestrictedToolStrategy::new(FakeSevenZip::new(), PathBuf::from("7z.exe"), None);
        let mut report = InstallReport::new();
        strategy
            .extract(&archive, ".tar", &dest, &mut report)
            .unwrap();

        assert!(dest.join("jdk-17/release").exists());
        assert_eq!(*strategy.runner.calls.borrow(), 1);
    }

    #[test]
    fn test_tool_failure_is_hard_error() {
        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("jdk.zip");
        fs::write(&archive, b"zip").unwrap();

        let strategy =
            RestrictedToolStrategy::new(BrokenSevenZip, PathBuf::from("7z.exe"), None);
        let mut report = InstallReport::new();
        let result = strategy.extract(&archive, ".zip", temp.path(), &mut report);

        match result {
            Err(InstallError::ToolFailed { code, stderr, .. }) => {
                assert_eq!(code, Some(2));
                assert!(stderr.contains("cannot open archive"));
            }
            other => panic!("expected ToolFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_staging_with_multiple_entries_is_ambiguous() {
        /// Fake whose first pass drops two files into staging.
        struct NoisySevenZip;

        impl ToolRunner for NoisySevenZip {
            fn run(
                &self,
                _program: &Path,
                args: &[OsString],
                _timeout: Option<Duration>,
            ) -> Result<ToolOutput> {
                let dest = PathBuf::from(
                    args[1].to_str().unwrap().strip_prefix("-o").unwrap(),
                );
                fs::create_dir_all(&dest).unwrap();
                fs::write(dest.join("one.tar"), b"x").unwrap();
                fs::write(dest.join("two.tar"), b"x").unwrap();
                Ok(ToolOutput {
                    code: Some(0),
                    stdout: String::new(),
                    stderr: String::new(),
                })
            }
        }

        let temp = TempDir::new().unwrap();
        let archive = temp.path().join("jdk.tar.gz");
        fs::write(&archive, b"gz").unwrap();
        let dest = temp.path().join("jdks");
        fs::create_dir(&dest).unwrap();

        let strategy = RestrictedToolStrategy::new(NoisySevenZip, PathBuf::from("7z.exe"), None);
        let mut report = InstallReport::new();
        let result = strategy.extract(&archive, ".tar.gz", &dest, &mut report);

        match result {
            Err(InstallError::StagingAmbiguous { entries, .. }) => assert_eq!(entries, 2),
            other => panic!("expected StagingAmbiguous, got {other:?}"),
        }
        // Staging is cleaned up even on failure.
        assert!(!dest.join("_jdk.tar.gz_").exists());
    }
}
