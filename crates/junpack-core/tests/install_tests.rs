//! End-to-end installation tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::cell::RefCell;
use std::ffi::OsString;
use std::fs;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::time::Duration;

use junpack_core::InstallError;
use junpack_core::InstallOptions;
use junpack_core::InstallRequest;
use junpack_core::NativeToolStrategy;
use junpack_core::RestrictedToolStrategy;
use junpack_core::SystemRunner;
use junpack_core::ToolOutput;
use junpack_core::ToolRunner;
use junpack_core::install_jdk_with;
use junpack_core::test_utils::create_test_tar;
use junpack_core::test_utils::gzip_bytes;
use tempfile::TempDir;

/// Fake 7z performing real single-layer extraction (gzip or tar).
struct FakeSevenZip;

impl ToolRunner for FakeSevenZip {
    fn run(
        &self,
        _program: &Path,
        args: &[OsString],
        _timeout: Option<Duration>,
    ) -> junpack_core::Result<ToolOutput> {
        let dest = PathBuf::from(args[1].to_str().unwrap().strip_prefix("-o").unwrap());
        let archive = PathBuf::from(&args[3]);
        fs::create_dir_all(&dest).unwrap();

        let name = archive.file_name().unwrap().to_str().unwrap();
        if let Some(stem) = name.strip_suffix(".gz") {
            let mut decoder = flate2::read::GzDecoder::new(fs::File::open(&archive).unwrap());
            let mut inner = Vec::new();
            decoder.read_to_end(&mut inner).unwrap();
            fs::write(dest.join(stem), inner).unwrap();
        } else {
            let mut ar = tar::Archive::new(fs::File::open(&archive).unwrap());
            ar.unpack(&dest).unwrap();
        }
        Ok(ToolOutput {
            code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}

/// Fake unpack200 that writes the requested jar.
struct FakeUnpacker {
    calls: RefCell<usize>,
}

impl ToolRunner for FakeUnpacker {
    fn run(
        &self,
        _program: &Path,
        args: &[OsString],
        _timeout: Option<Duration>,
    ) -> junpack_core::Result<ToolOutput> {
        *self.calls.borrow_mut() += 1;
        let jar = PathBuf::from(args[args.len() - 1].clone());
        fs::write(jar, b"jar").unwrap();
        Ok(ToolOutput {
            code: Some(0),
            stdout: String::new(),
            stderr: String::new(),
        })
    }
}

fn write_jdk_tar_gz(dir: &Path, name: &str, root: &str) -> PathBuf {
    let release = format!("{root}/release");
    let java = format!("{root}/bin/java");
    let tar_data = create_test_tar(vec![
        (release.as_str(), b"JAVA_VERSION=11.0.2".as_slice()),
        (java.as_str(), b"\x7fELF".as_slice()),
    ]);
    let archive = dir.join(name);
    fs::write(&archive, gzip_bytes(&tar_data)).unwrap();
    archive
}

#[test]
fn test_native_end_to_end_returns_jdk_root() {
    let temp = TempDir::new().unwrap();
    let archive = write_jdk_tar_gz(temp.path(), "jdk-11.0.2.tar.gz", "jdk-11.0.2");
    let dest = temp.path().join("jdks");

    let strategy = NativeToolStrategy::new(SystemRunner, None, None);
    let request = InstallRequest::new(&archive, ".tar.gz", &dest);
    let report =
        install_jdk_with(&strategy, &SystemRunner, &request, &InstallOptions::default()).unwrap();

    assert_eq!(report.jdk_root, dest.join("jdk-11.0.2"));
    assert_eq!(report.packs_converted, 0);
    assert!(dest.join("jdk-11.0.2/bin/java").exists());
    assert!(!report.has_warnings());
}

#[test]
fn test_native_root_detection_ignores_preexisting_directories() {
    let temp = TempDir::new().unwrap();
    let archive = write_jdk_tar_gz(temp.path(), "jdk-17.tar.gz", "jdk-17");
    let dest = temp.path().join("jdks");
    fs::create_dir_all(dest.join("old")).unwrap();

    let strategy = NativeToolStrategy::new(SystemRunner, None, None);
    let request = InstallRequest::new(&archive, ".tar.gz", &dest);
    let report =
        install_jdk_with(&strategy, &SystemRunner, &request, &InstallOptions::default()).unwrap();

    assert_eq!(report.jdk_root, dest.join("jdk-17"));
}

#[test]
fn test_native_flat_archive_is_ambiguous() {
    let temp = TempDir::new().unwrap();
    // No directory entries at the top level at all.
    let tar_data = create_test_tar(vec![("README", b"flat".as_slice())]);
    let archive = temp.path().join("flat.tar.gz");
    fs::write(&archive, gzip_bytes(&tar_data)).unwrap();

    let strategy = NativeToolStrategy::new(SystemRunner, None, None);
    let request = InstallRequest::new(&archive, ".tar.gz", temp.path().join("jdks"));
    let result =
        install_jdk_with(&strategy, &SystemRunner, &request, &InstallOptions::default());

    assert!(matches!(result, Err(InstallError::AmbiguousRoot { .. })));
}

#[test]
fn test_restricted_end_to_end_two_pass() {
    let temp = TempDir::new().unwrap();
    let archive = write_jdk_tar_gz(temp.path(), "jdk-11.0.2.tar.gz", "jdk-11.0.2");
    let dest = temp.path().join("jdks");

    let strategy = RestrictedToolStrategy::new(FakeSevenZip, PathBuf::from("7z.exe"), None);
    let request = InstallRequest::new(&archive, ".tar.gz", &dest);
    let report =
        install_jdk_with(&strategy, &SystemRunner, &request, &InstallOptions::default()).unwrap();

    assert_eq!(report.jdk_root, dest.join("jdk-11.0.2"));
    assert!(dest.join("jdk-11.0.2/bin/java").exists());
    // Staging gone, so root detection saw exactly one new directory.
    assert!(!dest.join("_jdk-11.0.2.tar.gz_").exists());
}

#[test]
fn test_pack_files_are_converted_after_extraction() {
    let temp = TempDir::new().unwrap();
    let tar_data = create_test_tar(vec![
        ("jdk-8u202/release", b"JAVA_VERSION=1.8.0_202".as_slice()),
        ("jdk-8u202/jre/lib/rt.pack", b"pack".as_slice()),
        ("jdk-8u202/lib/tools.pack", b"pack".as_slice()),
    ]);
    let archive = temp.path().join("jdk-8u202.tar.gz");
    fs::write(&archive, gzip_bytes(&tar_data)).unwrap();
    let dest = temp.path().join("jdks");

    let strategy = NativeToolStrategy::new(SystemRunner, None, None);
    let unpacker = FakeUnpacker {
        calls: RefCell::new(0),
    };
    let request = InstallRequest::new(&archive, ".tar.gz", &dest);
    let report =
        install_jdk_with(&strategy, &unpacker, &request, &InstallOptions::default()).unwrap();

    assert_eq!(report.packs_converted, 2);
    assert_eq!(*unpacker.calls.borrow(), 2);
    assert!(dest.join("jdk-8u202/jre/lib/rt.jar").exists());
    assert!(dest.join("jdk-8u202/lib/tools.jar").exists());
    assert!(dest.join("jdk-8u202/jre/lib/rt.pack").exists());
}

#[test]
fn test_skip_jars_leaves_pack_files_alone() {
    let temp = TempDir::new().unwrap();
    let tar_data = create_test_tar(vec![(
        "jdk-8u202/jre/lib/rt.pack",
        b"pack".as_slice(),
    )]);
    let archive = temp.path().join("jdk-8u202.tar.gz");
    fs::write(&archive, gzip_bytes(&tar_data)).unwrap();
    let dest = temp.path().join("jdks");

    let strategy = NativeToolStrategy::new(SystemRunner, None, None);
    let options = InstallOptions {
        unpack_jars: false,
        ..Default::default()
    };
    let request = InstallRequest::new(&archive, ".tar.gz", &dest);
    let report = install_jdk_with(&strategy, &SystemRunner, &request, &options).unwrap();

    assert_eq!(report.packs_converted, 0);
    assert!(!dest.join("jdk-8u202/jre/lib/rt.jar").exists());
}
