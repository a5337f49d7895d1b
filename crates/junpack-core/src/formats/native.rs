//! In-process extraction for formats the host platform handles natively.
//!
//! On POSIX hosts plain tar, gzipped tar, and zip archives are unpacked
//! in-process rather than through the bundled 7-zip-style tool.

use std::fs::File;
use std::path::Path;

use flate2::read::GzDecoder;

use crate::Result;

/// Extracts a plain `.tar` archive into `dest`.
pub fn extract_tar(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)?;
    let mut ar = tar::Archive::new(file);
    ar.unpack(dest)?;
    Ok(())
}

/// Extracts a gzip-compressed `.tar.gz` / `.tgz` archive into `dest`.
pub fn extract_tar_gz(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)?;
    let mut ar = tar::Archive::new(GzDecoder::new(file));
    ar.unpack(dest)?;
    Ok(())
}

/// Extracts a `.zip` archive into `dest`.
pub fn extract_zip(archive: &Path, dest: &Path) -> Result<()> {
    let file = File::open(archive)?;
    let mut zip = zip::ZipArchive::new(file)?;
    zip.extract(dest)?;
    Ok(())
}
