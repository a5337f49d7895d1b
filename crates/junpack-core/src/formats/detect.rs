//! Archive format classification from file names.
//!
//! JDK distributions are published under a small, fixed set of archive
//! suffixes. Classification is purely name-based: the actual decompression
//! is delegated to format handlers or external tools, so sniffing magic
//! bytes buys nothing here.

/// Tar-family suffixes recognized by [`is_tar_archive`].
///
/// Covers plain tar plus every compressed-tar variant a JDK vendor is known
/// to ship (gzip, compress, bzip2, lzip, lzma, lzop, xz).
pub const TAR_SUFFIXES: [&str; 15] = [
    ".tar",
    ".tar.gz",
    ".tgz",
    ".taz",
    ".tar.z",
    ".tar.bz2",
    ".tz2",
    ".tbz2",
    ".tbz",
    ".tar.lz",
    ".tar.lzma",
    ".tlz",
    ".tar.lzo",
    ".tar.xz",
    ".txz",
];

/// Coarse archive classification used by the extraction strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveClass {
    /// Plain, uncompressed tar archive.
    Tar,
    /// Tar archive behind a compression layer (needs two passes on the
    /// restricted-tool platform).
    CompressedTar,
    /// ZIP archive.
    Zip,
    /// 7z archive.
    SevenZ,
    /// Anything else; handed to the 7-zip-style tool as-is.
    Other,
}

/// Returns `true` if the file name has a tar-family suffix.
///
/// Matching is case-insensitive and purely suffix-based.
///
/// # Examples
///
/// ```
/// use junpack_core::formats::is_tar_archive;
///
/// assert!(is_tar_archive("jdk-11.0.2.tar.gz"));
/// assert!(is_tar_archive("JDK-8U202.TGZ"));
/// assert!(!is_tar_archive("jdk-11.0.2.zip"));
/// ```
#[must_use]
pub fn is_tar_archive(file_name: &str) -> bool {
    let lower = file_name.to_ascii_lowercase();
    TAR_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix))
}

/// Classifies a file name into an [`ArchiveClass`].
#[must_use]
pub fn classify(file_name: &str) -> ArchiveClass {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".tar") {
        ArchiveClass::Tar
    } else if is_tar_archive(&lower) {
        ArchiveClass::CompressedTar
    } else if lower.ends_with(".zip") {
        ArchiveClass::Zip
    } else if lower.ends_with(".7z") {
        ArchiveClass::SevenZ
    } else {
        ArchiveClass::Other
    }
}
