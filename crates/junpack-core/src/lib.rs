//! JDK archive installation library.
//!
//! `junpack-core` extracts a downloaded JDK archive into a destination
//! directory, normalizing across archive formats (tar, compressed tar
//! variants, zip, 7z) and platforms (Windows vs POSIX), detects the newly
//! created JDK root directory, and converts any Java `.pack` files in the
//! extracted tree to `.jar` via the platform's pack200 tool.
//!
//! Decompression of formats the platform cannot handle natively is
//! delegated to a 7-zip-style external tool; this is not a general-purpose
//! archive library.
//!
//! # Examples
//!
//! ```no_run
//! use junpack_core::InstallOptions;
//! use junpack_core::InstallRequest;
//! use junpack_core::install_jdk;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let request = InstallRequest::new("jdk-11.0.2.tar.gz", ".tar.gz", "/opt/jdks");
//! let report = install_jdk(&request, &InstallOptions::default())?;
//! println!("JDK root: {}", report.jdk_root.display());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod formats;
pub mod install;
pub mod pack;
pub mod report;
pub mod snapshot;
pub mod strategy;
pub mod test_utils;
pub mod tool;

// Re-export main API types
pub use error::InstallError;
pub use error::Result;
pub use install::InstallOptions;
pub use install::InstallRequest;
pub use install::install_jdk;
pub use install::install_jdk_with;
pub use report::InstallReport;

// Re-export supporting types for easier access
pub use formats::ArchiveClass;
pub use formats::TAR_SUFFIXES;
pub use formats::is_tar_archive;
pub use snapshot::DirectorySnapshot;
pub use strategy::ExtractionStrategy;
pub use strategy::NativeToolStrategy;
pub use strategy::RestrictedToolStrategy;
pub use strategy::select_strategy;
pub use tool::SystemRunner;
pub use tool::ToolOutput;
pub use tool::ToolRunner;
