//! Archive format classification and native format handlers.

pub mod detect;
pub mod native;

pub use detect::ArchiveClass;
pub use detect::TAR_SUFFIXES;
pub use detect::classify;
pub use detect::is_tar_archive;
