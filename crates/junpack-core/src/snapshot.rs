//! Destination directory snapshots and JDK root detection.
//!
//! Archives name their own top-level directory (`jdk-11.0.2/`, ...), and
//! extraction tools do not report it. The root is inferred by diffing the
//! set of directories under the destination before and after extraction.
//! The diff is only reliable while no other writer touches the destination
//! between the two snapshots.

use std::collections::BTreeSet;
use std::io;
use std::path::Path;
use std::path::PathBuf;

use walkdir::WalkDir;

use crate::InstallError;
use crate::Result;

/// Ordered set of all directories under a destination at one point in time.
#[derive(Debug, Clone, Default)]
pub struct DirectorySnapshot {
    dirs: BTreeSet<PathBuf>,
}

impl DirectorySnapshot {
    /// Captures all directories under `root`, recursively.
    ///
    /// `root` itself is not part of the snapshot. A missing `root` yields
    /// an empty snapshot so that a "before" capture can precede the
    /// destination's creation.
    pub fn capture(root: &Path) -> Result<Self> {
        let mut dirs = BTreeSet::new();
        if !root.exists() {
            return Ok(Self { dirs });
        }
        for entry in WalkDir::new(root).min_depth(1) {
            let entry = entry.map_err(io::Error::from)?;
            if entry.file_type().is_dir() {
                dirs.insert(entry.into_path());
            }
        }
        Ok(Self { dirs })
    }

    /// Number of directories in the snapshot.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dirs.len()
    }

    /// Returns `true` if the snapshot holds no directories.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dirs.is_empty()
    }

    /// Returns the directories present in `self` but not in `before`.
    #[must_use]
    pub fn new_since(&self, before: &Self) -> Vec<PathBuf> {
        self.dirs.difference(&before.dirs).cloned().collect()
    }

    /// Determines the single new top-level directory created since
    /// `before` — the extracted JDK root.
    ///
    /// New directories are reduced to those whose parent is not itself
    /// new; exactly one must remain.
    ///
    /// # Errors
    ///
    /// Fails with [`InstallError::AmbiguousRoot`] if extraction created
    /// zero or multiple new top-level directories (e.g. a flat archive, or
    /// leftover staging that could not be removed).
    pub fn new_root_since(&self, before: &Self) -> Result<PathBuf> {
        let new_dirs: BTreeSet<PathBuf> = self.dirs.difference(&before.dirs).cloned().collect();
        let mut candidates: Vec<PathBuf> = new_dirs
            .iter()
            .filter(|dir| {
                dir.parent()
                    .is_none_or(|parent| !new_dirs.contains(parent))
            })
            .cloned()
            .collect();

        if candidates.len() == 1 {
            // Reduction above guarantees exactly one element.
            return Ok(candidates.remove(0));
        }
        Err(InstallError::AmbiguousRoot { candidates })
    }
}
