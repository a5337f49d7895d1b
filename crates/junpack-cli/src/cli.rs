//! CLI argument parsing using clap.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "junpack")]
#[command(author, version, about = "Installs a downloaded JDK archive into a destination directory", long_about = None)]
pub struct Cli {
    /// Path to the downloaded JDK archive
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Destination directory (created if absent)
    #[arg(value_name = "DESTINATION")]
    pub destination: PathBuf,

    /// Expected archive suffix, e.g. ".tar.gz" (default: derived from the
    /// archive file name)
    #[arg(long, value_name = "SUFFIX")]
    pub file_ending: Option<String>,

    /// Path to the 7-zip-style tool binary (default: looked up on PATH)
    #[arg(long, value_name = "PATH")]
    pub seven_zip: Option<PathBuf>,

    /// Per-tool-invocation timeout in seconds (default: no timeout)
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    pub tool_timeout: Option<u64>,

    /// Skip converting .pack files to .jar after extraction
    #[arg(long)]
    pub skip_jars: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long)]
    pub json: bool,
}

/// Derives the default suffix hint from the archive file name.
///
/// Tar-family suffixes are matched longest-first so "jdk.tar.gz" yields
/// ".tar.gz" rather than ".gz"; anything else falls back to the last
/// extension.
pub fn default_file_ending(file_name: &str) -> String {
    let lower = file_name.to_ascii_lowercase();
    let mut suffixes: Vec<&str> = junpack_core::TAR_SUFFIXES.to_vec();
    suffixes.sort_by_key(|s| std::cmp::Reverse(s.len()));
    for suffix in suffixes {
        if lower.ends_with(suffix) {
            return suffix.to_string();
        }
    }
    lower
        .rfind('.')
        .map_or_else(String::new, |idx| lower[idx..].to_string())
}
