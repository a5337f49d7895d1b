//! Conversion of Java `.pack` files to `.jar` via the pack200 tool.
//!
//! Older JDK distributions ship some jars in pack200 form. After
//! extraction the whole tree is walked and every `.pack` file is converted
//! to a sibling `.jar` with the same base name. The `.pack` file is left
//! in place. Unlike staging cleanup, any conversion failure is fatal: a
//! JDK with missing jars is unusable, so provisioning must abort.

use std::ffi::OsString;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::InstallError;
use crate::Result;
use crate::tool::ToolRunner;

/// Extra flags unpack200 requires on Windows.
const WINDOWS_UNPACK_FLAGS: [&str; 4] = ["-r", "-v", "-l", ""];

/// Name of the pack200 unpacker binary for this platform.
#[must_use]
pub fn unpack_tool_name() -> &'static str {
    if cfg!(windows) {
        "unpack200.exe"
    } else {
        "unpack200"
    }
}

/// Converts every `.pack` file under `root` to a sibling `.jar`.
///
/// The tree is walked with an explicit work queue, so archive depth never
/// translates into stack depth. Entry order is not significant; each
/// `.pack` file is independent. Returns the number of files converted.
///
/// # Errors
///
/// Fails with [`InstallError::PackConversion`] if the unpack tool exits
/// non-zero for any file; other tool errors (missing binary, timeout)
/// propagate unchanged.
pub fn unpack_jars<R: ToolRunner + ?Sized>(
    root: &Path,
    tool_bin: &Path,
    runner: &R,
    timeout: Option<Duration>,
) -> Result<usize> {
    let tool = tool_bin.join(unpack_tool_name());
    let mut converted = 0;
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        for entry in fs::read_dir(&dir)? {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_dir() {
                pending.push(path);
                continue;
            }
            if !is_pack_file(&path) {
                continue;
            }

            let jar = path.with_extension("jar");
            let output = runner.run(&tool, &unpack_args(&path, &jar), timeout)?;
            if !output.success() {
                return Err(InstallError::PackConversion {
                    path,
                    detail: format!(
                        "exit code {:?}: {}",
                        output.code,
                        output.stderr.trim()
                    ),
                });
            }
            converted += 1;
        }
    }

    Ok(converted)
}

/// Returns `true` if the path has a case-insensitive `.pack` extension.
fn is_pack_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pack"))
}

/// Builds the unpack200 argument list for one conversion.
fn unpack_args(pack: &Path, jar: &Path) -> Vec<OsString> {
    build_unpack_args(pack, jar, cfg!(windows))
}

fn build_unpack_args(pack: &Path, jar: &Path, windows: bool) -> Vec<OsString> {
    let mut args = Vec::new();
    if windows {
        args.extend(WINDOWS_UNPACK_FLAGS.iter().map(OsString::from));
    }
    args.push(pack.as_os_str().to_os_string());
    args.push(jar.as_os_str().to_os_string());
    args
}
