//! External tool invocation.
//!
//! Extraction on the restricted-tool platform and pack conversion both
//! shell out to external binaries. [`ToolRunner`] is the seam: production
//! code uses [`SystemRunner`], tests substitute fakes that fabricate tool
//! behavior without spawning processes.

use std::ffi::OsString;
use std::io;
use std::io::Read;
use std::path::Path;
use std::path::PathBuf;
use std::process::Child;
use std::process::Command;
use std::process::ExitStatus;
use std::process::Stdio;
use std::thread;
use std::time::Duration;
use std::time::Instant;

use crate::InstallError;
use crate::Result;

/// Poll interval while waiting on a child process with a deadline.
const WAIT_POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Captured result of one external tool invocation.
///
/// A non-zero exit status is deliberately NOT an `Err` at this layer: the
/// caller decides whether a failure is fatal, and always sees the exit code
/// and captured output.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit code, if the process exited normally.
    pub code: Option<i32>,
    /// Captured standard output (lossy UTF-8).
    pub stdout: String,
    /// Captured standard error (lossy UTF-8).
    pub stderr: String,
}

impl ToolOutput {
    /// Returns `true` if the tool exited with status zero.
    #[must_use]
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external tools synchronously, capturing their output.
pub trait ToolRunner {
    /// Runs `program` with `args`, blocking until it exits or the optional
    /// `timeout` expires.
    ///
    /// # Errors
    ///
    /// Fails with [`InstallError::ToolNotFound`] if the program cannot be
    /// spawned, [`InstallError::ToolTimeout`] if the deadline expires (the
    /// child is killed first), or [`InstallError::Io`] on other spawn/wait
    /// failures. A non-zero exit is NOT an error; inspect the returned
    /// [`ToolOutput`].
    fn run(
        &self,
        program: &Path,
        args: &[OsString],
        timeout: Option<Duration>,
    ) -> Result<ToolOutput>;
}

/// [`ToolRunner`] backed by `std::process::Command`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl ToolRunner for SystemRunner {
    fn run(
        &self,
        program: &Path,
        args: &[OsString],
        timeout: Option<Duration>,
    ) -> Result<ToolOutput> {
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| {
                if err.kind() == io::ErrorKind::NotFound {
                    InstallError::ToolNotFound {
                        tool: program.display().to_string(),
                    }
                } else {
                    InstallError::Io(err)
                }
            })?;

        // Drain pipes on background threads so a chatty tool cannot
        // deadlock against a full pipe buffer while we wait.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = match timeout {
            None => child.wait()?,
            Some(limit) => wait_with_deadline(&mut child, limit, program)?,
        };

        Ok(ToolOutput {
            code: status.code(),
            stdout: join_drained(stdout),
            stderr: join_drained(stderr),
        })
    }
}

/// Locates a tool on the search path.
///
/// # Errors
///
/// Fails with [`InstallError::ToolNotFound`] if the tool is absent.
pub fn locate_tool(name: &str) -> Result<PathBuf> {
    which::which(name).map_err(|_| InstallError::ToolNotFound {
        tool: name.to_string(),
    })
}

fn drain<R: Read + Send + 'static>(reader: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut r) = reader {
            let _ = r.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn join_drained(handle: thread::JoinHandle<String>) -> String {
    handle.join().unwrap_or_default()
}

fn wait_with_deadline(child: &mut Child, limit: Duration, program: &Path) -> Result<ExitStatus> {
    let started = Instant::now();
    loop {
        if let Some(status) = child.try_wait()? {
            return Ok(status);
        }
        if started.elapsed() >= limit {
            let _ = child.kill();
            let _ = child.wait();
            return Err(InstallError::ToolTimeout {
                tool: program.display().to_string(),
                limit,
            });
        }
        thread::sleep(WAIT_POLL_INTERVAL);
    }
}
