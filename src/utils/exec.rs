//! External command execution utilities.
//!
//! Provides a Builder-based API for running commands with stdin piping,
//! used by command-backed capabilities.
//!
//! # Examples
//!
//! ```ignore
//! use crate::utils::exec::Cmd;
//!
//! let output = Cmd::from_slice(&["lessc", "-"])
//!     .env("ASSETLINE_EXT", ".less")
//!     .stdin(source)
//!     .run()?;
//! ```

use anyhow::{Context, Result, anyhow, bail};
use std::{
    ffi::{OsStr, OsString},
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Output, Stdio},
};

// ============================================================================
// Builder API
// ============================================================================

/// Command builder for external process execution.
#[derive(Debug, Default)]
pub struct Cmd {
    program: OsString,
    args: Vec<OsString>,
    cwd: Option<PathBuf>,
    envs: Vec<(String, String)>,
    stdin_data: Option<Vec<u8>>,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new<S: AsRef<OsStr>>(program: S) -> Self {
        Self {
            program: program.as_ref().to_owned(),
            ..Default::default()
        }
    }

    /// Create from a command array (e.g., `["lessc", "-"]` or `["npx", "svgo"]`).
    pub fn from_slice<S: AsRef<OsStr>>(cmd: &[S]) -> Self {
        let mut iter = cmd.iter();
        let program = iter
            .next()
            .map(|s| s.as_ref().to_owned())
            .unwrap_or_default();
        let args: Vec<_> = iter.map(|s| s.as_ref().to_owned()).collect();
        Self {
            program,
            args,
            ..Default::default()
        }
    }

    /// Set working directory.
    pub fn cwd<P: AsRef<Path>>(mut self, dir: P) -> Self {
        self.cwd = Some(dir.as_ref().to_owned());
        self
    }

    /// Set a single environment variable for the subprocess.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Set stdin data to pipe to the process.
    pub fn stdin<D: AsRef<[u8]>>(mut self, data: D) -> Self {
        self.stdin_data = Some(data.as_ref().to_vec());
        self
    }

    /// Get the program name for error messages.
    fn program_name(&self) -> String {
        self.program.to_string_lossy().to_string()
    }

    /// Execute the command and return its output.
    ///
    /// Stdout and stderr are captured. A non-zero exit status is an error
    /// carrying the trimmed stderr.
    pub fn run(self) -> Result<Output> {
        let name = self.program_name();
        if name.is_empty() {
            bail!("empty command");
        }

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .envs(self.envs.iter().cloned())
            .stdin(if self.stdin_data.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        if let Some(dir) = &self.cwd {
            cmd.current_dir(dir);
        }

        let mut child = cmd
            .spawn()
            .with_context(|| format!("Failed to spawn `{name}`"))?;

        // Stdin is fed from its own thread while stdout drains here.
        let writer = match (child.stdin.take(), self.stdin_data) {
            (Some(mut stdin), Some(data)) => Some(std::thread::spawn(move || {
                stdin.write_all(&data)
                // stdin dropped here, closing the pipe
            })),
            _ => None,
        };

        let output = child
            .wait_with_output()
            .with_context(|| format!("Failed to wait for `{name}`"))?;

        if let Some(handle) = writer {
            let written = handle
                .join()
                .map_err(|_| anyhow!("stdin writer for `{name}` panicked"))?;
            // Broken pipe only matters if the command also failed.
            if let Err(e) = written
                && !output.status.success()
            {
                bail!("Failed to write stdin to `{name}`: {e}");
            }
        }

        if !output.status.success() {
            bail!(format_error(&name, &output));
        }

        Ok(output)
    }
}

/// Describe a failed command: exit status plus trimmed stderr.
fn format_error(name: &str, output: &Output) -> String {
    let status = output
        .status
        .code()
        .map_or_else(|| "signal".to_string(), |c| c.to_string());
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("`{name}` exited with status {status}")
    } else {
        format!("`{name}` exited with status {status}: {stderr}")
    }
}
