//! Capabilities backed by external programs.
//!
//! Declared in `assetline.toml`:
//!
//! ```toml
//! [[converter]]
//! name = "less"
//! extension = ".less"
//! target = ".css"
//! command = ["lessc", "-"]
//! ```
//!
//! The asset content is piped on stdin and stdout becomes the new content.
//! Arguments may reference `$ASSETLINE_NAME` (capability name) and
//! `$ASSETLINE_EXT` (handled extension); both are also exported to the
//! child's environment.

use std::path::PathBuf;

use crate::utils::exec::Cmd;

use super::{Compressor, Converter, Extension, TransformError};

/// Shared part of command-backed converters and compressors.
#[derive(Debug, Clone)]
struct Invocation {
    name: String,
    extension: Extension,
    command: Vec<String>,
    cwd: Option<PathBuf>,
}

impl Invocation {
    fn vars(&self) -> [(&'static str, &str); 2] {
        [
            ("ASSETLINE_NAME", self.name.as_str()),
            ("ASSETLINE_EXT", self.extension.as_str()),
        ]
    }

    fn run(&self, content: &[u8]) -> Result<Vec<u8>, TransformError> {
        let vars = self.vars();
        let resolved = resolve_args(&self.command, &vars);

        let mut cmd = Cmd::from_slice(&resolved).stdin(content);
        for (key, value) in vars {
            cmd = cmd.env(key, value);
        }
        if let Some(dir) = &self.cwd {
            cmd = cmd.cwd(dir);
        }

        cmd.run()
            .map(|output| output.stdout)
            .map_err(|e| TransformError::new(&self.name, format!("{e:#}")))
    }
}

/// Replace `$ASSETLINE_*` occurrences in command arguments.
fn resolve_args(args: &[String], vars: &[(&str, &str)]) -> Vec<String> {
    args.iter()
        .map(|arg| {
            let mut result = arg.clone();
            for (key, value) in vars {
                result = result.replace(&format!("${key}"), value);
            }
            result
        })
        .collect()
}

/// Converter running an external program.
#[derive(Debug, Clone)]
pub struct CommandConverter {
    invocation: Invocation,
    target: Extension,
}

impl CommandConverter {
    pub fn new(
        name: impl Into<String>,
        extension: Extension,
        target: Extension,
        command: Vec<String>,
    ) -> Self {
        Self {
            invocation: Invocation {
                name: name.into(),
                extension,
                command,
                cwd: None,
            },
            target,
        }
    }

    /// Run the program from `dir` instead of the current directory.
    pub fn with_cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.invocation.cwd = Some(dir.into());
        self
    }
}

impl Converter for CommandConverter {
    fn name(&self) -> &str {
        &self.invocation.name
    }

    fn extension(&self) -> &Extension {
        &self.invocation.extension
    }

    fn target(&self) -> &Extension {
        &self.target
    }

    fn convert(&self, content: &[u8]) -> Result<Vec<u8>, TransformError> {
        self.invocation.run(content)
    }
}

/// Compressor running an external program.
#[derive(Debug, Clone)]
pub struct CommandCompressor {
    invocation: Invocation,
}

impl CommandCompressor {
    pub fn new(name: impl Into<String>, extension: Extension, command: Vec<String>) -> Self {
        Self {
            invocation: Invocation {
                name: name.into(),
                extension,
                command,
                cwd: None,
            },
        }
    }

    /// Run the program from `dir` instead of the current directory.
    pub fn with_cwd(mut self, dir: impl Into<PathBuf>) -> Self {
        self.invocation.cwd = Some(dir.into());
        self
    }
}

impl Compressor for CommandCompressor {
    fn name(&self) -> &str {
        &self.invocation.name
    }

    fn extension(&self) -> &Extension {
        &self.invocation.extension
    }

    fn compress(&self, content: &[u8]) -> Result<Vec<u8>, TransformError> {
        self.invocation.run(content)
    }
}
