//! `[[converter]]` and `[[compressor]]` tables: command-backed capabilities.
//!
//! # Example
//!
//! ```toml
//! [[converter]]
//! name = "less"
//! extension = ".less"
//! target = ".css"
//! command = ["lessc", "-"]
//!
//! [[compressor]]
//! name = "svgo"
//! extension = ".svg"
//! command = ["svgo", "-i", "-", "-o", "-"]
//! ```

use serde::{Deserialize, Serialize};

use crate::capability::Extension;
use crate::config::{ConfigDiagnostics, FieldPath};

/// Package runners that may fetch the real tool on first use.
const PACKAGE_RUNNERS: [&str; 5] = ["npx", "bunx", "pnpx", "yarn", "dlx"];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConverterEntry {
    pub name: String,
    pub extension: String,
    pub target: String,
    pub command: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CompressorEntry {
    pub name: String,
    pub extension: String,
    pub command: Vec<String>,
}

impl ConverterEntry {
    pub const SECTION: &'static str = "converter";

    pub fn validate(&self, index: usize, diag: &mut ConfigDiagnostics) {
        let field = |name| FieldPath::indexed(Self::SECTION, index, name);

        validate_name(&self.name, field("name"), diag);
        let from = validate_extension(&self.extension, field("extension"), diag);
        let to = validate_extension(&self.target, field("target"), diag);
        if let (Some(from), Some(to)) = (from, to)
            && from == to
        {
            diag.error_with_hint(
                field("target"),
                format!("target `{to}` equals the source extension"),
                "declare it as a [[compressor]] instead",
            );
        }
        validate_command(&self.command, field("command"), diag);
    }
}

impl CompressorEntry {
    pub const SECTION: &'static str = "compressor";

    pub fn validate(&self, index: usize, diag: &mut ConfigDiagnostics) {
        let field = |name| FieldPath::indexed(Self::SECTION, index, name);

        validate_name(&self.name, field("name"), diag);
        validate_extension(&self.extension, field("extension"), diag);
        validate_command(&self.command, field("command"), diag);
    }
}

fn validate_name(name: &str, field: FieldPath, diag: &mut ConfigDiagnostics) {
    if name.trim().is_empty() {
        diag.error(field, "name is empty");
    }
}

fn validate_extension(
    raw: &str,
    field: FieldPath,
    diag: &mut ConfigDiagnostics,
) -> Option<Extension> {
    match Extension::new(raw) {
        Ok(ext) => Some(ext),
        Err(e) => {
            diag.error_with_hint(field, e.to_string(), "use the form \".less\"");
            None
        }
    }
}

/// Check the command is non-empty and its program is on PATH.
fn validate_command(command: &[String], field: FieldPath, diag: &mut ConfigDiagnostics) {
    let Some(program) = command.first() else {
        diag.error(field, "command is empty");
        return;
    };

    if which::which(program).is_ok() {
        return;
    }

    if PACKAGE_RUNNERS.contains(&program.as_str()) {
        diag.warn(
            field,
            format!("`{program}` not found; assets of this type will fail"),
        );
    } else {
        diag.error_with_hint(
            field,
            format!("`{program}` not found"),
            "install the command or fix the path",
        );
    }
}
