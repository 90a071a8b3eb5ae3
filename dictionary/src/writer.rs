//! Writes dictionary output files.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

/// Writes one build output (a markup chunk, the OPF package or a stats
/// document), creating the output directory on first use.
///
/// # Errors
///
/// Returns an error naming the output directory or file that could not be
/// created.
pub fn write(path: &Path, content: &str) -> Result<()> {
    let out_dir = path.parent().filter(|dir| !dir.as_os_str().is_empty());
    if let Some(out_dir) = out_dir {
        fs::create_dir_all(out_dir)
            .with_context(|| format!("Cannot create output directory: {}", out_dir.display()))?;
    }
    fs::write(path, content)
        .with_context(|| format!("Cannot write dictionary output: {}", path.display()))
}

/// Writes `value` as pretty-printed JSON.
///
/// # Errors
///
/// Returns an error if the value cannot be serialized or the file cannot be written.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)
        .with_context(|| format!("Cannot serialize dictionary output: {}", path.display()))?;
    write(path, &json)
}
