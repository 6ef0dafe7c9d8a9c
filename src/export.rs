//! Writing run outputs to disk

use std::fs;
use std::path::Path;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::util;

/// Serialize `value` as pretty JSON (2-space indent)
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

/// Write `value` as pretty JSON to `path`, creating parent directories
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let content = to_pretty_json(value)?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|e| Error::io(parent, e))?;
        }
    }
    fs::write(path, content.as_bytes()).map_err(|e| Error::io(path, e))?;

    tracing::info!(path = %util::display_path(path), bytes = content.len(), "wrote output");
    Ok(())
}
