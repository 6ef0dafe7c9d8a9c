//! Utility functions for path-name handling and content digests

use std::path::Path;
use sha2::{Sha256, Digest};

use crate::constants as C;

/// Final segment of a `/`-separated path (the whole string if there is none)
pub fn last_segment(path: &str) -> &str {
    path.rsplit(C::PATH_SEPARATOR).next().unwrap_or(path)
}

/// Strip the markdown extension, if present
pub fn strip_markdown_extension(name: &str) -> &str {
    name.strip_suffix(C::MARKDOWN_EXTENSION).unwrap_or(name)
}

/// Whether a canonical path names an indexable document
pub fn is_markdown_path(path: &str) -> bool {
    path.ends_with(C::MARKDOWN_EXTENSION)
}

/// Short reference name of a document: last segment, extension stripped
///
/// `"folder/Note A.md"` becomes `"Note A"`.
pub fn short_name(path: &str) -> &str {
    strip_markdown_extension(last_segment(path))
}

/// Display name of a non-markdown file: last segment without its extension
///
/// Dotfiles keep their leading dot (`".gitignore"` stays `".gitignore"`).
pub fn file_basename(path: &str) -> &str {
    let name = last_segment(path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

/// Hash content using SHA256, hex encoded
pub fn digest_hex(content: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content);
    let hash = hasher.finalize();
    format!("{:x}", hash)
}

/// Abbreviate a hex digest to git-style length for log lines
pub fn abbreviate_digest(full_hash: &str) -> String {
    full_hash.chars().take(12).collect()
}

/// Display a path with forward slashes (cross-platform standard)
pub fn display_path(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}
