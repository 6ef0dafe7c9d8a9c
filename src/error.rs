//! Error type shared by every stage of the extraction run.

use std::path::PathBuf;

/// Errors that abort an extraction run.
///
/// Unresolved references and missing fact caches are not errors:
/// both degrade into data (an absent `relativePath`, empty facts) instead
/// of failing the batch.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The vault root could not be determined
    #[error("cannot determine base path: pass --vault or set {var}")]
    MissingBasePath { var: &'static str },

    /// The snapshot carries no documents at all
    #[error("vault snapshot contains no documents")]
    EmptyVault,

    /// Two documents share a short name and strict naming was requested
    #[error("short name '{name}' is shared by {} documents: {}", .paths.len(), .paths.join(", "))]
    AmbiguousShortName { name: String, paths: Vec<String> },

    /// A snapshot or settings file could not be parsed
    #[error("failed to parse {}: {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// The file extension does not map to a known format
    #[error("unsupported file format: {} (expected .json, .yaml or .yml)", .path.display())]
    UnsupportedFormat { path: PathBuf },

    /// Filesystem access failed
    #[error("{}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
