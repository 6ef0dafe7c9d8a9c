//! Extractor settings
//!
//! Mirrors the settings of the metadata-extractor plugin: where each output
//! goes and under which file name. Loaded from an optional JSON or YAML file;
//! every key may be omitted.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::constants as C;
use crate::error::{Error, Result};
use crate::facts::parse_by_extension;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractorSettings {
    /// Absolute path for the tag index; overrides `tag_file`
    pub tag_path: Option<PathBuf>,
    pub tag_file: String,
    /// Absolute path for the document records; overrides `metadata_file`
    pub metadata_path: Option<PathBuf>,
    pub metadata_file: String,
    /// Absolute path for the inventory; overrides `all_except_md_file`
    pub all_except_md_path: Option<PathBuf>,
    pub all_except_md_file: String,
    /// Fail the run when two documents share a short name
    pub strict_names: bool,
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            tag_path: None,
            tag_file: C::DEFAULT_TAG_FILE.to_string(),
            metadata_path: None,
            metadata_file: C::DEFAULT_METADATA_FILE.to_string(),
            all_except_md_path: None,
            all_except_md_file: C::DEFAULT_ALL_EXCEPT_MD_FILE.to_string(),
            strict_names: false,
        }
    }
}

impl ExtractorSettings {
    /// Load settings from a JSON or YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        parse_by_extension(path, &content)
    }

    /// Load from `path` if given, defaults otherwise
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }
}
