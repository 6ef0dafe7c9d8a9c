//! Pre-extracted document facts
//!
//! The metadata cache of the host application hands over one fact set per
//! document (tags, links, embeds, headings, frontmatter) plus a vault-wide
//! tag count map and a listing of every folder and file. This module models
//! that hand-over and loads it from a JSON or YAML snapshot file.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{Error, Result};
use crate::frontmatter;
use crate::util;

/// Origin of a raw reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Link,
    Embed,
}

/// Location of a reference inside its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Position {
    #[serde(default)]
    pub line: usize,
    #[serde(default)]
    pub col: usize,
    pub offset: usize,
}

/// A link or embed as extracted, before resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawReference {
    /// Link text, e.g. `folder/Note#Heading`
    pub link: String,
    /// Display (alias) text, if the extractor recorded one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
}

impl RawReference {
    pub fn new(link: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            display_text: None,
            position: None,
        }
    }

    pub fn with_display(mut self, display: impl Into<String>) -> Self {
        self.display_text = Some(display.into());
        self
    }

    pub fn at(mut self, offset: usize) -> Self {
        self.position = Some(Position { offset, ..Position::default() });
        self
    }
}

/// A raw reference tagged with its origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceRef<'a> {
    pub kind: ReferenceKind,
    pub reference: &'a RawReference,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawHeading {
    pub heading: String,
    pub level: u8,
}

/// Facts extracted from one document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FactCache {
    /// Raw tags as authored, marker included (`#Foo`)
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub links: Vec<RawReference>,
    #[serde(default)]
    pub embeds: Vec<RawReference>,
    #[serde(default)]
    pub headings: Vec<RawHeading>,
    /// Explicit alias list; wins over `frontmatter` when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frontmatter: Option<serde_yaml::Value>,
}

impl FactCache {
    /// Links and embeds merged in document order
    ///
    /// When every reference carries a position they are ordered by offset
    /// (ties keep links before embeds); otherwise links come first, followed
    /// by embeds.
    pub fn references(&self) -> Vec<ReferenceRef<'_>> {
        let mut merged: Vec<ReferenceRef<'_>> = self
            .links
            .iter()
            .map(|reference| ReferenceRef { kind: ReferenceKind::Link, reference })
            .chain(
                self.embeds
                    .iter()
                    .map(|reference| ReferenceRef { kind: ReferenceKind::Embed, reference }),
            )
            .collect();

        if merged.iter().all(|r| r.reference.position.is_some()) {
            merged.sort_by_key(|r| r.reference.position.map(|p| p.offset));
        }

        merged
    }

    /// Aliases with blanks removed, explicit list first, then frontmatter
    pub fn aliases(&self) -> Vec<String> {
        let raw = match (&self.aliases, &self.frontmatter) {
            (Some(explicit), _) => explicit.clone(),
            (None, Some(fm)) => frontmatter::parse_aliases(fm),
            (None, None) => Vec::new(),
        };

        raw.into_iter()
            .map(|alias| alias.trim().to_string())
            .filter(|alias| !alias.is_empty())
            .collect()
    }
}

/// One markdown document of the vault
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentFacts {
    /// Canonical vault-relative path, e.g. `folder/Note A.md`
    pub path: String,
    /// Display name; derived from `path` when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub basename: Option<String>,
    /// Extracted facts; `None` when the metadata cache had nothing usable
    #[serde(
        default,
        deserialize_with = "lenient_cache",
        skip_serializing_if = "Option::is_none"
    )]
    pub cache: Option<FactCache>,
}

impl DocumentFacts {
    pub fn new(path: impl Into<String>, cache: FactCache) -> Self {
        Self {
            path: path.into(),
            basename: None,
            cache: Some(cache),
        }
    }

    /// Display name: explicit basename or the short name of the path
    pub fn display_name(&self) -> &str {
        self.basename
            .as_deref()
            .unwrap_or_else(|| util::short_name(&self.path))
    }
}

/// Read a fact cache, degrading a malformed one to `None`
///
/// One broken document must not fail the whole snapshot; it is processed
/// like a document without facts.
fn lenient_cache<'de, D>(deserializer: D) -> std::result::Result<Option<FactCache>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<serde_yaml::Value>::deserialize(deserializer)? else {
        return Ok(None);
    };

    match serde_yaml::from_value(raw) {
        Ok(cache) => Ok(Some(cache)),
        Err(e) => {
            tracing::warn!(error = %e, "malformed fact cache, treating document as empty");
            Ok(None)
        }
    }
}

/// Kind of a vault listing entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Folder,
    File,
}

/// Any folder or file in the vault, markdown or not
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VaultEntry {
    #[serde(rename = "type")]
    pub kind: EntryKind,
    pub path: String,
}

impl VaultEntry {
    pub fn folder(path: impl Into<String>) -> Self {
        Self { kind: EntryKind::Folder, path: path.into() }
    }

    pub fn file(path: impl Into<String>) -> Self {
        Self { kind: EntryKind::File, path: path.into() }
    }
}

/// Everything one extraction run reads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VaultSnapshot {
    #[serde(default)]
    pub documents: Vec<DocumentFacts>,
    /// Raw tag → usage count, markers and case as authored
    #[serde(default)]
    pub tag_counts: BTreeMap<String, u64>,
    #[serde(default)]
    pub entries: Vec<VaultEntry>,
}

impl VaultSnapshot {
    /// Load a snapshot, choosing JSON or YAML from the file extension
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        parse_by_extension(path, &content)
    }

    /// Documents with duplicate paths removed (first occurrence wins)
    pub fn unique_documents(&self) -> Vec<&DocumentFacts> {
        let mut seen = HashSet::new();
        self.documents
            .iter()
            .filter(|doc| {
                let fresh = seen.insert(doc.path.as_str());
                if !fresh {
                    tracing::warn!(path = %doc.path, "duplicate document path in snapshot, skipping");
                }
                fresh
            })
            .collect()
    }
}

/// Deserialize `content` as JSON or YAML depending on `path`'s extension
pub(crate) fn parse_by_extension<T>(path: &Path, content: &str) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_ascii_lowercase());

    let parse_error = |message: String| Error::Parse {
        path: path.to_path_buf(),
        message,
    };

    match ext.as_deref() {
        Some("json") => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
        Some("yaml") | Some("yml") => {
            serde_yaml::from_str(content).map_err(|e| parse_error(e.to_string()))
        }
        _ => Err(Error::UnsupportedFormat { path: path.to_path_buf() }),
    }
}
