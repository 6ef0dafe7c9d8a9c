//! Output records: one per document, plus the link shapes they carry
//!
//! Every optional field is omitted from the serialized form when empty.
//! Consumers test for a field's presence to mean "has data", so an empty
//! list must never appear in the output.

use serde::{Deserialize, Serialize};

use crate::constants as C;
use crate::facts::DocumentFacts;

/// A heading of a document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Heading {
    pub heading: String,
    pub level: u8,
}

/// The resolved form of one raw link or embed
///
/// Which optional fields are present depends on the link's shape (see
/// [`crate::link_resolver::LinkShape`]) and is part of the output contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedLink {
    /// Link text with any path prefix removed, anchor kept
    pub link: String,
    /// Canonical path of the target; absent for dangling references
    #[serde(rename = "relativePath", default, skip_serializing_if = "Option::is_none")]
    pub resolved_path: Option<String>,
    /// Target name with the anchor removed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean_link: Option<String>,
    /// Alias shown instead of the link text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
}

impl NormalizedLink {
    pub fn new(link: impl Into<String>, resolved_path: Option<String>) -> Self {
        Self {
            link: link.into(),
            resolved_path,
            clean_link: None,
            display_text: None,
        }
    }

    pub fn with_clean_link(mut self, clean_link: impl Into<String>) -> Self {
        self.clean_link = Some(clean_link.into());
        self
    }

    pub fn with_display_text(mut self, display_text: impl Into<String>) -> Self {
        self.display_text = Some(display_text.into());
        self
    }

    /// Text after the first anchor marker, if any
    pub fn anchor(&self) -> Option<&str> {
        self.link.split_once(C::ANCHOR_MARKER).map(|(_, anchor)| anchor)
    }

    pub fn is_resolved(&self) -> bool {
        self.resolved_path.is_some()
    }
}

/// A reciprocal entry on the target of a link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Backlink {
    /// Display name of the linking document
    pub file_name: String,
    pub link: String,
    /// Canonical path of the linking document
    pub relative_path: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clean_link: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_text: Option<String>,
}

impl Backlink {
    /// Entry recording that `source` points somewhere through `link`
    pub fn from_link(source: &DocumentRecord, link: &NormalizedLink) -> Self {
        Self {
            file_name: source.file_name.clone(),
            link: link.link.clone(),
            relative_path: source.relative_path.clone(),
            clean_link: link.clean_link.clone(),
            display_text: link.display_text.clone(),
        }
    }
}

/// Everything known about one document after a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    /// Display name (basename without extension)
    pub file_name: String,
    /// Canonical path
    pub relative_path: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aliases: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub headings: Vec<Heading>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<NormalizedLink>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub backlinks: Vec<Backlink>,
}

impl DocumentRecord {
    /// A record with nothing but its identity
    pub fn new(relative_path: impl Into<String>, file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            relative_path: relative_path.into(),
            tags: Vec::new(),
            aliases: Vec::new(),
            headings: Vec::new(),
            links: Vec::new(),
            backlinks: Vec::new(),
        }
    }
}

/// Combine one document's facts into its record (backlinks not yet filled)
///
/// `tags` is the document's deduplicated tag list and `links` its resolved
/// references. A document without a fact cache yields an identity-only
/// record.
pub fn assemble(doc: &DocumentFacts, tags: Vec<String>, links: Vec<NormalizedLink>) -> DocumentRecord {
    let mut record = DocumentRecord::new(doc.path.clone(), doc.display_name());
    record.tags = tags;
    record.links = links;

    if let Some(cache) = &doc.cache {
        record.aliases = cache.aliases();
        record.headings = cache
            .headings
            .iter()
            .map(|h| Heading {
                heading: h.heading.clone(),
                level: h.level,
            })
            .collect();
    }

    record
}
