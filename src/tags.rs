//! Tag normalization and the vault-wide tag index
//!
//! Tags are compared without their `#` marker and case-insensitively. Each
//! document contributes a tag at most once, however often it repeats it.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::constants as C;

/// Normalize one raw tag: drop the leading marker, lowercase
pub fn normalize_tag(raw: &str) -> String {
    raw.strip_prefix(C::TAG_MARKER).unwrap_or(raw).to_lowercase()
}

/// Normalized tags of one document, deduplicated in first-seen order
pub fn unique_tags<S: AsRef<str>>(raw_tags: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    raw_tags
        .iter()
        .map(|tag| normalize_tag(tag.as_ref()))
        .filter(|tag| !tag.is_empty())
        .filter(|tag| seen.insert(tag.clone()))
        .collect()
}

/// Fold a raw tag → count map onto normalized tags, summing case variants
pub fn normalize_counts(raw_counts: &BTreeMap<String, u64>) -> HashMap<String, u64> {
    let mut counts: HashMap<String, u64> = HashMap::new();
    for (raw, count) in raw_counts {
        let entry = counts.entry(normalize_tag(raw)).or_insert(0);
        *entry = entry.saturating_add(*count);
    }
    counts
}

/// One row of the tag index
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagEntry {
    /// Normalized tag, no marker
    pub tag: String,
    /// Usage count reported by the metadata cache (0 if it had none)
    pub tag_count: u64,
    /// Documents carrying the tag, in document order
    pub relative_paths: Vec<String>,
}

/// Build the tag index from each document's deduplicated tag list
///
/// `documents` pairs a document path with its output of [`unique_tags`].
/// Tags are listed in order of first appearance across the documents.
pub fn build_tag_index<P, T>(documents: &[(P, T)], raw_counts: &BTreeMap<String, u64>) -> Vec<TagEntry>
where
    P: AsRef<str>,
    T: AsRef<[String]>,
{
    let counts = normalize_counts(raw_counts);

    let mut order: Vec<String> = Vec::new();
    let mut by_tag: HashMap<String, Vec<String>> = HashMap::new();

    for (path, tags) in documents {
        for tag in tags.as_ref() {
            let paths = by_tag.entry(tag.clone()).or_insert_with(|| {
                order.push(tag.clone());
                Vec::new()
            });
            // A document counts once per tag
            if paths.last().map(String::as_str) != Some(path.as_ref()) {
                paths.push(path.as_ref().to_string());
            }
        }
    }

    order
        .into_iter()
        .map(|tag| {
            let tag_count = match counts.get(&tag) {
                Some(count) => *count,
                None => {
                    tracing::warn!(tag = %tag, "tag missing from the usage count map, reporting 0");
                    0
                }
            };
            let relative_paths = by_tag.remove(&tag).unwrap_or_default();
            TagEntry { tag, tag_count, relative_paths }
        })
        .collect()
}
