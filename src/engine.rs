//! Extraction engine - one full run over a vault snapshot
//!
//! Stages, in order:
//! - build the path index from every document path
//! - per document: normalize tags, resolve links, assemble the record
//! - global: fill backlinks, build the tag index and the inventory
//!
//! All run state lives in a [`RunContext`] created for the run and dropped
//! with it; nothing is shared between runs.

use serde::Serialize;

use crate::backlinks;
use crate::error::{Error, Result};
use crate::facts::{DocumentFacts, VaultSnapshot};
use crate::inventory::{self, Inventory};
use crate::link_resolver::LinkResolver;
use crate::path_index::{CollisionPolicy, NameCollision, PathIndex};
use crate::record::{self, DocumentRecord};
use crate::tags::{self, TagEntry};
use crate::util;

/// Knobs for one run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractOptions {
    pub collision_policy: CollisionPolicy,
}

/// Read-only state shared by the per-document stages of one run
#[derive(Debug)]
pub struct RunContext {
    pub index: PathIndex,
}

impl RunContext {
    /// Build the run context (path index) for a set of documents
    pub fn new(documents: &[&DocumentFacts], options: &ExtractOptions) -> Result<Self> {
        let index = PathIndex::build_with_policy(
            documents.iter().map(|doc| doc.path.as_str()),
            options.collision_policy,
        )?;
        Ok(Self { index })
    }

    /// Deduplicated tags and assembled record (no backlinks) for one document
    pub fn process_document(&self, doc: &DocumentFacts) -> (Vec<String>, DocumentRecord) {
        let Some(cache) = &doc.cache else {
            tracing::warn!(path = %doc.path, "no fact cache for document, treating as empty");
            return (Vec::new(), record::assemble(doc, Vec::new(), Vec::new()));
        };

        let tags = tags::unique_tags(&cache.tags);
        let resolver = LinkResolver::new(&self.index, &doc.path, doc.display_name());
        let links = resolver.resolve_all(&cache.references());

        tracing::debug!(
            path = %doc.path,
            tags = tags.len(),
            links = links.len(),
            "processed document"
        );

        (tags.clone(), record::assemble(doc, tags, links))
    }
}

/// Summary of a finished run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunReport {
    pub documents: usize,
    pub links: usize,
    pub unresolved: usize,
    pub backlinks: usize,
    pub tags: usize,
    /// Short names claimed by several documents
    pub collisions: Vec<String>,
    /// SHA-256 of the serialized records and tag index
    pub digest: String,
}

/// Everything a run produces
#[derive(Debug, Clone)]
pub struct Extraction {
    pub records: Vec<DocumentRecord>,
    pub tags: Vec<TagEntry>,
    pub inventory: Option<Inventory>,
    pub collisions: Vec<NameCollision>,
    pub report: RunReport,
}

/// Run the full pipeline over a snapshot
pub fn extract(snapshot: &VaultSnapshot, options: &ExtractOptions) -> Result<Extraction> {
    let documents = snapshot.unique_documents();
    if documents.is_empty() {
        return Err(Error::EmptyVault);
    }

    let ctx = RunContext::new(&documents, options)?;

    let mut records = Vec::with_capacity(documents.len());
    let mut tagged: Vec<(&str, Vec<String>)> = Vec::new();
    for doc in &documents {
        let (doc_tags, record) = ctx.process_document(doc);
        if !doc_tags.is_empty() {
            tagged.push((doc.path.as_str(), doc_tags));
        }
        records.push(record);
    }

    let backlink_count = backlinks::index_backlinks(&mut records);
    let tag_index = tags::build_tag_index(&tagged, &snapshot.tag_counts);
    let inventory = inventory::build_inventory(&snapshot.entries);

    let links: usize = records.iter().map(|r| r.links.len()).sum();
    let unresolved: usize = records
        .iter()
        .flat_map(|r| r.links.iter())
        .filter(|l| !l.is_resolved())
        .count();

    let digest = digest_outputs(&records, &tag_index)?;
    let collisions = ctx.index.collisions().to_vec();

    let report = RunReport {
        documents: records.len(),
        links,
        unresolved,
        backlinks: backlink_count,
        tags: tag_index.len(),
        collisions: collisions.iter().map(|c| c.name.clone()).collect(),
        digest,
    };

    tracing::info!(
        documents = report.documents,
        links = report.links,
        unresolved = report.unresolved,
        backlinks = report.backlinks,
        tags = report.tags,
        digest = %util::abbreviate_digest(&report.digest),
        "extraction finished"
    );

    Ok(Extraction {
        records,
        tags: tag_index,
        inventory,
        collisions,
        report,
    })
}

/// Digest of the run's serialized outputs
fn digest_outputs(records: &[DocumentRecord], tags: &[TagEntry]) -> Result<String> {
    let mut bytes = serde_json::to_vec(records)?;
    bytes.extend(serde_json::to_vec(tags)?);
    Ok(util::digest_hex(&bytes))
}
