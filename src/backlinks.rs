//! Backlink indexing
//!
//! Second, global pass over the assembled records. Every resolved link is
//! grouped under the path it points at (target → entries) in a single scan,
//! then each record takes its own group. Because a record's backlink list is
//! replaced wholesale from its group, nothing can carry over from one target
//! to the next, and re-running the pass yields the same lists.

use std::collections::HashMap;

use crate::record::{Backlink, DocumentRecord};

/// Fill in `backlinks` on every record; returns the number of entries added
///
/// Links from a document to itself are not backlinks. Entries are ordered by
/// source document, then by link order within the source.
pub fn index_backlinks(records: &mut [DocumentRecord]) -> usize {
    let mut by_target = collect_backlinks(records);
    let mut total = 0;

    for record in records.iter_mut() {
        record.backlinks = by_target.remove(&record.relative_path).unwrap_or_default();
        total += record.backlinks.len();
    }

    // Whatever is left points at paths outside the record set
    if !by_target.is_empty() {
        tracing::debug!(targets = by_target.len(), "backlinks to paths without a record");
    }

    total
}

/// Group backlink entries by the path their link resolved to
pub fn collect_backlinks(records: &[DocumentRecord]) -> HashMap<String, Vec<Backlink>> {
    let mut by_target: HashMap<String, Vec<Backlink>> = HashMap::new();

    for source in records {
        for link in &source.links {
            let Some(target) = link.resolved_path.as_deref() else {
                continue;
            };
            if target == source.relative_path {
                continue;
            }
            by_target
                .entry(target.to_string())
                .or_default()
                .push(Backlink::from_link(source, link));
        }
    }

    by_target
}
