//! Short-name → canonical path index
//!
//! Wiki links name their target by basename only (`[[Note A]]`), so every
//! run starts by mapping each document's short name to its canonical path.
//! Two documents sharing a basename collide: by default the one enumerated
//! last wins, and every collision is recorded so callers can report it.

use std::collections::HashMap;

use crate::error::{Error, Result};
use crate::util;

/// How the index treats two documents with the same short name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CollisionPolicy {
    /// Later documents overwrite earlier ones
    #[default]
    LastWriteWins,
    /// Any collision fails the build
    Strict,
}

/// A short name claimed by more than one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameCollision {
    pub name: String,
    /// Every claimant in enumeration order; the last one is indexed
    pub paths: Vec<String>,
}

/// Mapping from short reference name to canonical document path
#[derive(Debug, Clone, Default)]
pub struct PathIndex {
    entries: HashMap<String, String>,
    collisions: Vec<NameCollision>,
}

impl PathIndex {
    /// Build with the default last-write-wins policy
    pub fn build<'a, I>(paths: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut index = PathIndex::default();
        for path in paths {
            index.insert(path);
        }
        index
    }

    /// Build, failing with `AmbiguousShortName` under `CollisionPolicy::Strict`
    pub fn build_with_policy<'a, I>(paths: I, policy: CollisionPolicy) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let index = Self::build(paths);

        if policy == CollisionPolicy::Strict {
            if let Some(collision) = index.collisions.first() {
                return Err(Error::AmbiguousShortName {
                    name: collision.name.clone(),
                    paths: collision.paths.clone(),
                });
            }
        }

        Ok(index)
    }

    /// Index one document path; non-markdown paths are ignored
    fn insert(&mut self, path: &str) {
        if !util::is_markdown_path(path) {
            return;
        }

        let name = util::short_name(path);

        if let Some(previous) = self.entries.get(name) {
            if previous != path {
                tracing::debug!(name, previous = %previous, path, "short name collision");
                match self.collisions.iter_mut().find(|c| c.name == name) {
                    Some(collision) => collision.paths.push(path.to_string()),
                    None => self.collisions.push(NameCollision {
                        name: name.to_string(),
                        paths: vec![previous.clone(), path.to_string()],
                    }),
                }
            }
        }

        self.entries.insert(name.to_string(), path.to_string());
    }

    /// Resolve a short name; an explicit `.md` suffix is tolerated
    pub fn resolve(&self, name: &str) -> Option<&str> {
        self.entries
            .get(name)
            .or_else(|| {
                let stripped = util::strip_markdown_extension(name);
                if stripped.len() == name.len() {
                    None
                } else {
                    self.entries.get(stripped)
                }
            })
            .map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.resolve(name).is_some()
    }

    /// Short names shared by several documents, in discovery order
    pub fn collisions(&self) -> &[NameCollision] {
        &self.collisions
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
