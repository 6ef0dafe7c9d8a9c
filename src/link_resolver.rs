//! Link resolution module
//!
//! Turns the raw links and embeds of one document into [`NormalizedLink`]s.
//!
//! Every reference is first reduced to its target (`folder/Note#Heading`
//! becomes `Note#Heading`), then classified by three traits:
//!
//! - has an anchor (`#` anywhere in the target)
//! - the anchor points into the same document (target starts with `#`)
//! - carries a real alias (display text that is not just the link again)
//!
//! The six combinations map onto [`LinkShape`], and each shape fixes which
//! fields the emitted link carries. Unresolvable targets are not errors:
//! the link is emitted without a resolved path.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants as C;
use crate::facts::{RawReference, ReferenceKind, ReferenceRef};
use crate::path_index::PathIndex;
use crate::record::NormalizedLink;
use crate::util;

/// Splits a raw link into its path part and optional anchor
static TARGET_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?s)^(?P<path>[^#]*)(?:#(?P<anchor>.*))?$").unwrap()
});

/// A reference target with the path prefix removed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkTarget {
    full: String,
    anchor_at: Option<usize>,
}

impl LinkTarget {
    /// Parse a raw link text
    ///
    /// Only the part before the first `#` is treated as a path, so anchors
    /// that contain `/` are kept intact.
    pub fn parse(raw: &str) -> Self {
        let (path, anchor) = match TARGET_RE.captures(raw) {
            Some(caps) => (
                caps.name("path").map_or("", |m| m.as_str()),
                caps.name("anchor").map(|m| m.as_str()),
            ),
            None => (raw, None),
        };

        let name = util::last_segment(path);
        match anchor {
            Some(anchor) => Self {
                full: format!("{}{}{}", name, C::ANCHOR_MARKER, anchor),
                anchor_at: Some(name.len()),
            },
            None => Self {
                full: name.to_string(),
                anchor_at: None,
            },
        }
    }

    /// Target including the anchor, e.g. `Note#Heading`
    pub fn full(&self) -> &str {
        &self.full
    }

    /// Target without the anchor, e.g. `Note`
    pub fn clean(&self) -> &str {
        match self.anchor_at {
            Some(at) => &self.full[..at],
            None => &self.full,
        }
    }

    /// Text after the anchor marker
    pub fn anchor(&self) -> Option<&str> {
        self.anchor_at.map(|at| &self.full[at + 1..])
    }

    pub fn has_anchor(&self) -> bool {
        self.anchor_at.is_some()
    }

    /// Anchor into the document that contains the link
    pub fn is_same_document(&self) -> bool {
        self.anchor_at == Some(0)
    }
}

/// The three independent traits a reference is classified by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LinkTraits {
    pub has_anchor: bool,
    pub anchor_is_same_doc: bool,
    pub has_alias: bool,
}

impl LinkTraits {
    /// Compute the traits of `target` shown with display text `alias`
    pub fn of(target: &LinkTarget, alias: &str) -> Self {
        Self {
            has_anchor: target.has_anchor(),
            anchor_is_same_doc: target.is_same_document(),
            has_alias: is_real_alias(target, alias),
        }
    }
}

/// Whether `alias` is a user-chosen alias rather than a rendering of the link
///
/// For anchors into other documents, display text that merely restates the
/// anchor (equals the anchor, equals the rendered `Note > Heading` form, or
/// carries both `#` and `>`) does not count.
fn is_real_alias(target: &LinkTarget, alias: &str) -> bool {
    if alias.is_empty() || alias == target.full() {
        return false;
    }

    match target.anchor() {
        Some(anchor) if !target.is_same_document() => !is_anchor_shaped(alias, target.clean(), anchor),
        _ => true,
    }
}

fn is_anchor_shaped(alias: &str, clean: &str, anchor: &str) -> bool {
    // `Note#H > sub` style renderings carry both markers
    let restates_link = alias.contains(C::ANCHOR_MARKER) && alias.contains('>');
    if restates_link || alias == anchor {
        return true;
    }

    let rendered = format!(
        "{}{}{}",
        clean,
        C::ANCHOR_DISPLAY_SEPARATOR,
        anchor.replace(C::ANCHOR_MARKER, C::ANCHOR_DISPLAY_SEPARATOR)
    );
    alias == rendered
}

/// The six mutually exclusive link shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkShape {
    /// `[[Note]]` → `{link, relativePath?}`
    Plain,
    /// `[[Note#Heading|alias]]` → `{link, relativePath?, cleanLink, displayText}`
    AnchoredWithAlias,
    /// `[[Note#Heading]]` → `{link, relativePath?, cleanLink}`
    Anchored,
    /// `[[Note|alias]]` → `{link, relativePath?, displayText}`
    Aliased,
    /// `[[#Heading|alias]]` → `{link, relativePath, cleanLink, displayText}`
    SelfAnchoredWithAlias,
    /// `[[#Heading]]` → `{link, relativePath}`
    SelfAnchored,
}

impl LinkShape {
    pub fn classify(traits: LinkTraits) -> Self {
        match (traits.has_anchor, traits.anchor_is_same_doc, traits.has_alias) {
            (false, _, false) => LinkShape::Plain,
            (true, false, true) => LinkShape::AnchoredWithAlias,
            (true, false, false) => LinkShape::Anchored,
            (false, _, true) => LinkShape::Aliased,
            (true, true, true) => LinkShape::SelfAnchoredWithAlias,
            (true, true, false) => LinkShape::SelfAnchored,
        }
    }
}

/// Resolves the references of one document against the path index
#[derive(Debug, Clone, Copy)]
pub struct LinkResolver<'a> {
    index: &'a PathIndex,
    path: &'a str,
    display_name: &'a str,
}

impl<'a> LinkResolver<'a> {
    /// Resolver for the document at `path` shown as `display_name`
    pub fn new(index: &'a PathIndex, path: &'a str, display_name: &'a str) -> Self {
        Self {
            index,
            path,
            display_name,
        }
    }

    /// Resolve a document's merged references, in order
    ///
    /// Embeds whose target is not an indexed document (images, PDFs, ...)
    /// are dropped entirely instead of being reported as dangling links.
    pub fn resolve_all(&self, references: &[ReferenceRef<'_>]) -> Vec<NormalizedLink> {
        references
            .iter()
            .filter(|r| r.kind == ReferenceKind::Link || self.is_indexed_embed(r.reference))
            .map(|r| self.resolve(r.reference))
            .collect()
    }

    /// Whether an embed points at an indexed document
    fn is_indexed_embed(&self, reference: &RawReference) -> bool {
        let target = LinkTarget::parse(&reference.link);
        self.index.contains(target.clean())
    }

    /// Resolve a single reference
    pub fn resolve(&self, reference: &RawReference) -> NormalizedLink {
        let target = LinkTarget::parse(&reference.link);
        let alias = reference.display_text.as_deref().unwrap_or("");
        let lookup = |name: &str| self.index.resolve(name).map(str::to_string);

        match LinkShape::classify(LinkTraits::of(&target, alias)) {
            LinkShape::Plain => NormalizedLink::new(target.full(), lookup(target.full())),
            LinkShape::AnchoredWithAlias => NormalizedLink::new(target.full(), lookup(target.clean()))
                .with_clean_link(target.clean())
                .with_display_text(alias),
            LinkShape::Anchored => NormalizedLink::new(target.full(), lookup(target.clean()))
                .with_clean_link(target.clean()),
            LinkShape::Aliased => NormalizedLink::new(target.full(), lookup(target.full()))
                .with_display_text(alias),
            LinkShape::SelfAnchoredWithAlias => NormalizedLink::new(target.full(), Some(self.path.to_string()))
                .with_clean_link(self.display_name)
                .with_display_text(alias),
            LinkShape::SelfAnchored => NormalizedLink::new(target.full(), Some(self.path.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::FactCache;

    fn index() -> PathIndex {
        PathIndex::build(["folder/Note A.md", "B.md", "deep/dir/C.md"])
    }

    fn resolve(link: &str, alias: Option<&str>) -> NormalizedLink {
        let index = index();
        let resolver = LinkResolver::new(&index, "B.md", "B");
        let mut reference = RawReference::new(link);
        if let Some(alias) = alias {
            reference = reference.with_display(alias);
        }
        resolver.resolve(&reference)
    }

    // === LinkTarget ===

    #[test]
    fn test_target_strips_path_prefix() {
        let target = LinkTarget::parse("folder/sub/Note");
        assert_eq!(target.full(), "Note");
        assert_eq!(target.clean(), "Note");
        assert_eq!(target.anchor(), None);
    }

    #[test]
    fn test_target_keeps_slash_inside_anchor() {
        let target = LinkTarget::parse("folder/Note#Input/Output");
        assert_eq!(target.full(), "Note#Input/Output");
        assert_eq!(target.clean(), "Note");
        assert_eq!(target.anchor(), Some("Input/Output"));
    }

    #[test]
    fn test_target_same_document() {
        let target = LinkTarget::parse("#Heading");
        assert!(target.is_same_document());
        assert_eq!(target.clean(), "");
        assert_eq!(target.anchor(), Some("Heading"));
    }

    #[test]
    fn test_target_nested_anchor() {
        let target = LinkTarget::parse("Note#H1#H2");
        assert_eq!(target.clean(), "Note");
        assert_eq!(target.anchor(), Some("H1#H2"));
    }

    // === Classification ===

    #[test]
    fn test_classify_all_shapes() {
        let cases = [
            ("Note", "", LinkShape::Plain),
            ("Note", "Note", LinkShape::Plain),
            ("Note#H", "custom", LinkShape::AnchoredWithAlias),
            ("Note#H", "", LinkShape::Anchored),
            ("Note#H", "Note#H", LinkShape::Anchored),
            ("Note#H", "H", LinkShape::Anchored),
            ("Note#H", "Note > H", LinkShape::Anchored),
            ("Note#H", "Note#H > x", LinkShape::Anchored),
            ("Note#H", "Issue #42", LinkShape::AnchoredWithAlias),
            ("Note", "custom", LinkShape::Aliased),
            ("#H", "custom", LinkShape::SelfAnchoredWithAlias),
            ("#H", "#H", LinkShape::SelfAnchored),
            ("#H", "", LinkShape::SelfAnchored),
        ];

        for (link, alias, expected) in cases {
            let target = LinkTarget::parse(link);
            let shape = LinkShape::classify(LinkTraits::of(&target, alias));
            assert_eq!(shape, expected, "link {:?} alias {:?}", link, alias);
        }
    }

    #[test]
    fn test_rendered_nested_anchor_is_not_alias() {
        let target = LinkTarget::parse("Note#H1#H2");
        let traits = LinkTraits::of(&target, "Note > H1 > H2");
        assert!(!traits.has_alias);
    }

    // === Resolution ===

    #[test]
    fn test_plain_link_resolves() {
        assert_eq!(
            resolve("Note A", None),
            NormalizedLink::new("Note A", Some("folder/Note A.md".to_string()))
        );
    }

    #[test]
    fn test_anchored_link_with_alias() {
        assert_eq!(
            resolve("Note A#Heading", Some("custom text")),
            NormalizedLink::new("Note A#Heading", Some("folder/Note A.md".to_string()))
                .with_clean_link("Note A")
                .with_display_text("custom text")
        );
    }

    #[test]
    fn test_anchored_link_without_alias() {
        assert_eq!(
            resolve("folder/Note A#^block", Some("Note A > ^block")),
            NormalizedLink::new("Note A#^block", Some("folder/Note A.md".to_string()))
                .with_clean_link("Note A")
        );
    }

    #[test]
    fn test_alias_containing_hash_is_kept() {
        assert_eq!(
            resolve("Note A#Open", Some("Issue #42")),
            NormalizedLink::new("Note A#Open", Some("folder/Note A.md".to_string()))
                .with_clean_link("Note A")
                .with_display_text("Issue #42")
        );
    }

    #[test]
    fn test_aliased_link() {
        assert_eq!(
            resolve("deep/dir/C", Some("see C")),
            NormalizedLink::new("C", Some("deep/dir/C.md".to_string())).with_display_text("see C")
        );
    }

    #[test]
    fn test_same_document_with_alias() {
        assert_eq!(
            resolve("#Heading", Some("jump")),
            NormalizedLink::new("#Heading", Some("B.md".to_string()))
                .with_clean_link("B")
                .with_display_text("jump")
        );
    }

    #[test]
    fn test_same_document_without_alias() {
        assert_eq!(
            resolve("#Heading", Some("#Heading")),
            NormalizedLink::new("#Heading", Some("B.md".to_string()))
        );
    }

    #[test]
    fn test_dangling_links_keep_shape() {
        assert_eq!(resolve("Ghost", None), NormalizedLink::new("Ghost", None));
        assert_eq!(
            resolve("Ghost#Part", Some("spooky")),
            NormalizedLink::new("Ghost#Part", None)
                .with_clean_link("Ghost")
                .with_display_text("spooky")
        );
        assert_eq!(
            resolve("Ghost", Some("boo")),
            NormalizedLink::new("Ghost", None).with_display_text("boo")
        );
    }

    #[test]
    fn test_resolve_all_filters_attachment_embeds() {
        let index = index();
        let resolver = LinkResolver::new(&index, "B.md", "B");
        let cache = FactCache {
            links: vec![RawReference::new("Ghost").at(0)],
            embeds: vec![
                RawReference::new("assets/diagram.png").at(10),
                RawReference::new("folder/Note A#Intro").with_display("Note A > Intro").at(20),
                RawReference::new("#Local").at(30),
            ],
            ..FactCache::default()
        };

        let links = resolver.resolve_all(&cache.references());
        assert_eq!(
            links,
            vec![
                NormalizedLink::new("Ghost", None),
                NormalizedLink::new("Note A#Intro", Some("folder/Note A.md".to_string()))
                    .with_clean_link("Note A"),
            ]
        );
    }

    #[test]
    fn test_resolve_all_preserves_order() {
        let index = index();
        let resolver = LinkResolver::new(&index, "B.md", "B");
        let cache = FactCache {
            links: vec![RawReference::new("C"), RawReference::new("Note A"), RawReference::new("C")],
            ..FactCache::default()
        };
        let names: Vec<String> = resolver
            .resolve_all(&cache.references())
            .into_iter()
            .map(|l| l.link)
            .collect();
        assert_eq!(names, vec!["C", "Note A", "C"]);
    }
}
