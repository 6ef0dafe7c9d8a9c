//! Constants for vault-index
//!
//! File names, markers and environment variable names shared across the
//! crate, kept in one place so the output layout stays consistent.

// === Document Names ===

/// Extension carried by every indexable document
pub const MARKDOWN_EXTENSION: &str = ".md";

/// Separator between path segments in canonical document paths
pub const PATH_SEPARATOR: char = '/';

/// Marker that introduces an anchor fragment inside a link
pub const ANCHOR_MARKER: char = '#';

/// Marker that prefixes a raw tag
pub const TAG_MARKER: char = '#';

/// Separator Obsidian renders between a target and its heading
pub const ANCHOR_DISPLAY_SEPARATOR: &str = " > ";

// === Output Layout ===

/// Default vault configuration directory
pub const DEFAULT_CONFIG_DIR: &str = ".obsidian";

/// Plugin folder (inside `<config dir>/plugins/`) that holds all outputs
pub const PLUGIN_DIR: &str = "metadata-extractor";

/// Default file name for the tag index
pub const DEFAULT_TAG_FILE: &str = "tags.json";

/// Default file name for the document records
pub const DEFAULT_METADATA_FILE: &str = "metadata.json";

/// Default file name for the folder/non-markdown inventory
pub const DEFAULT_ALL_EXCEPT_MD_FILE: &str = "allExceptMd.json";

/// Default file name of the fact snapshot handed over by the metadata cache
pub const DEFAULT_SNAPSHOT_FILE: &str = "snapshot.json";

// === Environment Variables ===

/// Vault root override
pub const ENV_VAULT: &str = "VAULT_INDEX_VAULT";

/// Vault configuration directory override
pub const ENV_CONFIG_DIR: &str = "VAULT_INDEX_CONFIG_DIR";

/// Default log filter when `RUST_LOG` is unset
pub const DEFAULT_LOG_FILTER: &str = "info";
