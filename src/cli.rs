use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// vault-index - Link, backlink and tag index builder for markdown vaults
///
/// # Quick Reference
///
/// ```bash
/// vault-index --vault ~/notes all              # Write metadata, tags and inventory
/// vault-index metadata                         # Only the document records
/// vault-index tags --out /tmp/tags.json        # Tag index to a custom path
/// vault-index --json report                    # Run summary as JSON
/// vault-index resolve "Meeting Notes"          # Short name to vault path
/// ```
///
/// ## Inputs
///
/// The fact snapshot (tags, links, embeds, headings, aliases per document,
/// tag counts and the vault listing) is read from
/// `<vault>/.obsidian/plugins/metadata-extractor/snapshot.json` unless
/// `--snapshot` names another JSON or YAML file.
///
/// ## Outputs
///
/// - `metadata.json`: one record per document, with links and backlinks
/// - `tags.json`: every tag with its count and the documents carrying it
/// - `allExceptMd.json`: folders and non-markdown files
///
/// Locations follow the settings file (`tagPath`, `tagFile`, `metadataPath`,
/// `metadataFile`, `allExceptMdPath`, `allExceptMdFile`).
///
/// ## Environment Variables
///
/// - `VAULT_INDEX_VAULT`: vault root when `--vault` is not given
/// - `VAULT_INDEX_CONFIG_DIR`: configuration directory (default: .obsidian)
/// - `RUST_LOG`: log filter (default: info)
#[derive(Parser, Debug)]
#[command(name = "vault-index")]
#[command(version = "0.1.0")]
#[command(about = "Link, backlink and tag index builder for markdown vaults")]
pub struct Cli {
    /// Vault root directory
    #[arg(long, env = "VAULT_INDEX_VAULT", value_name = "PATH", global = true)]
    pub vault: Option<PathBuf>,

    /// Extractor settings file (JSON or YAML)
    #[arg(long, value_name = "FILE", global = true)]
    pub settings: Option<PathBuf>,

    /// Fact snapshot file (JSON or YAML)
    #[arg(long, value_name = "FILE", global = true)]
    pub snapshot: Option<PathBuf>,

    /// Output in JSON format (for scripting)
    #[arg(short = 'j', long, global = true)]
    pub json: bool,

    /// Fail when two documents share a short name
    #[arg(long, global = true)]
    pub strict: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Write the document records (links and backlinks)
    #[command(alias = "m")]
    Metadata {
        /// Output file (default: from settings)
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Write the tag index
    #[command(alias = "t")]
    Tags {
        /// Output file (default: from settings)
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Write the listing of folders and non-markdown files
    Inventory {
        /// Output file (default: from settings)
        #[arg(short, long, value_name = "PATH")]
        out: Option<PathBuf>,
    },

    /// Write every output
    All,

    /// Run the extraction and print a summary
    Report,

    /// Resolve a short link to its vault path
    #[command(alias = "rv")]
    Resolve {
        /// Link target, e.g. "Meeting Notes" or "Meeting Notes#Agenda"
        link: String,
    },
}
