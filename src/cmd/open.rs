//! Shared setup for commands: locate and load the snapshot, run extraction

use std::path::{Path, PathBuf};

use anyhow::Context;
use vault_index::util;
use vault_index::{
    extract, CollisionPolicy, ExtractOptions, Extraction, OutputKind, ResolveContext, VaultSnapshot,
};

/// Everything a command needs from the global options
pub struct Session<'a> {
    pub ctx: &'a ResolveContext,
    pub snapshot_path: PathBuf,
    pub strict: bool,
    pub json: bool,
}

impl<'a> Session<'a> {
    pub fn new(ctx: &'a ResolveContext, snapshot: Option<&Path>, strict: bool, json: bool) -> Self {
        let snapshot_path = snapshot
            .map(Path::to_path_buf)
            .unwrap_or_else(|| ctx.default_snapshot_path());
        Self {
            ctx,
            snapshot_path,
            strict: strict || ctx.settings.strict_names,
            json,
        }
    }

    pub fn options(&self) -> ExtractOptions {
        ExtractOptions {
            collision_policy: if self.strict {
                CollisionPolicy::Strict
            } else {
                CollisionPolicy::LastWriteWins
            },
        }
    }

    pub fn load_snapshot(&self) -> anyhow::Result<VaultSnapshot> {
        tracing::debug!(path = %util::display_path(&self.snapshot_path), "loading snapshot");
        VaultSnapshot::load(&self.snapshot_path).with_context(|| {
            format!(
                "failed to load fact snapshot from {}",
                util::display_path(&self.snapshot_path)
            )
        })
    }

    /// Load the snapshot and run the full pipeline
    pub fn extract(&self) -> anyhow::Result<Extraction> {
        let snapshot = self.load_snapshot()?;
        Ok(extract(&snapshot, &self.options())?)
    }

    /// `out` if given, else the configured location for `kind`
    pub fn output_path(&self, kind: OutputKind, out: Option<PathBuf>) -> PathBuf {
        out.unwrap_or_else(|| self.ctx.output_path(kind))
    }

    /// Report written files on stdout
    pub fn print_written(&self, written: &[(&str, PathBuf)]) -> anyhow::Result<()> {
        if self.json {
            let map: serde_json::Map<String, serde_json::Value> = written
                .iter()
                .map(|(name, path)| (name.to_string(), serde_json::Value::String(util::display_path(path))))
                .collect();
            println!("{}", serde_json::to_string_pretty(&map)?);
        } else {
            for (name, path) in written {
                println!("{}: {}", name, util::display_path(path));
            }
        }
        Ok(())
    }
}
