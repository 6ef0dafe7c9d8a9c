//! Vault path resolution module
//!
//! Determines where the vault lives and where each output file goes:
//! - Vault root from `--vault` or the VAULT_INDEX_VAULT environment variable
//! - Configuration directory (`.obsidian` unless VAULT_INDEX_CONFIG_DIR says otherwise)
//! - Output files under `<vault>/<config dir>/plugins/metadata-extractor/`
//!   unless the settings name an explicit path

use std::io;
use std::path::{Path, PathBuf};

use crate::constants as C;
use crate::error::{Error, Result};
use crate::settings::ExtractorSettings;

/// The outputs a run can write
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputKind {
    Metadata,
    Tags,
    Inventory,
}

/// Resolution context for one invocation
#[derive(Debug, Clone)]
pub struct ResolveContext {
    /// Canonical vault root
    pub vault: PathBuf,
    /// Configuration directory name inside the vault
    pub config_dir: String,
    pub settings: ExtractorSettings,
}

impl ResolveContext {
    /// Create a context, reading overrides from the environment
    ///
    /// `vault` wins over VAULT_INDEX_VAULT; with neither the base path cannot
    /// be determined and the run must not start.
    pub fn new(vault: Option<&Path>, settings: ExtractorSettings) -> Result<Self> {
        // Treat empty strings as unset
        let env_vault = std::env::var(C::ENV_VAULT).ok().filter(|s| !s.is_empty());
        let config_dir = std::env::var(C::ENV_CONFIG_DIR)
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| C::DEFAULT_CONFIG_DIR.to_string());

        let vault = match (vault, env_vault) {
            (Some(path), _) => path.to_path_buf(),
            (None, Some(env)) => PathBuf::from(env),
            (None, None) => return Err(Error::MissingBasePath { var: C::ENV_VAULT }),
        };

        Self::with_vault(vault, config_dir, settings)
    }

    /// Create a context for an explicit vault root and config dir
    pub fn with_vault(vault: PathBuf, config_dir: String, settings: ExtractorSettings) -> Result<Self> {
        if !vault.is_dir() {
            let source = io::Error::new(io::ErrorKind::NotFound, "vault directory does not exist");
            return Err(Error::io(vault, source));
        }
        // dunce avoids UNC prefixes on Windows
        let vault = dunce::canonicalize(&vault).map_err(|e| Error::io(&vault, e))?;

        Ok(Self {
            vault,
            config_dir,
            settings,
        })
    }

    /// Directory the plugin writes its files to
    pub fn plugin_dir(&self) -> PathBuf {
        self.vault
            .join(&self.config_dir)
            .join("plugins")
            .join(C::PLUGIN_DIR)
    }

    /// Default location of the fact snapshot
    pub fn default_snapshot_path(&self) -> PathBuf {
        self.plugin_dir().join(C::DEFAULT_SNAPSHOT_FILE)
    }

    /// Where an output goes: explicit settings path, else the plugin folder
    pub fn output_path(&self, kind: OutputKind) -> PathBuf {
        let s = &self.settings;
        let (explicit, file) = match kind {
            OutputKind::Metadata => (&s.metadata_path, &s.metadata_file),
            OutputKind::Tags => (&s.tag_path, &s.tag_file),
            OutputKind::Inventory => (&s.all_except_md_path, &s.all_except_md_file),
        };

        match explicit {
            Some(path) => path.clone(),
            None => self.plugin_dir().join(file),
        }
    }
}
