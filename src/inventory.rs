//! Listing of everything in the vault that is not a markdown document

use serde::{Deserialize, Serialize};

use crate::facts::{EntryKind, VaultEntry};
use crate::util;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FolderEntry {
    pub name: String,
    pub relative_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileEntry {
    /// File name with extension
    pub name: String,
    /// File name without extension
    pub basename: String,
    pub relative_path: String,
}

/// Folders and non-markdown files of the vault
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub folders: Vec<FolderEntry>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub non_md_files: Vec<FileEntry>,
}

/// Build the inventory; `None` when there are neither folders nor
/// non-markdown files
pub fn build_inventory(entries: &[VaultEntry]) -> Option<Inventory> {
    let folders: Vec<FolderEntry> = entries
        .iter()
        .filter(|e| e.kind == EntryKind::Folder)
        .map(|e| FolderEntry {
            name: util::last_segment(&e.path).to_string(),
            relative_path: e.path.clone(),
        })
        .collect();

    let non_md_files: Vec<FileEntry> = entries
        .iter()
        .filter(|e| e.kind == EntryKind::File && !util::is_markdown_path(&e.path))
        .map(|e| FileEntry {
            name: util::last_segment(&e.path).to_string(),
            basename: util::file_basename(&e.path).to_string(),
            relative_path: e.path.clone(),
        })
        .collect();

    if folders.is_empty() && non_md_files.is_empty() {
        return None;
    }

    Some(Inventory { folders, non_md_files })
}
