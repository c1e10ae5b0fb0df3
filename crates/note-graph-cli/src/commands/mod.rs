//! CLI command implementations.

pub mod graph;
pub mod links;
pub mod stats;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use note_graph_core::{NoteKind, NoteRef};
use note_graph_vault::{FsVault, LinkResolver};

use crate::config::Config;

/// Open the vault the command should operate on.
pub(crate) fn open_vault(config: &Config, vault: Option<PathBuf>) -> Result<FsVault> {
    let dir = vault.unwrap_or_else(|| config.vault_dir.clone());
    FsVault::open(&dir).with_context(|| format!("Failed to open vault at {}", dir.display()))
}

/// Resolve the user's root argument to a Markdown note in the vault.
pub(crate) fn resolve_root(vault: &FsVault, query: &str) -> Result<NoteRef> {
    let note = vault
        .resolve_link(query, "")
        .with_context(|| format!("No note matching `{query}` in {}", vault.root().display()))?;
    anyhow::ensure!(
        note.kind == NoteKind::Markdown,
        "`{}` is not a Markdown note",
        note.path
    );
    Ok(note)
}

/// Write a document to a file, or to stdout when no path is given.
pub(crate) fn emit(document: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, document)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            eprintln!("💾 Saved to: {}", path.display());
        }
        None => print!("{document}"),
    }
    Ok(())
}
