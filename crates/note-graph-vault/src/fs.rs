//! Filesystem-backed vault: scans a directory of Markdown notes.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use note_graph_core::{LinkRef, NoteKind, NoteRef};
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::{VaultError, VaultResult};
use crate::resolver::LinkResolver;
use crate::wikilink::{extract_wikilinks, strip_fragment};

/// Per-note data captured during the scan.
#[derive(Debug, Clone)]
struct NoteData {
    note: NoteRef,
    links: Vec<LinkRef>,
    embeds: Vec<LinkRef>,
}

/// A vault rooted at a directory on disk.
///
/// Opening the vault walks the tree once, indexes every file, extracts
/// wikilinks from Markdown notes, and builds the basename and
/// reverse-reference indexes. The vault is a read-only snapshot; reopen it to
/// pick up changes on disk.
#[derive(Debug)]
pub struct FsVault {
    root: PathBuf,
    /// Vault-relative path -> note data, sorted for deterministic iteration.
    notes: BTreeMap<String, NoteData>,
    /// Basename -> sorted candidate paths.
    basenames: HashMap<String, Vec<String>>,
    /// Target path -> sorted source paths that link to it.
    backlinks: HashMap<String, Vec<String>>,
}

impl FsVault {
    /// Open and scan the vault at `root`.
    pub fn open(root: impl Into<PathBuf>) -> VaultResult<Self> {
        let root = root.into();
        if !root.is_dir() {
            return Err(VaultError::VaultNotFound { path: root });
        }

        let mut notes = BTreeMap::new();
        let mut basenames: HashMap<String, Vec<String>> = HashMap::new();

        let walker = WalkDir::new(&root).into_iter().filter_entry(|entry| {
            // Skip hidden entries such as .obsidian and .git.
            entry.depth() == 0
                || !entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| name.starts_with('.'))
        });

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            let rel = entry
                .path()
                .strip_prefix(&root)
                .unwrap_or(entry.path());
            let Some(rel) = rel.to_str() else {
                return Err(VaultError::NonUtf8Path {
                    path: entry.path().to_path_buf(),
                });
            };
            let rel = rel.replace('\\', "/");

            let note = NoteRef::from_path(rel.clone());
            let (links, embeds) = if note.kind == NoteKind::Markdown {
                let content = std::fs::read_to_string(entry.path())?;
                let found = extract_wikilinks(&content);
                (found.links, found.embeds)
            } else {
                (Vec::new(), Vec::new())
            };

            debug!(path = %rel, links = links.len(), embeds = embeds.len(), "indexed");
            basenames
                .entry(note.basename.clone())
                .or_default()
                .push(rel.clone());
            notes.insert(rel, NoteData { note, links, embeds });
        }

        for paths in basenames.values_mut() {
            paths.sort();
        }

        let mut vault = Self {
            root,
            notes,
            basenames,
            backlinks: HashMap::new(),
        };
        vault.build_backlinks();

        info!(
            vault = %vault.root.display(),
            notes = vault.notes.len(),
            "vault scanned"
        );
        Ok(vault)
    }

    /// Build the reverse-reference index from the forward links.
    fn build_backlinks(&mut self) {
        let mut backlinks: HashMap<String, Vec<String>> = HashMap::new();
        let mut seen: HashSet<(String, String)> = HashSet::new();

        for (source_path, data) in &self.notes {
            for link in &data.links {
                let Some(target) = self.resolve_data(&link.link) else {
                    continue;
                };
                let key = (target.note.path.clone(), source_path.clone());
                if seen.insert(key) {
                    backlinks
                        .entry(target.note.path.clone())
                        .or_default()
                        .push(source_path.clone());
                }
            }
        }

        for sources in backlinks.values_mut() {
            sources.sort();
        }
        self.backlinks = backlinks;
    }

    /// Resolve link text against the vault index.
    ///
    /// Tries, in order: the exact path, the path with `.md` appended, then
    /// the basename index. Ambiguous basenames resolve to the
    /// lexicographically smallest path so graphs are deterministic.
    fn resolve_data(&self, link_text: &str) -> Option<&NoteData> {
        let text = strip_fragment(link_text).trim();
        if text.is_empty() {
            return None;
        }

        if let Some(data) = self.notes.get(text) {
            return Some(data);
        }
        let with_md = format!("{text}.md");
        if let Some(data) = self.notes.get(with_md.as_str()) {
            return Some(data);
        }

        let base = text.rsplit('/').next().unwrap_or(text);
        let base = match base.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => base,
        };
        let candidates = self.basenames.get(base)?;

        if text.contains('/') {
            // Subpath form: require the candidate to end with the given path.
            candidates
                .iter()
                .find(|p| p.ends_with(&with_md) || p.ends_with(text))
                .and_then(|p| self.notes.get(p.as_str()))
        } else {
            candidates.first().and_then(|p| self.notes.get(p.as_str()))
        }
    }

    /// Vault root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Number of indexed files.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Whether the vault contains no files.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    /// All indexed files in path order.
    pub fn notes(&self) -> impl Iterator<Item = &NoteRef> {
        self.notes.values().map(|data| &data.note)
    }

    /// Look up a note by its exact vault-relative path.
    pub fn note(&self, path: &str) -> Option<&NoteRef> {
        self.notes.get(path).map(|data| &data.note)
    }

    /// Resolved embed targets of a note; dangling embeds are skipped.
    pub fn embeds_of(&self, note: &NoteRef) -> Vec<NoteRef> {
        let Some(data) = self.notes.get(note.path.as_str()) else {
            return Vec::new();
        };
        data.embeds
            .iter()
            .filter_map(|embed| self.resolve_data(&embed.link))
            .map(|data| data.note.clone())
            .collect()
    }
}

impl LinkResolver for FsVault {
    fn resolve_link(&self, link_text: &str, _context_path: &str) -> Option<NoteRef> {
        self.resolve_data(link_text).map(|data| data.note.clone())
    }

    fn links_of(&self, note: &NoteRef) -> Vec<LinkRef> {
        self.notes
            .get(note.path.as_str())
            .map(|data| data.links.clone())
            .unwrap_or_default()
    }

    fn backlinks_of(&self, note: &NoteRef) -> Vec<NoteRef> {
        let Some(sources) = self.backlinks.get(note.path.as_str()) else {
            return Vec::new();
        };
        sources
            .iter()
            .filter_map(|path| self.notes.get(path.as_str()))
            .map(|data| data.note.clone())
            .collect()
    }
}
