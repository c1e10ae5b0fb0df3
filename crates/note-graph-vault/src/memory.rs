//! In-memory vault, primarily for tests and exploration.

use std::collections::BTreeMap;

use note_graph_core::{LinkRef, NoteRef};

use crate::resolver::LinkResolver;
use crate::wikilink::strip_fragment;

/// A vault held entirely in memory.
///
/// Notes are added with their outgoing link texts; backlinks are derived on
/// demand by scanning the forward links, which is fine at test scale.
#[derive(Debug, Clone, Default)]
pub struct MemoryVault {
    /// Path -> outgoing links, sorted for deterministic traversal.
    notes: BTreeMap<String, Vec<LinkRef>>,
}

impl MemoryVault {
    /// Create an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a note with the given outgoing link texts. Replaces any existing
    /// note at the same path. Returns self for chaining.
    pub fn with_note<I, S>(mut self, path: &str, links: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_note(path, links);
        self
    }

    /// Add a note with the given outgoing link texts.
    pub fn add_note<I, S>(&mut self, path: &str, links: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let links = links.into_iter().map(|l| LinkRef::new(l.into())).collect();
        self.notes.insert(path.to_string(), links);
    }

    /// Look up a note handle by exact path.
    pub fn note(&self, path: &str) -> Option<NoteRef> {
        self.notes.contains_key(path).then(|| NoteRef::from_path(path))
    }

    fn resolve_path(&self, link_text: &str) -> Option<&str> {
        let text = strip_fragment(link_text).trim();
        if text.is_empty() {
            return None;
        }

        if let Some((path, _)) = self.notes.get_key_value(text) {
            return Some(path);
        }
        let with_md = format!("{text}.md");
        if let Some((path, _)) = self.notes.get_key_value(with_md.as_str()) {
            return Some(path);
        }

        // Bare-name resolution: first note whose basename matches, in path
        // order so ties are deterministic.
        self.notes
            .keys()
            .find(|path| NoteRef::from_path(path.as_str()).basename == text)
            .map(|path| path.as_str())
    }
}

impl LinkResolver for MemoryVault {
    fn resolve_link(&self, link_text: &str, _context_path: &str) -> Option<NoteRef> {
        self.resolve_path(link_text).map(NoteRef::from_path)
    }

    fn links_of(&self, note: &NoteRef) -> Vec<LinkRef> {
        self.notes.get(note.path.as_str()).cloned().unwrap_or_default()
    }

    fn backlinks_of(&self, note: &NoteRef) -> Vec<NoteRef> {
        // A note linking to itself is its own backlink, same as FsVault's
        // reverse-reference index.
        self.notes
            .iter()
            .filter(|(_, links)| {
                links
                    .iter()
                    .any(|l| self.resolve_path(&l.link) == Some(note.path.as_str()))
            })
            .map(|(source, _)| NoteRef::from_path(source.as_str()))
            .collect()
    }
}
