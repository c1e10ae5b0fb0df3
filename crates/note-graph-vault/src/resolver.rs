//! The seam between the graph engine and whatever stores the notes.

use note_graph_core::{LinkRef, NoteRef};

/// Abstraction for anything that can resolve links between notes.
///
/// Dangling links resolve to `None` and contribute nothing to a graph; that
/// is policy, not an error, so none of these operations are fallible.
pub trait LinkResolver {
    /// Resolve link text to an existing note, if any.
    ///
    /// `context_path` is the path of the note the link appears in; stores
    /// that resolve relative links need it, others may ignore it.
    fn resolve_link(&self, link_text: &str, context_path: &str) -> Option<NoteRef>;

    /// All outgoing references that appear in the given note's body.
    fn links_of(&self, note: &NoteRef) -> Vec<LinkRef>;

    /// All notes that reference the given note, via the store's
    /// reverse-reference index.
    fn backlinks_of(&self, note: &NoteRef) -> Vec<NoteRef>;
}
