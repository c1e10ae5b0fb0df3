//! Core domain types shared across the note-graph workspace.

use petgraph::stable_graph::{NodeIndex, StableDiGraph};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// =============================================================================
// Note Identity Types
// =============================================================================

/// File type classification for a note or attachment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoteKind {
    /// A Markdown note, the only kind that participates in link expansion.
    Markdown,
    /// Image attachment (png, jpg, jpeg, gif, svg, webp).
    Image,
    /// Audio attachment (mp3, wav, ogg, m4a).
    Audio,
    /// Video attachment (mp4, webm, ogv, mov).
    Video,
    /// PDF attachment.
    Pdf,
    /// Anything else.
    Other,
}

impl NoteKind {
    /// Classify a file extension (without the dot, any case).
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_ascii_lowercase().as_str() {
            "md" => NoteKind::Markdown,
            "png" | "jpg" | "jpeg" | "gif" | "svg" | "webp" => NoteKind::Image,
            "mp3" | "wav" | "ogg" | "m4a" => NoteKind::Audio,
            "mp4" | "webm" | "ogv" | "mov" => NoteKind::Video,
            "pdf" => NoteKind::Pdf,
            _ => NoteKind::Other,
        }
    }

    /// Get a display label for the kind.
    pub fn label(&self) -> &'static str {
        match self {
            NoteKind::Markdown => "markdown",
            NoteKind::Image => "image",
            NoteKind::Audio => "audio",
            NoteKind::Video => "video",
            NoteKind::Pdf => "pdf",
            NoteKind::Other => "other",
        }
    }
}

/// Handle to a note in a vault, addressed by its vault-relative path.
///
/// The core only reads notes; it never creates, mutates, or deletes them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NoteRef {
    /// Vault-relative path, e.g. `projects/roadmap.md`.
    pub path: String,
    /// File name without directory or extension, e.g. `roadmap`.
    pub basename: String,
    /// File type classified from the extension.
    pub kind: NoteKind,
}

impl NoteRef {
    /// Build a handle from a vault-relative path string.
    pub fn from_path(path: impl Into<String>) -> Self {
        let path = path.into();
        let file_name = path.rsplit('/').next().unwrap_or(path.as_str());
        let (basename, ext) = match file_name.rsplit_once('.') {
            Some((stem, ext)) if !stem.is_empty() => (stem, ext),
            _ => (file_name, ""),
        };
        Self {
            basename: basename.to_string(),
            kind: NoteKind::from_extension(ext),
            path,
        }
    }
}

impl fmt::Display for NoteRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path)
    }
}

/// A single outgoing reference as it appears in a note's body.
///
/// `link` is the linkable identifier (wikilink target text); `display_text`
/// is what the author chose to show, falling back to the link text itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    /// Link target text, e.g. `roadmap` or `projects/roadmap`.
    pub link: String,
    /// Text shown in place of the target, defaults to `link`.
    pub display_text: String,
}

impl LinkRef {
    /// Create a reference whose display text is the link text itself.
    pub fn new(link: impl Into<String>) -> Self {
        let link = link.into();
        Self {
            display_text: link.clone(),
            link,
        }
    }

    /// Create a reference with an explicit display alias.
    pub fn with_alias(link: impl Into<String>, alias: impl Into<String>) -> Self {
        Self {
            link: link.into(),
            display_text: alias.into(),
        }
    }
}

// =============================================================================
// Graph Types
// =============================================================================

/// Relationship of a graph node to the central note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// The root note the graph was built around.
    Central,
    /// Reached through an outgoing link.
    Outlink,
    /// Reached through an incoming link.
    Inlink,
    /// Direct neighbor linked in both directions with the root.
    Both,
}

impl NodeKind {
    /// Get a display label for the kind.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Central => "central",
            NodeKind::Outlink => "outlink",
            NodeKind::Inlink => "inlink",
            NodeKind::Both => "both",
        }
    }
}

/// Direction of a link relative to its source note.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkDirection {
    /// Source links to target.
    Outgoing,
    /// Target is referenced by source (discovered via backlinks).
    Incoming,
}

impl fmt::Display for LinkDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkDirection::Outgoing => write!(f, "out"),
            LinkDirection::Incoming => write!(f, "in"),
        }
    }
}

/// A node in a [`LinkGraph`]. Identity is the note path; no two nodes in one
/// graph share an id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphNode {
    /// Note path, unique within the graph.
    pub id: String,
    /// Note basename, used for labels.
    pub name: String,
    /// Relationship to the central note.
    pub kind: NodeKind,
    /// Link hops from the root at first discovery. 0 iff central.
    pub level: u8,
}

/// A directed edge in a [`LinkGraph`]. Edges are not deduplicated: one pair
/// of nodes may carry both an outgoing and an incoming edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Path of the note the link originates from.
    pub source: String,
    /// Path of the note the link points at.
    pub target: String,
    /// Whether this edge was discovered as an outlink or a backlink.
    pub direction: LinkDirection,
}

/// Aggregate link graph around one central note.
///
/// Built fresh on every render request; never persisted or incrementally
/// updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LinkGraph {
    /// Path of the central note.
    pub root: String,
    /// All nodes, in discovery order. The root is always `nodes[0]`.
    pub nodes: Vec<GraphNode>,
    /// All edges, in discovery order.
    pub edges: Vec<GraphEdge>,
}

impl LinkGraph {
    /// Returns the number of nodes currently tracked.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns the number of edges currently tracked.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Look up a node by its path.
    pub fn node(&self, id: &str) -> Option<&GraphNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Convert to a petgraph StableDiGraph for analysis.
    /// Returns the graph and a mapping from node path to NodeIndex.
    pub fn to_petgraph(
        &self,
    ) -> (
        StableDiGraph<GraphNode, LinkDirection>,
        HashMap<String, NodeIndex>,
    ) {
        let mut graph = StableDiGraph::new();
        let mut id_to_index = HashMap::new();

        for node in &self.nodes {
            let idx = graph.add_node(node.clone());
            id_to_index.insert(node.id.clone(), idx);
        }

        for edge in &self.edges {
            if let (Some(&from_idx), Some(&to_idx)) = (
                id_to_index.get(&edge.source),
                id_to_index.get(&edge.target),
            ) {
                graph.add_edge(from_idx, to_idx, edge.direction);
            }
        }

        (graph, id_to_index)
    }
}

// =============================================================================
// Traversal Depth
// =============================================================================

/// Error produced when parsing a [`Depth`] from user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("depth must be 1, 2 or 3, got `{0}`")]
pub struct DepthOutOfRange(pub String);

/// Maximum number of link hops to expand from the root. Bounded to 1-3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Depth(u8);

impl Depth {
    /// Direct links only.
    pub const ONE: Depth = Depth(1);
    /// Links of links.
    pub const TWO: Depth = Depth(2);
    /// Three hops out.
    pub const THREE: Depth = Depth(3);

    /// All valid depths, shallowest first.
    pub const ALL: [Depth; 3] = [Depth::ONE, Depth::TWO, Depth::THREE];

    /// Get the raw hop count.
    pub fn get(&self) -> u8 {
        self.0
    }
}

impl Default for Depth {
    fn default() -> Self {
        Depth::ONE
    }
}

impl TryFrom<u8> for Depth {
    type Error = DepthOutOfRange;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1..=3 => Ok(Depth(value)),
            other => Err(DepthOutOfRange(other.to_string())),
        }
    }
}

impl From<Depth> for u8 {
    fn from(depth: Depth) -> u8 {
        depth.0
    }
}

impl FromStr for Depth {
    type Err = DepthOutOfRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s.parse().map_err(|_| DepthOutOfRange(s.to_string()))?;
        Depth::try_from(value)
    }
}

impl fmt::Display for Depth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
