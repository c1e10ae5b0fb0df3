//! Radial layout: concentric rings around the central note.

use std::collections::BTreeMap;
use std::f64::consts::TAU;

use note_graph_core::LinkGraph;
use serde::{Deserialize, Serialize};

/// Ring radius for level 1 nodes.
pub const BASE_RADIUS: f64 = 50.0;
/// Radius growth per traversal level.
pub const RADIUS_STEP: f64 = 30.0;

/// A point in plane coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pos {
    pub x: f64,
    pub y: f64,
}

impl Pos {
    /// Euclidean distance from the origin.
    pub fn distance_from_origin(&self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }
}

/// Node positions for one laid-out graph, keyed by node id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Layout {
    positions: BTreeMap<String, Pos>,
}

impl Layout {
    /// Position of a node, if it was laid out.
    pub fn get(&self, id: &str) -> Option<Pos> {
        self.positions.get(id).copied()
    }

    /// Number of positioned nodes.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// Whether no nodes were positioned.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Iterate over `(id, position)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Pos)> {
        self.positions.iter().map(|(id, pos)| (id.as_str(), *pos))
    }
}

/// Assign plane coordinates to every node of the graph.
///
/// The central node sits at the origin. Every other node is placed on a ring
/// of radius `BASE_RADIUS + RADIUS_STEP * level` at angle `i * 2π / n`, where
/// `i` is the node's position in discovery order and `n` the total node
/// count. Even angular distribution only; overlap is possible and accepted.
pub fn radial_layout(graph: &LinkGraph) -> Layout {
    let total = graph.nodes.len();
    let mut positions = BTreeMap::new();

    for (index, node) in graph.nodes.iter().enumerate() {
        let pos = if node.id == graph.root {
            Pos::default()
        } else {
            let angle = index as f64 * (TAU / total as f64);
            let radius = BASE_RADIUS + f64::from(node.level) * RADIUS_STEP;
            Pos {
                x: radius * angle.cos(),
                y: radius * angle.sin(),
            }
        };
        positions.insert(node.id.clone(), pos);
    }

    Layout { positions }
}
