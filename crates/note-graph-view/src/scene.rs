//! Scene assembly: visuals, render cap, and SVG output.

use std::collections::HashMap;
use std::fmt::Write as _;

use note_graph_core::{LinkGraph, NodeKind};
use thiserror::Error;
use tracing::warn;

use crate::layout::{Layout, Pos};

/// Cap on rendered node glyphs, bounding drawing cost on large graphs.
/// The central node is always within the cap because it is discovered first.
pub const MAX_RENDERED_NODES: usize = 30;

/// Errors raised while assembling a scene.
///
/// These are contained at the rendering boundary: the caller replaces the
/// partial output with an inline error message and does not retry.
#[derive(Debug, Error)]
pub enum SceneError {
    /// A laid-out position is NaN or infinite.
    #[error("Malformed geometry for node {id}")]
    MalformedGeometry { id: String },
}

/// Fill color for a node kind. Matches the legend: the central file is red,
/// outlinks green, inlinks yellow, mutual links purple.
pub fn node_color(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Central => "#e04c4c",
        NodeKind::Outlink => "#4caf50",
        NodeKind::Inlink => "#e6b422",
        NodeKind::Both => "#9b59b6",
    }
}

/// Glyph radius; the central node is drawn larger.
pub fn node_radius(kind: NodeKind) -> f64 {
    match kind {
        NodeKind::Central => 10.0,
        NodeKind::Outlink | NodeKind::Inlink | NodeKind::Both => 6.0,
    }
}

/// One node circle plus its label.
#[derive(Debug, Clone, PartialEq)]
pub struct NodeGlyph {
    pub id: String,
    pub label: String,
    pub pos: Pos,
    pub radius: f64,
    pub color: &'static str,
}

/// One straight edge line between two laid-out nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeSegment {
    pub from: Pos,
    pub to: Pos,
    /// True when the segment touches the central node.
    pub touches_root: bool,
}

/// Drawable description of one rendered graph.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    pub glyphs: Vec<NodeGlyph>,
    pub segments: Vec<EdgeSegment>,
    /// Present when the node cap truncated the glyph list:
    /// `(shown, total)` counts for the overflow message.
    pub overflow: Option<(usize, usize)>,
}

impl Scene {
    /// Assemble a scene from a graph and its layout.
    ///
    /// At most [`MAX_RENDERED_NODES`] glyphs are emitted, in discovery
    /// order. Every edge whose two endpoints were laid out becomes a
    /// segment; an edge with a missing endpoint is skipped.
    pub fn build(graph: &LinkGraph, layout: &Layout) -> Result<Scene, SceneError> {
        let mut positions: HashMap<&str, Pos> = HashMap::new();
        for (id, pos) in layout.iter() {
            if !pos.x.is_finite() || !pos.y.is_finite() {
                return Err(SceneError::MalformedGeometry { id: id.to_string() });
            }
            positions.insert(id, pos);
        }

        let mut segments = Vec::with_capacity(graph.edges.len());
        for edge in &graph.edges {
            let (Some(&from), Some(&to)) = (
                positions.get(edge.source.as_str()),
                positions.get(edge.target.as_str()),
            ) else {
                warn!(source = %edge.source, target = %edge.target, "edge endpoint missing, skipped");
                continue;
            };
            segments.push(EdgeSegment {
                from,
                to,
                touches_root: edge.source == graph.root || edge.target == graph.root,
            });
        }

        let total = graph.nodes.len();
        let shown = total.min(MAX_RENDERED_NODES);
        let mut glyphs = Vec::with_capacity(shown);
        for node in graph.nodes.iter().take(MAX_RENDERED_NODES) {
            let Some(&pos) = positions.get(node.id.as_str()) else {
                continue;
            };
            glyphs.push(NodeGlyph {
                id: node.id.clone(),
                label: node.name.clone(),
                pos,
                radius: node_radius(node.kind),
                color: node_color(node.kind),
            });
        }

        Ok(Scene {
            glyphs,
            segments,
            overflow: (total > MAX_RENDERED_NODES).then_some((shown, total)),
        })
    }

    /// Serialize the scene as a standalone SVG document.
    pub fn to_svg(&self) -> String {
        let mut svg = String::new();
        let _ = writeln!(
            svg,
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="-150 -150 300 300">"#
        );

        for segment in &self.segments {
            let stroke = if segment.touches_root { "#888888" } else { "#bbbbbb" };
            let _ = writeln!(
                svg,
                r#"  <line x1="{:.2}" y1="{:.2}" x2="{:.2}" y2="{:.2}" stroke="{}" stroke-width="1"/>"#,
                segment.from.x, segment.from.y, segment.to.x, segment.to.y, stroke
            );
        }

        for glyph in &self.glyphs {
            let _ = writeln!(
                svg,
                r#"  <circle cx="{:.2}" cy="{:.2}" r="{}" fill="{}"/>"#,
                glyph.pos.x, glyph.pos.y, glyph.radius, glyph.color
            );
            let _ = writeln!(
                svg,
                r#"  <text x="{:.2}" y="{:.2}" font-size="8">{}</text>"#,
                glyph.pos.x + 10.0,
                glyph.pos.y,
                escape_xml(&glyph.label)
            );
        }

        if let Some((shown, total)) = self.overflow {
            let _ = writeln!(
                svg,
                r#"  <text x="0" y="120" text-anchor="middle" font-size="9">showing {shown} of {total} notes</text>"#
            );
        }

        svg.push_str("</svg>\n");
        svg
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::radial_layout;
    use note_graph_core::{GraphEdge, GraphNode, LinkDirection};

    fn chain_graph(extra_nodes: usize) -> LinkGraph {
        let mut nodes = vec![GraphNode {
            id: "root.md".into(),
            name: "root".into(),
            kind: NodeKind::Central,
            level: 0,
        }];
        let mut edges = Vec::new();
        for i in 0..extra_nodes {
            nodes.push(GraphNode {
                id: format!("n{i}.md"),
                name: format!("n{i}"),
                kind: NodeKind::Outlink,
                level: 1,
            });
            edges.push(GraphEdge {
                source: "root.md".into(),
                target: format!("n{i}.md"),
                direction: LinkDirection::Outgoing,
            });
        }
        LinkGraph {
            root: "root.md".into(),
            nodes,
            edges,
        }
    }

    #[test]
    fn cap_keeps_root_and_reports_overflow() {
        let graph = chain_graph(40);
        let layout = radial_layout(&graph);
        let scene = Scene::build(&graph, &layout).unwrap();

        assert_eq!(scene.glyphs.len(), MAX_RENDERED_NODES);
        assert_eq!(scene.glyphs[0].id, "root.md");
        assert_eq!(scene.overflow, Some((MAX_RENDERED_NODES, 41)));
        // Edges are not capped; every endpoint was laid out.
        assert_eq!(scene.segments.len(), 40);
    }

    #[test]
    fn small_graph_has_no_overflow() {
        let graph = chain_graph(3);
        let layout = radial_layout(&graph);
        let scene = Scene::build(&graph, &layout).unwrap();
        assert_eq!(scene.glyphs.len(), 4);
        assert!(scene.overflow.is_none());
    }

    #[test]
    fn edge_with_missing_endpoint_is_skipped() {
        let mut graph = chain_graph(2);
        graph.edges.push(GraphEdge {
            source: "root.md".into(),
            target: "phantom.md".into(),
            direction: LinkDirection::Outgoing,
        });
        let layout = radial_layout(&graph);
        let scene = Scene::build(&graph, &layout).unwrap();
        assert_eq!(scene.segments.len(), 2);
    }

    #[test]
    fn colors_follow_the_legend() {
        assert_eq!(node_color(NodeKind::Central), "#e04c4c");
        assert_eq!(node_color(NodeKind::Outlink), "#4caf50");
        assert_eq!(node_color(NodeKind::Inlink), "#e6b422");
        assert_eq!(node_color(NodeKind::Both), "#9b59b6");
        assert_eq!(node_radius(NodeKind::Central), 10.0);
        assert_eq!(node_radius(NodeKind::Both), 6.0);
    }

    #[test]
    fn svg_contains_nodes_edges_and_labels() {
        let graph = chain_graph(1);
        let layout = radial_layout(&graph);
        let svg = Scene::build(&graph, &layout).unwrap().to_svg();

        assert!(svg.starts_with("<svg"));
        assert!(svg.contains("<circle"));
        assert!(svg.contains("<line"));
        assert!(svg.contains(">n0<"));
        assert!(svg.trim_end().ends_with("</svg>"));
    }
}
