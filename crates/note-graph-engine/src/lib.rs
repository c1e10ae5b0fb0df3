//! Graph construction: bounded-depth link expansion around a central note.
//!
//! [`build_graph`] discovers notes related to a root via outgoing and
//! incoming links, up to a caller-chosen depth, and classifies each node's
//! relationship to the root. The result is a fresh [`LinkGraph`] per call;
//! nothing is cached or incrementally updated.

use std::collections::HashSet;

use note_graph_core::{Depth, GraphEdge, GraphNode, LinkDirection, LinkGraph, NodeKind, NoteRef};
use note_graph_vault::LinkResolver;
use tracing::debug;

/// Build the link graph around `root`, expanding at most `depth` hops.
///
/// Expansion is depth-first per branch: a newly discovered note has its own
/// links expanded immediately, outgoing before incoming, before siblings at
/// the same level are considered. Each note is expanded at most once (the
/// visited set is checked before recursing), which with the depth bound
/// guarantees termination on cyclic link structures.
///
/// Node kind and level are first-write-wins: a note reachable both as an
/// outlink and an inlink keeps whatever it was first discovered as. The one
/// exception is the post-pass that reclassifies direct neighbors of the root
/// as [`NodeKind::Both`] when links run in both directions between them and
/// the root.
pub fn build_graph(resolver: &dyn LinkResolver, root: &NoteRef, depth: Depth) -> LinkGraph {
    let mut expansion = Expansion {
        resolver,
        depth,
        nodes: Vec::new(),
        edges: Vec::new(),
        visited: HashSet::new(),
    };

    expansion.nodes.push(GraphNode {
        id: root.path.clone(),
        name: root.basename.clone(),
        kind: NodeKind::Central,
        level: 0,
    });
    expansion.visited.insert(root.path.clone());
    expansion.expand(root, 1);

    let mut graph = LinkGraph {
        root: root.path.clone(),
        nodes: expansion.nodes,
        edges: expansion.edges,
    };
    reclassify_bidirectional(&mut graph);

    debug!(
        root = %root.path,
        depth = %depth,
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        "graph built"
    );
    graph
}

/// Working state for one expansion run.
struct Expansion<'a> {
    resolver: &'a dyn LinkResolver,
    depth: Depth,
    nodes: Vec<GraphNode>,
    edges: Vec<GraphEdge>,
    visited: HashSet<String>,
}

impl Expansion<'_> {
    /// Expand one note at `current_depth` hops from the root.
    fn expand(&mut self, note: &NoteRef, current_depth: u8) {
        if current_depth > self.depth.get() {
            return;
        }

        for link in self.resolver.links_of(note) {
            let Some(target) = self.resolver.resolve_link(&link.link, &note.path) else {
                // Dangling link: contributes no node and no edge.
                continue;
            };
            self.edges.push(GraphEdge {
                source: note.path.clone(),
                target: target.path.clone(),
                direction: LinkDirection::Outgoing,
            });
            self.visit(&target, NodeKind::Outlink, current_depth);
        }

        for source in self.resolver.backlinks_of(note) {
            self.edges.push(GraphEdge {
                source: source.path.clone(),
                target: note.path.clone(),
                direction: LinkDirection::Incoming,
            });
            self.visit(&source, NodeKind::Inlink, current_depth);
        }
    }

    /// Record a first-time discovery and recurse into it if depth allows.
    fn visit(&mut self, note: &NoteRef, kind: NodeKind, current_depth: u8) {
        if !self.visited.insert(note.path.clone()) {
            return;
        }
        self.nodes.push(GraphNode {
            id: note.path.clone(),
            name: note.basename.clone(),
            kind,
            level: current_depth,
        });
        if current_depth < self.depth.get() {
            self.expand(note, current_depth + 1);
        }
    }
}

/// Reclassify direct neighbors of the root that link both ways.
///
/// Only edges directly touching the root are inspected; transitive
/// bidirectionality at deeper levels keeps the first-visit kind.
fn reclassify_bidirectional(graph: &mut LinkGraph) {
    let root = graph.root.clone();
    let edges = &graph.edges;
    for node in &mut graph.nodes {
        if node.id == root {
            continue;
        }
        let links_to_root = edges
            .iter()
            .any(|e| e.source == node.id && e.target == root);
        let linked_from_root = edges
            .iter()
            .any(|e| e.source == root && e.target == node.id);
        if links_to_root && linked_from_root {
            node.kind = NodeKind::Both;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use note_graph_vault::MemoryVault;

    fn node<'a>(graph: &'a LinkGraph, id: &str) -> &'a GraphNode {
        graph.node(id).unwrap_or_else(|| panic!("no node {id}"))
    }

    #[test]
    fn isolated_note_yields_single_node_at_every_depth() {
        let vault = MemoryVault::new().with_note("lonely.md", Vec::<String>::new());
        let root = vault.note("lonely.md").unwrap();

        for depth in Depth::ALL {
            let graph = build_graph(&vault, &root, depth);
            assert_eq!(graph.node_count(), 1);
            assert_eq!(graph.edge_count(), 0);
            assert_eq!(graph.nodes[0].kind, NodeKind::Central);
            assert_eq!(graph.nodes[0].level, 0);
        }
    }

    #[test]
    fn worked_example_root_outlink_inlink() {
        // A links to B; C links to A; depth 1.
        let vault = MemoryVault::new()
            .with_note("A.md", ["B"])
            .with_note("B.md", Vec::<String>::new())
            .with_note("C.md", ["A"]);
        let root = vault.note("A.md").unwrap();

        let graph = build_graph(&vault, &root, Depth::ONE);

        assert_eq!(graph.node_count(), 3);
        assert_eq!(node(&graph, "A.md").kind, NodeKind::Central);
        assert_eq!(node(&graph, "A.md").level, 0);
        assert_eq!(node(&graph, "B.md").kind, NodeKind::Outlink);
        assert_eq!(node(&graph, "B.md").level, 1);
        assert_eq!(node(&graph, "C.md").kind, NodeKind::Inlink);
        assert_eq!(node(&graph, "C.md").level, 1);

        assert_eq!(
            graph.edges,
            vec![
                GraphEdge {
                    source: "A.md".into(),
                    target: "B.md".into(),
                    direction: LinkDirection::Outgoing,
                },
                GraphEdge {
                    source: "C.md".into(),
                    target: "A.md".into(),
                    direction: LinkDirection::Incoming,
                },
            ]
        );
    }

    #[test]
    fn mutual_direct_neighbors_become_both() {
        let vault = MemoryVault::new()
            .with_note("A.md", ["B"])
            .with_note("B.md", ["A"]);
        let root = vault.note("A.md").unwrap();

        let graph = build_graph(&vault, &root, Depth::ONE);
        assert_eq!(node(&graph, "B.md").kind, NodeKind::Both);
        assert_eq!(node(&graph, "A.md").kind, NodeKind::Central);
    }

    #[test]
    fn deep_mutual_links_keep_first_visit_kind() {
        // B and C link each other, but only B touches the root, so C must
        // not be reclassified.
        let vault = MemoryVault::new()
            .with_note("A.md", ["B"])
            .with_note("B.md", ["C"])
            .with_note("C.md", ["B"]);
        let root = vault.note("A.md").unwrap();

        let graph = build_graph(&vault, &root, Depth::TWO);
        assert_eq!(node(&graph, "C.md").kind, NodeKind::Outlink);
        assert_eq!(node(&graph, "C.md").level, 2);
    }

    #[test]
    fn level_is_bounded_by_depth_and_zero_only_for_root() {
        let vault = MemoryVault::new()
            .with_note("A.md", ["B"])
            .with_note("B.md", ["C"])
            .with_note("C.md", ["D"])
            .with_note("D.md", ["E"])
            .with_note("E.md", Vec::<String>::new());
        let root = vault.note("A.md").unwrap();

        for depth in Depth::ALL {
            let graph = build_graph(&vault, &root, depth);
            for node in &graph.nodes {
                assert!(node.level <= depth.get());
                assert_eq!(node.level == 0, node.id == "A.md");
            }
            // Chain graph: exactly depth hops get discovered.
            assert_eq!(graph.node_count(), depth.get() as usize + 1);
        }
    }

    #[test]
    fn cycles_and_diamonds_never_duplicate_ids() {
        // Diamond: A -> B, A -> C, B -> D, C -> D; plus a cycle back D -> A.
        let vault = MemoryVault::new()
            .with_note("A.md", ["B", "C"])
            .with_note("B.md", ["D"])
            .with_note("C.md", ["D"])
            .with_note("D.md", ["A"]);
        let root = vault.note("A.md").unwrap();

        for depth in Depth::ALL {
            let graph = build_graph(&vault, &root, depth);
            let mut ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
            ids.sort_unstable();
            let before = ids.len();
            ids.dedup();
            assert_eq!(ids.len(), before, "duplicate node ids at depth {depth}");
        }
    }

    #[test]
    fn self_link_adds_edges_but_no_second_node() {
        // A self-link shows up both as an outlink and as a backlink, so the
        // single node carries one edge per direction.
        let vault = MemoryVault::new().with_note("A.md", ["A"]);
        let root = vault.note("A.md").unwrap();

        let graph = build_graph(&vault, &root, Depth::ONE);
        assert_eq!(graph.node_count(), 1);
        assert_eq!(graph.edge_count(), 2);
        assert_eq!(graph.nodes[0].kind, NodeKind::Central);
        let directions: Vec<LinkDirection> =
            graph.edges.iter().map(|e| e.direction).collect();
        assert_eq!(
            directions,
            vec![LinkDirection::Outgoing, LinkDirection::Incoming]
        );
        assert!(graph
            .edges
            .iter()
            .all(|e| e.source == "A.md" && e.target == "A.md"));
    }

    #[test]
    fn expansion_is_depth_first_per_branch() {
        // With depth 2, B's neighbor D must be discovered before the root's
        // second outlink C.
        let vault = MemoryVault::new()
            .with_note("A.md", ["B", "C"])
            .with_note("B.md", ["D"])
            .with_note("C.md", Vec::<String>::new())
            .with_note("D.md", Vec::<String>::new());
        let root = vault.note("A.md").unwrap();

        let graph = build_graph(&vault, &root, Depth::TWO);
        let order: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(order, vec!["A.md", "B.md", "D.md", "C.md"]);
    }

    #[test]
    fn first_write_wins_for_kind_and_level() {
        // B is discovered as an outlink of A at level 1; the later inlink
        // discovery via C must not rewrite it.
        let vault = MemoryVault::new()
            .with_note("A.md", ["B", "C"])
            .with_note("B.md", Vec::<String>::new())
            .with_note("C.md", ["B"]);
        let root = vault.note("A.md").unwrap();

        let graph = build_graph(&vault, &root, Depth::TWO);
        assert_eq!(node(&graph, "B.md").kind, NodeKind::Outlink);
        assert_eq!(node(&graph, "B.md").level, 1);
    }

    #[test]
    fn duplicate_edges_between_non_central_nodes_are_kept() {
        // B links to C and C links to B; both are neighbors of A. The pair
        // carries one outgoing and one incoming edge, undeduplicated.
        let vault = MemoryVault::new()
            .with_note("A.md", ["B", "C"])
            .with_note("B.md", ["C"])
            .with_note("C.md", ["B"]);
        let root = vault.note("A.md").unwrap();

        let graph = build_graph(&vault, &root, Depth::TWO);
        let between: Vec<&GraphEdge> = graph
            .edges
            .iter()
            .filter(|e| {
                (e.source == "B.md" && e.target == "C.md")
                    || (e.source == "C.md" && e.target == "B.md")
            })
            .collect();
        assert!(between.len() >= 2);
    }

    #[test]
    fn dangling_links_are_skipped_silently() {
        let vault = MemoryVault::new().with_note("A.md", ["ghost", "B"]).with_note(
            "B.md",
            Vec::<String>::new(),
        );
        let root = vault.note("A.md").unwrap();

        let graph = build_graph(&vault, &root, Depth::ONE);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }
}
