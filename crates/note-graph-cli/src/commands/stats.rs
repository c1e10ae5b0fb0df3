//! Stats command implementation: vault-wide link statistics.

use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use note_graph_core::NoteKind;
use note_graph_vault::{FsVault, LinkResolver};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::config::Config;

/// Execute the stats command.
pub fn execute(config: &Config, vault: Option<PathBuf>) -> Result<()> {
    let vault = super::open_vault(config, vault)?;

    let (graph, dangling) = vault_graph(&vault);

    let markdown_notes = graph.node_count();
    let total_links: usize = graph.edge_count();

    println!("📚 Vault: {}", vault.root().display());
    println!("   Files: {}  Markdown notes: {}", vault.len(), markdown_notes);
    println!("   Resolved links: {}  Dangling links: {}", total_links, dangling);

    // Most linked = highest in-degree in the vault-wide graph.
    let mut ranked: Vec<(&str, usize)> = graph
        .node_indices()
        .map(|idx| {
            (
                graph[idx].as_str(),
                graph.edges_directed(idx, Direction::Incoming).count(),
            )
        })
        .filter(|(_, in_degree)| *in_degree > 0)
        .collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    println!("\nMost linked notes:");
    if ranked.is_empty() {
        println!("   (no links)");
    }
    for (path, in_degree) in ranked.iter().take(5) {
        println!("   {in_degree:>3}  {path}");
    }

    Ok(())
}

/// Build a vault-wide digraph of Markdown notes and their resolved links.
/// Returns the graph (node weight = path) and the dangling-link count.
fn vault_graph(vault: &FsVault) -> (DiGraph<String, ()>, usize) {
    let mut graph = DiGraph::new();
    let mut index: HashMap<String, NodeIndex> = HashMap::new();
    let mut dangling = 0usize;

    let notes: Vec<_> = vault
        .notes()
        .filter(|n| n.kind == NoteKind::Markdown)
        .cloned()
        .collect();

    for note in &notes {
        let idx = graph.add_node(note.path.clone());
        index.insert(note.path.clone(), idx);
    }

    for note in &notes {
        let from = index[&note.path];
        for link in vault.links_of(note) {
            match vault.resolve_link(&link.link, &note.path) {
                Some(target) => {
                    if let Some(&to) = index.get(&target.path) {
                        graph.add_edge(from, to, ());
                    }
                }
                None => dangling += 1,
            }
        }
    }

    (graph, dangling)
}
