//! Graph command implementation.
//!
//! Builds the link graph around a root note, lays it out radially, and emits
//! either the graph + layout as JSON or the rendered scene as SVG.

use std::path::PathBuf;

use anyhow::Result;
use note_graph_core::Depth;
use note_graph_engine::build_graph;
use note_graph_view::{radial_layout, Scene};
use petgraph::Direction;
use tracing::info;

use crate::config::Config;

/// Output document format for the graph command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    Svg,
}

impl std::str::FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "svg" => Ok(Self::Svg),
            _ => anyhow::bail!("Unknown format: {}. Use 'json' or 'svg'", s),
        }
    }
}

/// Execute the graph command.
pub fn execute(
    config: &Config,
    root_query: &str,
    vault: Option<PathBuf>,
    depth: Option<Depth>,
    format: OutputFormat,
    output: Option<PathBuf>,
) -> Result<()> {
    let vault = super::open_vault(config, vault)?;
    let root = super::resolve_root(&vault, root_query)?;
    let depth = depth.unwrap_or(config.default_depth);

    info!(root = %root.path, depth = %depth, "building graph");
    let graph = build_graph(&vault, &root, depth);

    let (pg, index) = graph.to_petgraph();
    let root_idx = index[&graph.root];
    eprintln!("📊 Link graph for: {}", root.basename);
    eprintln!(
        "   Notes: {}  Links: {}  (root: {} out, {} in)",
        graph.node_count(),
        graph.edge_count(),
        pg.edges_directed(root_idx, Direction::Outgoing).count(),
        pg.edges_directed(root_idx, Direction::Incoming).count(),
    );

    let layout = radial_layout(&graph);

    let document = match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(&serde_json::json!({
                "graph": graph,
                "layout": layout,
            }))?;
            json.push('\n');
            json
        }
        OutputFormat::Svg => match Scene::build(&graph, &layout) {
            Ok(scene) => scene.to_svg(),
            Err(err) => {
                // Contained at the rendering boundary: no partial output.
                eprintln!("⚠️  Could not draw the graph: {err}.");
                eprintln!("   Try a different note or a shallower depth.");
                return Ok(());
            }
        },
    };

    super::emit(&document, output.as_deref())
}
