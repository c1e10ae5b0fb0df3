//! Links command implementation: one note's outgoing links, backlinks, and
//! attachments.

use std::path::PathBuf;

use anyhow::Result;
use note_graph_vault::LinkResolver;

use crate::config::Config;

/// Execute the links command.
pub fn execute(config: &Config, root_query: &str, vault: Option<PathBuf>) -> Result<()> {
    let vault = super::open_vault(config, vault)?;
    let note = super::resolve_root(&vault, root_query)?;

    println!("🔗 {}", note.path);

    let links = vault.links_of(&note);
    println!("\nOutgoing links ({}):", links.len());
    if links.is_empty() {
        println!("   (none)");
    }
    for link in &links {
        match vault.resolve_link(&link.link, &note.path) {
            Some(target) => println!("   {} -> {}", link.display_text, target.path),
            None => println!("   {} -> (dangling)", link.display_text),
        }
    }

    let backlinks = vault.backlinks_of(&note);
    println!("\nBacklinks ({}):", backlinks.len());
    if backlinks.is_empty() {
        println!("   (none)");
    }
    for source in &backlinks {
        println!("   {}", source.path);
    }

    let attachments = vault.embeds_of(&note);
    println!("\nAttachments ({}):", attachments.len());
    if attachments.is_empty() {
        println!("   (none)");
    }
    for attachment in &attachments {
        println!("   {} [{}]", attachment.path, attachment.kind.label());
    }

    Ok(())
}
