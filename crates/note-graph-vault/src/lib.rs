//! Document-store boundary for note-graph.
//!
//! The engine only ever talks to a [`LinkResolver`]; everything else in this
//! crate is an implementation of that seam. [`FsVault`] scans a directory of
//! Markdown notes and indexes their wikilinks; [`MemoryVault`] is a hash-map
//! vault for tests and exploration.

mod error;
mod fs;
mod memory;
mod resolver;
mod wikilink;

pub use error::{VaultError, VaultResult};
pub use fs::FsVault;
pub use memory::MemoryVault;
pub use resolver::LinkResolver;
pub use wikilink::{extract_wikilinks, ExtractedLinks};
