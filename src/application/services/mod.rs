//! Application services
//!
//! Concrete service implementations that orchestrate domain logic.
//! Services depend on I/O boundary traits (FileSystem, CommandRunner)
//! but are themselves concrete structs, not traits.

mod loader;
mod render;

pub use loader::{LoadedTrie, TrieLoader};
pub use render::{output_file, output_stem, DiagramRenderer, GraphvizRenderer, RenderService};
