//! Domain layer: trie model, styling rules and the trie-to-diagram walk
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod diagram;
pub mod dot;
pub mod error;
pub mod style;
pub mod tree_view;
pub mod trie;
pub mod walker;

pub use diagram::{Diagram, DiagramEdge, DiagramNode, DiagramSink};
pub use dot::to_dot;
pub use error::{DomainError, DomainResult};
pub use style::{present, Color, CountPolicy, NodeKind, NodeStyle, Presentation, Shape, ROOT_LABEL};
pub use tree_view::TreeView;
pub use trie::{TrieDocument, TrieMetadata, TrieNode};
pub use walker::{build_diagram, walk, WalkOptions, WalkStats, DEFAULT_MAX_DEPTH};

/// Expand shell variables in a string.
///
/// Supports:
/// - `$VAR` syntax
/// - `${VAR}` syntax
/// - `~` for home directory
///
/// Uses shellexpand crate for robust expansion.
pub fn expand_env_vars(path: &str) -> String {
    shellexpand::full(path)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| path.to_string())
}
