//! Trie loading service
//!
//! Reads a JSON trie document in full and turns it into a root node plus
//! metadata. Loading is all-or-nothing.

use std::io;
use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::application::{ApplicationError, ApplicationResult};
use crate::domain::{DomainError, TrieDocument, TrieMetadata, TrieNode};
use crate::infrastructure::traits::FileSystem;

/// A fully decoded trie, labels resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedTrie {
    pub metadata: TrieMetadata,
    pub root: TrieNode,
}

/// Service for loading trie documents.
pub struct TrieLoader {
    fs: Arc<dyn FileSystem>,
}

impl TrieLoader {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read and decode the trie at `path`.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<LoadedTrie> {
        if !self.fs.is_file(path) {
            return Err(ApplicationError::FileNotFound(path.to_path_buf()));
        }
        let content = self.fs.read_to_string(path).map_err(|e| match e.kind() {
            io::ErrorKind::InvalidData => ApplicationError::MalformedInput {
                path: path.to_path_buf(),
                message: "not valid UTF-8".to_string(),
            },
            _ => ApplicationError::FileNotFound(path.to_path_buf()),
        })?;
        debug!("load: read {} bytes", content.len());
        Self::parse(&content, path)
    }

    /// Decode a trie document; `source` is only used in error messages.
    pub fn parse(content: &str, source: &Path) -> ApplicationResult<LoadedTrie> {
        let malformed = |message: String| ApplicationError::MalformedInput {
            path: source.to_path_buf(),
            message,
        };

        let document = decode(content).map_err(|e| malformed(e.to_string()))?;
        let metadata = document.metadata();

        let mut root = match document.root {
            Some(root) if !root.is_blank() => root,
            _ => return Err(ApplicationError::MissingRoot(source.to_path_buf())),
        };

        if let Some(labels) = &document.labels {
            debug!("parse: resolving labels from table of {}", labels.len());
            root.resolve_labels(labels).map_err(|e| match e {
                DomainError::LabelOutOfRange { .. } => malformed(e.to_string()),
                other => ApplicationError::Domain(other),
            })?;
        }

        if !metadata.detects_anomalies() {
            debug!("parse: totalUnique or threshold missing, anomaly coloring disabled");
        }

        Ok(LoadedTrie { metadata, root })
    }
}

/// Decode with no nesting limit; each trie level nests two JSON objects.
/// Depth is bounded by the walker's `max_depth` instead.
fn decode(content: &str) -> serde_json::Result<TrieDocument> {
    let mut de = serde_json::Deserializer::from_str(content);
    de.disable_recursion_limit();
    let document = TrieDocument::deserialize(serde_stacker::Deserializer::new(&mut de))?;
    de.end()?;
    Ok(document)
}
