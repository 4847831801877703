//! Pre-order walk from a trie to diagram declarations.

use tracing::{debug, instrument, trace};

use crate::domain::diagram::{Diagram, DiagramEdge, DiagramNode, DiagramSink};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::style::{present, CountPolicy};
use crate::domain::trie::{TrieMetadata, TrieNode};

/// Default bound on trie depth (root is depth 0).
pub const DEFAULT_MAX_DEPTH: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkOptions {
    pub count_policy: CountPolicy,
    pub max_depth: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            count_policy: CountPolicy::default(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Counters collected during a walk.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WalkStats {
    pub nodes: usize,
    pub edges: usize,
    pub anomalies: usize,
    /// Nodes without an id; their subtrees are not visited
    pub skipped: usize,
    pub depth: usize,
}

struct WorkItem<'a> {
    node: &'a TrieNode,
    parent: Option<u64>,
    edge_label: &'a str,
    depth: usize,
}

/// Walk `root` depth-first in pre-order and declare every node and edge on `sink`.
///
/// Children are visited in document order. A node without an id is skipped
/// together with its subtree. Invalid metadata or a trie deeper than
/// `options.max_depth` aborts the walk.
#[instrument(level = "debug", skip_all, fields(policy = %options.count_policy))]
pub fn walk<S>(
    root: &TrieNode,
    metadata: &TrieMetadata,
    options: &WalkOptions,
    sink: &mut S,
) -> DomainResult<WalkStats>
where
    S: DiagramSink + ?Sized,
{
    let mut stats = WalkStats::default();
    let mut stack = vec![WorkItem {
        node: root,
        parent: None,
        edge_label: "",
        depth: 0,
    }];

    while let Some(item) = stack.pop() {
        let Some(id) = item.node.id else {
            debug!(
                "skipping node without id under '{}' (parent {:?})",
                item.edge_label, item.parent
            );
            stats.skipped += 1;
            continue;
        };
        if item.depth > options.max_depth {
            return Err(DomainError::DepthExceeded {
                limit: options.max_depth,
                id,
            });
        }

        let presentation = present(
            item.node,
            item.parent.is_none(),
            metadata,
            options.count_policy,
        )?;
        trace!(id, label = %presentation.label, "node");

        if presentation.is_anomaly() {
            stats.anomalies += 1;
        }
        sink.add_node(DiagramNode {
            id,
            is_anomaly: presentation.is_anomaly(),
            own_count: presentation.own_count,
            label: presentation.label,
            style: presentation.style,
        });
        stats.nodes += 1;
        stats.depth = stats.depth.max(item.depth);

        if let Some(parent) = item.parent {
            sink.add_edge(DiagramEdge {
                from: parent,
                to: id,
                label: item.edge_label.to_string(),
            });
            stats.edges += 1;
        }

        // Reverse push so children pop in document order
        for (key, child) in item.node.children.iter().rev() {
            stack.push(WorkItem {
                node: child,
                parent: Some(id),
                edge_label: key,
                depth: item.depth + 1,
            });
        }
    }

    debug!(?stats, "walk complete");
    Ok(stats)
}

/// Walk `root` into a fresh [`Diagram`].
pub fn build_diagram(
    root: &TrieNode,
    metadata: &TrieMetadata,
    options: &WalkOptions,
) -> DomainResult<Diagram> {
    let mut diagram = Diagram::default();
    walk(root, metadata, options, &mut diagram)?;
    Ok(diagram)
}
