//! Diagram model filled by the walker and consumed by renderers.

use crate::domain::style::NodeStyle;

/// Graph name used when none is given.
pub const DEFAULT_GRAPH_NAME: &str = "Trie";

/// Default Graphviz rank direction (left to right).
pub const DEFAULT_RANKDIR: &str = "LR";

#[derive(Debug, Clone, PartialEq)]
pub struct DiagramNode {
    pub id: u64,
    pub label: String,
    pub style: NodeStyle,
    pub own_count: Option<i128>,
    pub is_anomaly: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramEdge {
    pub from: u64,
    pub to: u64,
    /// Token under which `to` was reached from `from`
    pub label: String,
}

/// Receiver of node and edge declarations.
///
/// The walker only ever calls `add_edge` after both ends were added.
pub trait DiagramSink {
    fn add_node(&mut self, node: DiagramNode);
    fn add_edge(&mut self, edge: DiagramEdge);
}

/// In-memory diagram: ordered nodes and edges plus graph attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram {
    pub name: String,
    pub rankdir: String,
    pub nodes: Vec<DiagramNode>,
    pub edges: Vec<DiagramEdge>,
}

impl Default for Diagram {
    fn default() -> Self {
        Self::new(DEFAULT_GRAPH_NAME)
    }
}

impl Diagram {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rankdir: DEFAULT_RANKDIR.to_string(),
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }

    pub fn with_rankdir(mut self, rankdir: impl Into<String>) -> Self {
        self.rankdir = rankdir.into();
        self
    }

    pub fn node(&self, id: u64) -> Option<&DiagramNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn anomalies(&self) -> impl Iterator<Item = &DiagramNode> {
        self.nodes.iter().filter(|n| n.is_anomaly)
    }
}

impl DiagramSink for Diagram {
    fn add_node(&mut self, node: DiagramNode) {
        self.nodes.push(node);
    }

    fn add_edge(&mut self, edge: DiagramEdge) {
        self.edges.push(edge);
    }
}
