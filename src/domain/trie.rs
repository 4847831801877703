//! Trie document model as produced by the upstream exporter.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::error::{DomainError, DomainResult};

/// A single trie node.
///
/// `children` keeps the document order, which is also the render order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrieNode {
    /// Unique node id; the exporter writes it as `ID`
    #[serde(default, alias = "ID", skip_serializing_if = "Option::is_none")]
    pub id: Option<u64>,
    /// Token this node represents, empty or absent for the root
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default)]
    pub count: u64,
    #[serde(default, rename = "isEnd")]
    pub is_end: bool,
    #[serde(default)]
    pub children: IndexMap<String, TrieNode>,
}

impl TrieNode {
    /// Token of this node, empty when no label is known.
    pub fn token(&self) -> &str {
        self.label.as_deref().unwrap_or_default()
    }

    /// True for a node that carries no information at all (`{}` in JSON).
    pub fn is_blank(&self) -> bool {
        self.id.is_none()
            && self.label.is_none()
            && self.count == 0
            && !self.is_end
            && self.children.is_empty()
    }

    /// Sum of the direct children's counts, wide enough to never overflow.
    pub fn children_count(&self) -> i128 {
        self.children.values().map(|c| i128::from(c.count)).sum()
    }

    /// Fill in missing labels from an id-indexed label table.
    ///
    /// Nodes that already carry an inline label keep it, nodes without an id
    /// are left alone (the walker skips them anyway).
    pub fn resolve_labels(&mut self, labels: &[String]) -> DomainResult<()> {
        let mut stack: Vec<&mut TrieNode> = vec![self];

        while let Some(node) = stack.pop() {
            if node.label.is_none() {
                if let Some(id) = node.id {
                    let label = usize::try_from(id)
                        .ok()
                        .and_then(|idx| labels.get(idx))
                        .ok_or(DomainError::LabelOutOfRange {
                            id,
                            len: labels.len(),
                        })?;
                    node.label = Some(label.clone());
                }
            }
            stack.extend(node.children.values_mut());
        }
        Ok(())
    }
}

// Deep tries would overflow the stack with recursive drop glue.
impl Drop for TrieNode {
    fn drop(&mut self) {
        let mut stack: Vec<TrieNode> = self.children.drain(..).map(|(_, c)| c).collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.children.drain(..).map(|(_, c)| c));
        }
    }
}

/// Whole-trie figures needed for anomaly detection.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrieMetadata {
    /// Number of distinct terminal sequences
    pub total_unique: Option<i64>,
    /// Share of `total_unique` at or below which a terminal node is anomalous
    pub anomaly_threshold: Option<f64>,
}

impl TrieMetadata {
    pub fn new(total_unique: i64, anomaly_threshold: f64) -> Self {
        Self {
            total_unique: Some(total_unique),
            anomaly_threshold: Some(anomaly_threshold),
        }
    }

    /// Anomaly coloring needs both figures.
    pub fn detects_anomalies(&self) -> bool {
        self.total_unique.is_some() && self.anomaly_threshold.is_some()
    }

    /// Decide whether a terminal node with `own_count` is anomalous.
    ///
    /// Returns `Ok(false)` when the metadata is incomplete. Fails on a
    /// non-positive `total_unique` or a threshold outside `[0, 1]`.
    pub fn is_anomalous(&self, own_count: i128) -> DomainResult<bool> {
        let (Some(total), Some(threshold)) = (self.total_unique, self.anomaly_threshold) else {
            return Ok(false);
        };
        if total <= 0 {
            return Err(DomainError::InvalidMetadata {
                reason: format!("totalUnique must be positive, got {total}"),
            });
        }
        if !threshold.is_finite() || !(0.0..=1.0).contains(&threshold) {
            return Err(DomainError::InvalidMetadata {
                reason: format!("threshold must be within [0, 1], got {threshold}"),
            });
        }
        Ok((own_count as f64 / total as f64) <= threshold)
    }
}

/// Top-level JSON document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrieDocument {
    #[serde(default, rename = "totalUnique")]
    pub total_unique: Option<i64>,
    #[serde(default)]
    pub threshold: Option<f64>,
    /// Id-indexed token table used by exporters that do not inline labels
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    #[serde(default)]
    pub root: Option<TrieNode>,
}

impl TrieDocument {
    pub fn metadata(&self) -> TrieMetadata {
        TrieMetadata {
            total_unique: self.total_unique,
            anomaly_threshold: self.threshold,
        }
    }
}
