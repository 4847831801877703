//! Per-node presentation: own count, anomaly status, label and style.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainResult;
use crate::domain::trie::{TrieMetadata, TrieNode};

/// Label shown for the root node.
pub const ROOT_LABEL: &str = "ROOT";

/// How a node's `count` relates to the sequences ending at it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountPolicy {
    /// `count` includes descendants; own count is `count` minus the children's counts
    #[default]
    Subtractive,
    /// `count` is used as-is
    Cumulative,
}

impl fmt::Display for CountPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CountPolicy::Subtractive => write!(f, "subtractive"),
            CountPolicy::Cumulative => write!(f, "cumulative"),
        }
    }
}

impl FromStr for CountPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "subtractive" => Ok(CountPolicy::Subtractive),
            "cumulative" => Ok(CountPolicy::Cumulative),
            other => Err(format!(
                "unknown count policy '{other}' (expected subtractive or cumulative)"
            )),
        }
    }
}

impl CountPolicy {
    /// Number of sequences ending exactly at `node`, `None` for non-terminal nodes.
    ///
    /// Computed in `i128`, so any `u64` count and any sum of them fits.
    pub fn own_count(&self, node: &TrieNode) -> Option<i128> {
        if !node.is_end {
            return None;
        }
        let count = i128::from(node.count);
        match self {
            CountPolicy::Subtractive => Some(count - node.children_count()),
            CountPolicy::Cumulative => Some(count),
        }
    }
}

/// Graphviz node shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    DoubleCircle,
    Circle,
    Box,
}

impl Shape {
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::DoubleCircle => "doublecircle",
            Shape::Circle => "circle",
            Shape::Box => "box",
        }
    }
}

/// Graphviz color names used by the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    Blue,
    Red,
    MistyRose,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Black => "black",
            Color::Blue => "blue",
            Color::Red => "red",
            Color::MistyRose => "mistyrose",
        }
    }
}

/// Role of a node in the diagram.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Root,
    Terminal { anomalous: bool },
    Inner,
}

/// Visual channels of a diagram node.
///
/// `color` is used for stroke and font; `fill` is only set for anomalies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeStyle {
    pub shape: Shape,
    pub color: Color,
    pub fill: Option<Color>,
}

impl NodeStyle {
    pub fn for_kind(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Root => Self {
                shape: Shape::DoubleCircle,
                color: Color::Black,
                fill: None,
            },
            NodeKind::Terminal { anomalous: true } => Self {
                shape: Shape::Circle,
                color: Color::Red,
                fill: Some(Color::MistyRose),
            },
            NodeKind::Terminal { anomalous: false } => Self {
                shape: Shape::Circle,
                color: Color::Blue,
                fill: None,
            },
            NodeKind::Inner => Self {
                shape: Shape::Box,
                color: Color::Black,
                fill: None,
            },
        }
    }
}

/// Everything the walker needs to know to draw one node.
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    pub kind: NodeKind,
    pub own_count: Option<i128>,
    pub label: String,
    pub style: NodeStyle,
}

impl Presentation {
    pub fn is_anomaly(&self) -> bool {
        matches!(self.kind, NodeKind::Terminal { anomalous: true })
    }
}

/// Compute the presentation of `node`; `is_root` marks the walk's entry node.
pub fn present(
    node: &TrieNode,
    is_root: bool,
    metadata: &TrieMetadata,
    policy: CountPolicy,
) -> DomainResult<Presentation> {
    let own_count = policy.own_count(node);

    let kind = match (is_root, own_count) {
        (true, _) => NodeKind::Root,
        (false, Some(own)) => NodeKind::Terminal {
            anomalous: metadata.is_anomalous(own)?,
        },
        (false, None) => NodeKind::Inner,
    };

    let label = match (kind, own_count) {
        (NodeKind::Root, _) => ROOT_LABEL.to_string(),
        (_, Some(own)) => format!("'{}' ({})", node.token(), own),
        (_, None) => format!("'{}'", node.token()),
    };

    Ok(Presentation {
        kind,
        own_count,
        label,
        style: NodeStyle::for_kind(kind),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use rstest::rstest;

    fn node(label: &str, count: u64, is_end: bool, child_counts: &[u64]) -> TrieNode {
        let mut children = IndexMap::new();
        for (i, c) in child_counts.iter().enumerate() {
            children.insert(
                format!("c{i}"),
                TrieNode {
                    id: Some(100 + i as u64),
                    label: None,
                    count: *c,
                    is_end: true,
                    children: IndexMap::new(),
                },
            );
        }
        TrieNode {
            id: Some(1),
            label: Some(label.to_string()),
            count,
            is_end,
            children,
        }
    }

    #[rstest]
    #[case(CountPolicy::Subtractive, 10, &[3, 4], Some(3))]
    #[case(CountPolicy::Cumulative, 10, &[3, 4], Some(10))]
    #[case(CountPolicy::Subtractive, 2, &[3], Some(-1))]
    #[case(CountPolicy::Subtractive, 5, &[u64::MAX, 1], Some(5 - (1i128 << 64)))]
    #[case(CountPolicy::Cumulative, 1 << 63, &[], Some(1i128 << 63))]
    #[case(CountPolicy::Subtractive, u64::MAX, &[u64::MAX - 1], Some(1))]
    fn given_terminal_node_when_computing_own_count_then_follows_policy(
        #[case] policy: CountPolicy,
        #[case] count: u64,
        #[case] children: &[u64],
        #[case] expected: Option<i128>,
    ) {
        assert_eq!(policy.own_count(&node("a", count, true, children)), expected);
    }

    #[test]
    fn given_inner_node_when_computing_own_count_then_none() {
        let n = node("a", 10, false, &[3]);
        assert_eq!(CountPolicy::Subtractive.own_count(&n), None);
        assert_eq!(CountPolicy::Cumulative.own_count(&n), None);
    }

    #[test]
    fn given_policy_names_when_parsing_then_round_trips_display() {
        for policy in [CountPolicy::Subtractive, CountPolicy::Cumulative] {
            assert_eq!(policy.to_string().parse::<CountPolicy>(), Ok(policy));
        }
        assert!("prefix".parse::<CountPolicy>().is_err());
    }

    #[test]
    fn given_root_when_presenting_then_sentinel_label_and_double_circle() {
        let meta = TrieMetadata::new(0, 0.5);
        let p = present(&node("", 10, true, &[]), true, &meta, CountPolicy::Subtractive).unwrap();
        assert_eq!(p.label, ROOT_LABEL);
        assert_eq!(p.style.shape, Shape::DoubleCircle);
        assert!(!p.is_anomaly());
    }

    #[test]
    fn given_rare_terminal_when_presenting_then_red_with_fill() {
        let meta = TrieMetadata::new(10, 0.05);
        let p = present(&node("a", 0, true, &[]), false, &meta, CountPolicy::Subtractive).unwrap();
        assert_eq!(p.label, "'a' (0)");
        assert!(p.is_anomaly());
        assert_eq!(p.style.color, Color::Red);
        assert_eq!(p.style.fill, Some(Color::MistyRose));
    }

    #[test]
    fn given_common_terminal_when_presenting_then_blue_without_fill() {
        let meta = TrieMetadata::new(10, 0.05);
        let p = present(&node("a", 1, true, &[]), false, &meta, CountPolicy::Subtractive).unwrap();
        assert_eq!(p.label, "'a' (1)");
        assert!(!p.is_anomaly());
        assert_eq!(p.style.color, Color::Blue);
        assert_eq!(p.style.fill, None);
    }

    #[test]
    fn given_count_beyond_i64_when_presenting_then_label_keeps_full_value() {
        let meta = TrieMetadata::new(10, 0.05);
        let p = present(&node("a", 1 << 63, true, &[]), false, &meta, CountPolicy::Cumulative)
            .unwrap();
        assert_eq!(p.label, "'a' (9223372036854775808)");
        assert_eq!(p.own_count, Some(1i128 << 63));
        assert!(!p.is_anomaly());
    }

    #[test]
    fn given_inner_node_when_presenting_then_box_without_count() {
        let meta = TrieMetadata::new(0, 0.05);
        let p = present(&node("q", 4, false, &[4]), false, &meta, CountPolicy::Subtractive).unwrap();
        assert_eq!(p.label, "'q'");
        assert_eq!(p.style.shape, Shape::Box);
        assert_eq!(p.style.color, Color::Black);
    }
}
