//! Text tree rendering of a diagram, for terminal output.

use std::collections::HashMap;

use termtree::Tree;

use crate::domain::diagram::Diagram;

const ANOMALY_MARKER: &str = "[anomaly]";

pub trait TreeView {
    fn to_term_tree(&self) -> Tree<String>;
}

impl TreeView for Diagram {
    /// Rebuild the hierarchy from the edge list.
    ///
    /// Nodes are stored in pre-order, so folding them in reverse attaches
    /// every subtree before its parent is reached.
    fn to_term_tree(&self) -> Tree<String> {
        let parents: HashMap<u64, u64> = self.edges.iter().map(|e| (e.to, e.from)).collect();
        let mut pending: HashMap<u64, Vec<Tree<String>>> = HashMap::new();
        let mut roots: Vec<Tree<String>> = Vec::new();

        for node in self.nodes.iter().rev() {
            let text = if node.is_anomaly {
                format!("{} {}", node.label, ANOMALY_MARKER)
            } else {
                node.label.clone()
            };
            let mut leaves = pending.remove(&node.id).unwrap_or_default();
            leaves.reverse();
            let tree = Tree::new(text).with_leaves(leaves);

            match parents.get(&node.id) {
                Some(parent) => pending.entry(*parent).or_default().push(tree),
                None => roots.push(tree),
            }
        }

        roots
            .pop()
            .unwrap_or_else(|| Tree::new("Empty tree".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::trie::{TrieMetadata, TrieNode};
    use crate::domain::walker::{build_diagram, WalkOptions};

    #[test]
    fn given_diagram_when_rendering_tree_then_children_in_order_with_markers() {
        let root: TrieNode = serde_json::from_str(
            r#"{"id": 0, "children": {
                "b": {"id": 1, "label": "b", "children": {
                    "e": {"id": 2, "label": "e", "isEnd": true, "count": 5}
                }},
                "a": {"id": 3, "label": "a", "isEnd": true, "count": 0}
            }}"#,
        )
        .unwrap();
        let diagram =
            build_diagram(&root, &TrieMetadata::new(10, 0.05), &WalkOptions::default()).unwrap();

        let text = diagram.to_term_tree().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "ROOT");
        assert!(lines[1].ends_with("'b'"));
        assert!(lines[2].ends_with("'e' (5)"));
        assert!(lines[3].ends_with("'a' (0) [anomaly]"));
    }

    #[test]
    fn given_empty_diagram_when_rendering_tree_then_placeholder() {
        let text = Diagram::default().to_term_tree().to_string();
        assert_eq!(text.trim(), "Empty tree");
    }
}
