//! Graphviz DOT serialization of a [`Diagram`].
//!
//! The diagram is mapped onto a `dot_structures::Graph` and printed with the
//! `graphviz_rust` printer.

use dot_structures::{Attribute, Edge, EdgeTy, Graph, Id, Node, NodeId, Stmt, Vertex};
use graphviz_rust::printer::{DotPrinter, PrinterContext};

use crate::domain::diagram::{Diagram, DiagramEdge, DiagramNode};

/// Quoted DOT string; the printer emits escaped ids verbatim.
fn quoted(s: &str) -> Id {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => {}
            _ => out.push(c),
        }
    }
    out.push('"');
    Id::Escaped(out)
}

fn plain(s: impl Into<String>) -> Id {
    Id::Plain(s.into())
}

fn attr(key: &str, value: Id) -> Attribute {
    Attribute(plain(key), value)
}

fn vertex(id: u64) -> Vertex {
    Vertex::N(NodeId(plain(id.to_string()), None))
}

fn node_stmt(node: &DiagramNode) -> Stmt {
    let color = node.style.color.as_str();
    let mut attributes = vec![
        attr("label", quoted(&node.label)),
        attr("shape", plain(node.style.shape.as_str())),
        attr("color", plain(color)),
        attr("fontcolor", plain(color)),
    ];
    if let Some(fill) = node.style.fill {
        attributes.push(attr("style", plain("filled")));
        attributes.push(attr("fillcolor", plain(fill.as_str())));
    }
    Stmt::Node(Node {
        id: NodeId(plain(node.id.to_string()), None),
        attributes,
    })
}

fn edge_stmt(edge: &DiagramEdge) -> Stmt {
    Stmt::Edge(Edge {
        ty: EdgeTy::Pair(vertex(edge.from), vertex(edge.to)),
        attributes: vec![attr("label", quoted(&edge.label))],
    })
}

/// Build the `digraph` for `diagram`: graph attributes, then all nodes in
/// diagram order, then all edges.
pub fn to_graph(diagram: &Diagram) -> Graph {
    let mut stmts = Vec::with_capacity(1 + diagram.nodes.len() + diagram.edges.len());
    stmts.push(Stmt::Attribute(attr("rankdir", quoted(&diagram.rankdir))));
    stmts.extend(diagram.nodes.iter().map(node_stmt));
    stmts.extend(diagram.edges.iter().map(edge_stmt));

    Graph::DiGraph {
        id: quoted(&diagram.name),
        strict: false,
        stmts,
    }
}

/// Render `diagram` as a DOT document.
pub fn to_dot(diagram: &Diagram) -> String {
    let mut dot = to_graph(diagram).print(&mut PrinterContext::default());
    dot.push('\n');
    dot
}
