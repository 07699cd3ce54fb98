//! Graphviz export
//!
//! Renders a [`MixedGraph`] in DOT format. Strong edges are solid, weak
//! edges are dashed.

use crate::core::entity::EntityKey;
use crate::core::mixed_graph::{EdgeKind, MixedGraph};

/// Quote an id as a DOT string literal
fn quoted(vertex: &EntityKey) -> String {
    let mut out = String::with_capacity(vertex.id().len() + 2);
    out.push('"');
    for c in vertex.id().chars() {
        if matches!(c, '"' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('"');
    out
}

impl MixedGraph {
    /// Format as DOT graph
    pub fn to_dot(&self) -> String {
        let mut output = String::new();
        output.push_str("digraph dependencies {\n");
        output.push_str("    rankdir=TB;\n");
        output.push_str("    node [shape=box];\n");
        output.push('\n');

        for vertex in self.vertices() {
            output.push_str(&format!("    {};\n", quoted(vertex)));
        }
        output.push('\n');

        for from in self.vertices() {
            for kind in [EdgeKind::Strong, EdgeKind::Weak] {
                let style = match kind {
                    EdgeKind::Strong => "solid",
                    EdgeKind::Weak => "dashed",
                };
                for to in self.direct_successors(from, kind, None) {
                    output.push_str(&format!(
                        "    {} -> {} [style={style}, label=\"{kind}\"];\n",
                        quoted(from),
                        quoted(to)
                    ));
                }
            }
        }

        output.push_str("}\n");
        output
    }
}
