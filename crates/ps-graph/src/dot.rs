//! Graphviz DOT output

use crate::graph::{PlanGraph, PlanNode};
use petgraph::visit::EdgeRef;
use ps_core::GraphConfig;

/// Render `graph` as a DOT digraph named `name`
pub fn to_dot(graph: &PlanGraph, name: &str, config: &GraphConfig) -> String {
    let font = quote(&config.font);
    let mut lines = vec![
        format!("digraph {} {{", quote(name)),
        format!(
            "    graph [rankdir={}, labelloc=t, label={}, fontname={font}];",
            config.rankdir,
            quote(graph.label())
        ),
        format!("    node [shape=record, fontname={font}];"),
        format!("    edge [fontname={font}];"),
    ];

    let inner = graph.graph();
    for index in inner.node_indices() {
        let node = &inner[index];
        if index == graph.root() {
            lines.push(format!("    {};", quote(&node.id)));
        } else {
            lines.push(format!(
                "    {} [label={}];",
                quote(&node.id),
                quote(&record_label(node))
            ));
        }
    }
    for edge in inner.edge_references() {
        lines.push(format!(
            "    {} -> {} [label={}];",
            quote(&inner[edge.source()].id),
            quote(&inner[edge.target()].id),
            quote(edge.weight())
        ));
    }
    lines.push("}".to_string());
    lines.join("\n") + "\n"
}

/// `title|detail\ndetail` with record metacharacters escaped
fn record_label(node: &PlanNode) -> String {
    let title = escape_record(&node.title);
    if node.details.is_empty() {
        return title;
    }
    let details: Vec<String> = node.details.iter().map(|d| escape_record(d)).collect();
    format!("{title}|{}", details.join("\\n"))
}

fn escape_record(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '{' | '}' | '<' | '>' | '|') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Double-quoted DOT string; `\` sequences already in `text` are kept
fn quote(text: &str) -> String {
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            _ => quoted.push(c),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
#[path = "dot_test.rs"]
mod tests;
