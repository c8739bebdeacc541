//! Plan → petgraph directed graph

use crate::label::describe;
use ps_core::{ExecutionPlan, OperatorKind, RelOp};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Identifier of the node standing for the query result
pub const ROOT_NODE: &str = "SELECT";

/// A diagram node
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanNode {
    /// Unique DOT identifier, e.g. `Sort_2`
    pub id: String,
    /// Record title (operator name)
    pub title: String,
    /// Record body lines
    pub details: Vec<String>,
}

/// Directed graph of a plan: edges run from each input to its consumer and
/// carry the input's output column names.
#[derive(Debug)]
pub struct PlanGraph {
    graph: DiGraph<PlanNode, String>,
    root: NodeIndex,
    label: String,
}

impl PlanGraph {
    /// Build the graph for `plan`, rooted at a `SELECT` node
    pub fn build(plan: &ExecutionPlan) -> Self {
        let mut graph = DiGraph::new();
        let root = graph.add_node(PlanNode {
            id: ROOT_NODE.to_string(),
            title: ROOT_NODE.to_string(),
            details: Vec::new(),
        });
        let mut builder = Builder {
            graph,
            counters: HashMap::new(),
        };
        builder.add_relop(&plan.relop, root);
        log::debug!(
            "Built plan graph with {} nodes",
            builder.graph.node_count()
        );
        Self {
            graph: builder.graph,
            root,
            label: plan.query.clone(),
        }
    }

    /// The underlying graph
    pub fn graph(&self) -> &DiGraph<PlanNode, String> {
        &self.graph
    }

    /// The `SELECT` node
    pub fn root(&self) -> NodeIndex {
        self.root
    }

    /// Graph caption (the query text)
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

struct Builder {
    graph: DiGraph<PlanNode, String>,
    counters: HashMap<OperatorKind, usize>,
}

impl Builder {
    fn add_relop(&mut self, relop: &RelOp, consumer: NodeIndex) {
        let kind = relop.operation.kind();
        let ordinal = {
            let counter = self.counters.entry(kind).or_insert(0);
            *counter += 1;
            *counter
        };

        let (title, details) = describe(&relop.operation);
        let node = self.graph.add_node(PlanNode {
            id: format!("{}_{ordinal}", kind.tag()),
            title,
            details,
        });

        for child in relop.operation.children() {
            self.add_relop(child, node);
        }

        let columns: Vec<&str> = relop
            .output_list
            .iter()
            .map(|column| column.column.as_str())
            .collect();
        self.graph.add_edge(node, consumer, columns.join(", "));
    }
}

#[cfg(test)]
#[path = "graph_test.rs"]
mod tests;
