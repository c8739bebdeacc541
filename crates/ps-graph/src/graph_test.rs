use super::*;
use petgraph::visit::EdgeRef;
use ps_core::{ColumnReference, Object, Operation};

fn scan(table: &str, column: &str) -> RelOp {
    RelOp::new(
        Operation::TableScan {
            ordered: false,
            obj: Object::new("dbo", table),
            predicate: None,
            defined_values: vec![],
        },
        vec![ColumnReference::new(column).with_table(table)],
    )
}

fn join_plan() -> ExecutionPlan {
    let join = RelOp::new(
        Operation::NestedLoops {
            left: Box::new(scan("A", "a")),
            right: Box::new(scan("B", "b")),
            predicate: None,
            defined_values: vec![],
        },
        vec![ColumnReference::new("a"), ColumnReference::new("b")],
    );
    ExecutionPlan::new("SELECT a, b FROM A JOIN B ON 1 = 1", join)
}

#[test]
fn test_one_node_per_operator_plus_root() {
    let graph = PlanGraph::build(&join_plan());
    assert_eq!(graph.node_count(), 4);
    assert_eq!(graph.edge_count(), 3);
    assert_eq!(graph.graph()[graph.root()].id, ROOT_NODE);
    assert_eq!(graph.label(), "SELECT a, b FROM A JOIN B ON 1 = 1");
}

#[test]
fn test_node_ids_count_per_kind() {
    let graph = PlanGraph::build(&join_plan());
    let ids: Vec<&str> = graph
        .graph()
        .node_indices()
        .map(|i| graph.graph()[i].id.as_str())
        .collect();
    assert_eq!(ids, vec!["SELECT", "NestedLoops_1", "TableScan_1", "TableScan_2"]);
}

#[test]
fn test_edges_flow_to_consumer_with_output_columns() {
    let graph = PlanGraph::build(&join_plan());
    let inner = graph.graph();
    let mut edges: Vec<(String, String, String)> = inner
        .edge_references()
        .map(|e| {
            (
                inner[e.source()].id.clone(),
                inner[e.target()].id.clone(),
                e.weight().clone(),
            )
        })
        .collect();
    edges.sort();
    assert_eq!(
        edges,
        vec![
            ("NestedLoops_1".to_string(), "SELECT".to_string(), "a, b".to_string()),
            ("TableScan_1".to_string(), "NestedLoops_1".to_string(), "a".to_string()),
            ("TableScan_2".to_string(), "NestedLoops_1".to_string(), "b".to_string()),
        ]
    );
}
