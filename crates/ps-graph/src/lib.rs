//! ps-graph - Graph renderer for planspeak
//!
//! Walks an `ExecutionPlan` the same way the text renderer does, but builds
//! a `petgraph` directed graph (one record node per operator, edges flowing
//! from input to consumer) and writes it out as Graphviz DOT.

pub mod dot;
pub mod graph;
pub mod label;

pub use dot::to_dot;
pub use graph::{PlanGraph, PlanNode, ROOT_NODE};
