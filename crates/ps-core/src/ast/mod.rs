//! Execution plan AST: immutable nodes produced by the parser

pub mod column;
pub mod plan;
pub mod relop;
pub mod scalar;
