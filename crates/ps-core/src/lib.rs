//! ps-core - Core library for planspeak
//!
//! This crate provides the immutable execution plan AST shared by the parser
//! and the renderers, together with configuration parsing and the dataset
//! record format.

pub mod ast;
pub mod config;
pub mod dataset;
pub mod error;

pub use ast::column::{ColumnReference, Object};
pub use ast::plan::ExecutionPlan;
pub use ast::relop::{
    DefinedValue, OperatorKind, Operation, OrderBy, RelOp, ScanRange, SeekPredicate,
};
pub use ast::scalar::{ArithmeticOp, CompareOp, ConstValue, LogicalOp, ScalarOperator};
pub use config::{Config, GraphConfig, RankDir};
pub use dataset::{load_split, DatasetRecord, Split};
pub use error::{ArityError, CoreError, CoreResult};
