//! ps-parser - Execution plan parser for planspeak
//!
//! This crate decodes a query optimizer's showplan XML into the immutable
//! AST defined in `ps-core`: a namespaced element tree built over quick-xml,
//! an operator classification table keyed by `(LogicalOp, PhysicalOp)`, and a
//! recursive-descent parser over relational and scalar operators.

pub mod classify;
pub(crate) mod common;
pub mod error;
pub mod parser;
pub mod scalar;
pub mod xml;

pub use classify::{classify, Physical, Rule, RULES};
pub use error::{ParseError, ParseResult};
pub use parser::{parse_plan, parse_plan_str, parse_relop};
pub use scalar::parse_scalar_operator;
pub use xml::{Element, SHOWPLAN_NAMESPACE};
