//! CLI command implementations

pub(crate) mod ast;
pub(crate) mod common;
pub(crate) mod dataset;
pub(crate) mod graph;
pub(crate) mod search;
pub(crate) mod text;
