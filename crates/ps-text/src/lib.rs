//! ps-text - Text renderer for planspeak
//!
//! Turns an `ExecutionPlan` into a numbered list of natural-language
//! instructions. Operators are visited in post-order; an [`Environment`]
//! threaded through the walk numbers the instructions and remembers what
//! each expression placeholder (`Expr1001`, `Union1004`) stands for.

pub mod aggregate;
pub mod environment;
pub mod error;
pub mod format;
pub mod render;

pub use aggregate::{aggregate_phrase, aggregate_phrases, join_phrases};
pub use environment::{is_placeholder, Environment};
pub use error::{RenderError, RenderResult};
pub use format::format_scalar;
pub use render::{plan_to_instructions, plan_to_text, render_relop};
