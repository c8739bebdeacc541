//! Error types for ps-text

use thiserror::Error;

/// Rendering errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// R001: Aggregate function without a phrasing
    #[error("[R001] Unsupported aggregate function: {agg_type}")]
    UnsupportedAggregate { agg_type: String },
}

/// Result type alias for RenderError
pub type RenderResult<T> = Result<T, RenderError>;
