//! Error types for ps-parser

use ps_core::ArityError;
use thiserror::Error;

/// Plan parsing errors
///
/// Any one of these fails the whole plan; there is no partial result.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    /// P001: The document is not well-formed XML
    #[error("[P001] Malformed XML: {0}")]
    Xml(String),

    /// P002: A required child element is absent
    #[error("[P002] <{parent}> is missing required element <{element}>")]
    MissingElement { parent: String, element: String },

    /// P003: A required attribute is absent
    #[error("[P003] <{element}> is missing required attribute '{attribute}'")]
    MissingAttribute { element: String, attribute: String },

    /// P004: An attribute value cannot be decoded
    #[error("[P004] Invalid value '{value}' for attribute '{attribute}' on <{element}>")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
    },

    /// P005: The document root is not a showplan element
    #[error("[P005] <{element}> is in namespace '{found}', expected '{expected}'")]
    UnexpectedNamespace {
        element: String,
        expected: String,
        found: String,
    },

    /// P006: No classification rule matches the operator pair
    #[error("[P006] The pair ({logical}, {physical}) is not mapped to any operation")]
    UnsupportedOperator { logical: String, physical: String },

    /// P007: Unrecognised scalar operator tag
    #[error("[P007] Unknown scalar operator: <{tag}>")]
    UnknownScalarOperator { tag: String },

    /// P008: Fixed-arity scalar operator with the wrong operand count
    #[error("[P008] {0}")]
    Arity(#[from] ArityError),

    /// P009: A defined value has an expression but no target column
    #[error("[P009] Invalid defined value in <{element}>: {message}")]
    InvalidDefinedValue { element: String, message: String },

    /// P010: An operator has the wrong number of input operators
    #[error("[P010] <{element}> expects {expected} <RelOp> inputs, found {found}")]
    ChildCount {
        element: String,
        expected: String,
        found: usize,
    },
}

/// Result type alias for ParseError
pub type ParseResult<T> = Result<T, ParseError>;
