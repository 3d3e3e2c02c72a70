//! Domain-level errors (no I/O concerns)

use thiserror::Error;

/// Domain errors raised while transforming or rendering a tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A matched record lacks a field its transform or display reads unconditionally.
    #[error("{record} record is missing field '{field}'")]
    MissingField {
        record: &'static str,
        field: &'static str,
    },

    #[error("{operation} does not support a {found} node")]
    UnsupportedShape {
        operation: &'static str,
        found: &'static str,
    },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
