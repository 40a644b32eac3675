//! Construction-time configuration errors.
//!
//! Everything past construction is a total function: filtering,
//! reduction and decoration degrade to diagnostics instead of erroring.

use thiserror::Error;

/// Errors detected while validating a table's column configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TableError {
    /// Two columns resolved to the same id.
    #[error("duplicate column id: {0}")]
    DuplicateColumn(String),

    /// A column resolved to an empty id.
    #[error("column id must not be empty")]
    EmptyColumnId,

    /// A column claimed the id reserved for the selection column.
    #[error("column id '{0}' is reserved")]
    ReservedColumnId(String),
}
