//! The flat error taxonomy shared by every layer of the engine.

use thiserror::Error;

/// One result type threaded through the storage engine, SQL parser, and
/// interpreter.
pub type Result<T> = std::result::Result<T, BazaError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BazaError {
    #[error("memory allocation failed")]
    Alloc,

    #[error("SQL parse error: {0}")]
    SqlParse(String),

    #[error("invalid query: {0}")]
    InvalidQuery(String),

    #[error("table `{0}` not found")]
    TableNotFound(String),

    #[error("table `{0}` is not empty")]
    TableNotEmpty(String),

    #[error("table `{0}` already exists")]
    DuplicateTable(String),

    #[error("column `{0}` not found")]
    ColumnNotFound(String),

    #[error("column `{0}` already exists")]
    DuplicateColumnName(String),

    #[error("index {0} is out of bounds (row count is {1})")]
    IndexOutOfBounds(u64, u64),

    #[error("value `{value}` is not valid for column `{column}` of type {expected}")]
    ValueType {
        column: String,
        expected: &'static str,
        value: String,
    },

    #[error("filter value `{value}` is not valid for column `{column}` of type {expected}")]
    FilterValueType {
        column: String,
        expected: &'static str,
        value: String,
    },

    #[error("internal server error: {0}")]
    ServerError(String),
}
