use std::collections::TryReserveError;
use thiserror::Error;

/// Errors returned while building or editing a [`Matrix`](crate::Matrix).
///
/// None of these leave the matrix half-edited: a failing row operation is
/// rejected before any link is touched.
#[derive(Debug, Error)]
pub enum MatrixError {
    /// Node storage could not be grown.
    #[error("failed to grow node storage")]
    Allocation(#[from] TryReserveError),

    /// The number of column names does not match the number of columns.
    #[error("expected {expected} column names, got {actual}")]
    ColumnNameCount {
        /// Number of columns in the matrix.
        expected: usize,
        /// Number of names supplied.
        actual: usize,
    },

    /// Two columns were given the same name.
    #[error("column name `{0}` is used more than once")]
    DuplicateColumnName(String),

    /// A row of dense input has the wrong number of cells.
    #[error("dense row {row} has {width} cells, expected {expected}")]
    DenseRowWidth {
        /// Position of the offending row in the dense input.
        row: usize,
        /// Number of cells in that row.
        width: usize,
        /// Number of columns in the matrix.
        expected: usize,
    },

    /// A column index does not name a column of the matrix.
    #[error("column {index} is out of range for a matrix with {num_columns} columns")]
    ColumnOutOfRange {
        /// The offending index.
        index: usize,
        /// Number of columns in the matrix.
        num_columns: usize,
    },

    /// The same column was listed twice in one row.
    #[error("column {index} appears more than once in the same row")]
    DuplicateColumn {
        /// The repeated column index.
        index: usize,
    },

    /// No column carries the given name.
    #[error("no column is named `{0}`")]
    UnknownColumn(String),

    /// No live row has exactly the requested set of columns.
    #[error("no row covers exactly the requested columns")]
    RowNotFound,
}

/// Result alias used throughout the crate.
pub type Result<T, E = MatrixError> = std::result::Result<T, E>;
