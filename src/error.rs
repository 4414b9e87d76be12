use thiserror::Error;

/// An error raised while constructing an exact cover problem.
///
/// All validation happens up front, when a row is appended to the matrix;
/// the search itself performs pure link manipulation and cannot fail.
/// A rejected row leaves the matrix exactly as it was before the call.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A row referenced a column identifier outside `1..=columns`.
    #[error("column {id} is out of range 1..={columns}")]
    ColumnOutOfRange {
        /// The offending column identifier.
        id: usize,
        /// The total number of columns (primary and secondary) in the problem.
        columns: usize,
    },
    /// A row referenced the same column more than once.
    #[error("column {id} appears more than once in the row")]
    DuplicateColumn {
        /// The repeated column identifier.
        id: usize,
    },
    /// The column identifiers of a row were not given in ascending order.
    #[error("column {id} must be listed after column {prev}, not before")]
    ColumnsOutOfOrder {
        /// The out-of-place column identifier.
        id: usize,
        /// The identifier that preceded it in the row.
        prev: usize,
    },
    /// A row covered no columns at all.
    #[error("row must cover at least one column")]
    EmptyRow,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        let err = Error::ColumnOutOfRange { id: 9, columns: 7 };
        assert_eq!(err.to_string(), "column 9 is out of range 1..=7");

        let err = Error::DuplicateColumn { id: 4 };
        assert_eq!(err.to_string(), "column 4 appears more than once in the row");

        let err = Error::ColumnsOutOfOrder { id: 2, prev: 5 };
        assert_eq!(
            err.to_string(),
            "column 2 must be listed after column 5, not before"
        );

        assert_eq!(Error::EmptyRow.to_string(), "row must cover at least one column");
    }
}
