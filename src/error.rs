use thiserror::Error;

/// Main error type for the crate.
/// Aggregates the errors of the spreadsheet, locate and compare modules.
#[derive(Error, Debug)]
pub enum TableDiffError {
    #[error("{0}")]
    WithContextError(String),

    // Spreadsheet module errors
    #[error("{0}")]
    SpreadsheetError(#[from] crate::spreadsheet::SpreadsheetError),

    // Locate module errors
    #[error("{0}")]
    LocateError(#[from] crate::locate::LocateError),

    // Compare module errors
    #[error("{0}")]
    CompareError(#[from] crate::compare::CompareError),
}

pub(crate) trait ResultMessage {
    fn with_prefix(self, message: &str) -> Self;
}

impl<T> ResultMessage for Result<T, TableDiffError> {
    fn with_prefix(self, message: &str) -> Self {
        self.map_err(|e| TableDiffError::WithContextError(format!("{}: {}", message, e)))
    }
}
