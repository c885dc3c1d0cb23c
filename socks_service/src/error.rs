//! Error types for socks_service

use thiserror::Error;

/// Unified error type for inventory operations
#[derive(Debug, Error)]
pub enum InventoryError {
    /// No stock matches the lookup, update or amount query
    #[error("{0}")]
    NotFound(String),
    /// Departure asks for more socks than the bucket holds
    #[error("Not enough socks of this type in stock: requested {requested}, available {available}")]
    InsufficientStock { requested: i64, available: i64 },
    /// Unknown operator, unsupported file format, bad sort or page request
    #[error("{0}")]
    InvalidArgument(String),
    /// Request field failed validation
    #[error("{0}")]
    Validation(String),
    /// Uploaded file has a malformed row
    #[error("Line {line}: {reason}")]
    Import { line: usize, reason: String },
    /// CSV content could not be read
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// XLSX workbook could not be read
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::XlsxError),
    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
    /// Database file or directory could not be created
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// Anything else (poisoned lock, broken invariants)
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl InventoryError {
    /// True for errors caused by the caller's input rather than the server
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            InventoryError::NotFound(_)
                | InventoryError::InsufficientStock { .. }
                | InventoryError::InvalidArgument(_)
                | InventoryError::Validation(_)
                | InventoryError::Import { .. }
                | InventoryError::Csv(_)
                | InventoryError::Spreadsheet(_)
        )
    }
}

/// Result alias for socks_service operations
pub type Result<T> = std::result::Result<T, InventoryError>;
