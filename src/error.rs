//! Error types for invoice-pdf.

use std::io;
use thiserror::Error;

/// Result type alias for invoice-pdf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while rendering invoices or serving them.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading or writing files.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// JSON (de)serialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A text line cannot be placed into a content stream.
    #[error("Invalid line {index}: {reason}")]
    InvalidLine { index: usize, reason: String },

    /// Submitted form data failed validation.
    #[error("{0}")]
    Validation(String),

    /// The persistence backend has no configuration.
    #[error("Backend is not configured")]
    NotConfigured,

    /// No authenticated user for the request.
    #[error("Unauthorized")]
    Unauthorized,

    /// The invoice does not exist for the current user.
    #[error("Invoice not found: {0}")]
    InvoiceNotFound(String),

    /// The datastore rejected or failed an operation.
    #[error("Datastore error: {0}")]
    Datastore(String),

    /// The bytes are not recognized as a PDF file.
    #[error("Unknown file format: not a valid PDF")]
    UnknownFormat,

    /// The PDF structure is inconsistent (bad offsets, lengths, trailer).
    #[error("Corrupted PDF structure: {0}")]
    Corrupted(String),

    /// Error while rendering output (JSON lines, documents).
    #[error("Rendering error: {0}")]
    Render(String),

    /// Generic error with message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// HTTP status code a service boundary should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            Error::NotConfigured => 503,
            Error::Unauthorized => 401,
            Error::InvoiceNotFound(_) => 404,
            Error::Validation(_) | Error::InvalidLine { .. } => 400,
            _ => 500,
        }
    }

    /// Whether the caller can fix the request and retry.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvoiceNotFound("inv_9".into());
        assert_eq!(err.to_string(), "Invoice not found: inv_9");

        let err = Error::InvalidLine {
            index: 3,
            reason: "contains a line break".into(),
        };
        assert_eq!(err.to_string(), "Invalid line 3: contains a line break");

        let err = Error::Validation("Amount must be greater than 0".into());
        assert_eq!(err.to_string(), "Amount must be greater than 0");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(Error::NotConfigured.status_code(), 503);
        assert_eq!(Error::Unauthorized.status_code(), 401);
        assert_eq!(Error::InvoiceNotFound("x".into()).status_code(), 404);
        assert_eq!(Error::Validation("bad".into()).status_code(), 400);
        assert_eq!(Error::Datastore("down".into()).status_code(), 500);
        assert!(Error::Unauthorized.is_client_error());
        assert!(!Error::NotConfigured.is_client_error());
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let err: Error = io_err.into();
        assert!(matches!(err, Error::Io(_)));
    }
}
