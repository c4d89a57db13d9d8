// Error types shared by the service layer (`api`) and the menu operations.
//
// `StoreError` describes what went wrong talking to the table or the bucket.
// `AdminError` is what an operation hands back to the menu loop, which
// decides whether to report it and carry on or to stop.

use std::io;
use std::path::PathBuf;

use aws_sdk_dynamodb::error::DisplayErrorContext;
use thiserror::Error;

/// Failure reported by the remote table or bucket.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The provider rejected a conditional write or delete.
    #[error("conditional check failed: {0}")]
    ConditionalCheckFailed(String),

    /// The requested object does not exist in the bucket.
    #[error("object '{0}' does not exist")]
    NotFound(String),

    /// An item could not be converted to or from the table's attribute format.
    #[error("invalid item: {0}")]
    InvalidItem(String),

    /// Any other provider error, kept with its full cause chain.
    #[error("{operation} failed: {message}")]
    Service {
        operation: &'static str,
        message: String,
    },
}

impl StoreError {
    /// Wrap a provider error, flattening its source chain into the message.
    pub fn service<E>(operation: &'static str, err: E) -> Self
    where
        E: std::error::Error,
    {
        StoreError::Service {
            operation,
            message: DisplayErrorContext(err).to_string(),
        }
    }
}

/// Failure of a single menu operation.
#[derive(Debug, Error)]
pub enum AdminError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("client ID must be a whole number, got '{0}'")]
    InvalidClientId(String),

    #[error("failed to read {}: {source}", .path.display())]
    ReadLocal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    WriteLocal {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to format record: {0}")]
    Format(#[from] serde_json::Error),

    /// Console input ended while an operation was still prompting.
    #[error("console input closed")]
    InputClosed,

    #[error("console I/O failed: {0}")]
    Console(#[from] io::Error),
}

impl AdminError {
    /// Errors after which the menu loop cannot keep talking to the operator.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AdminError::Console(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_console_failures_are_fatal() {
        let console = AdminError::Console(io::Error::new(io::ErrorKind::BrokenPipe, "gone"));
        assert!(console.is_fatal());
        assert!(!AdminError::InvalidClientId("abc".into()).is_fatal());
        assert!(!AdminError::InputClosed.is_fatal());
        assert!(!AdminError::from(StoreError::NotFound("a.pdf".into())).is_fatal());
    }

    #[test]
    fn store_errors_display_their_operation() {
        let err = StoreError::Service {
            operation: "Scan",
            message: "throttled".into(),
        };
        assert_eq!(err.to_string(), "Scan failed: throttled");
        assert_eq!(
            AdminError::from(err).to_string(),
            "Scan failed: throttled"
        );
    }
}
