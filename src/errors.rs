use thiserror::Error;

pub type Result<T> = std::result::Result<T, TrackerError>;

/// Error type that captures the tracker's failure modes.
///
/// None of these are fatal to a running session: validation and import
/// failures report back to the user, persistence failures degrade to the
/// in-memory state.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// One or more business rules rejected a candidate transaction.
    /// Messages are ordered the way the rules are checked.
    #[error("invalid transaction: {}", .0.join("; "))]
    Validation(Vec<String>),
    /// An update or delete referenced an id that is not in the store.
    #[error("transaction `{0}` not found")]
    TransactionNotFound(String),
    /// Storage slot read/write failure.
    #[error("persistence error: {0}")]
    Persistence(String),
    /// Import file could not be used: unsupported extension, unparsable
    /// payload, or no usable records.
    #[error("import failed: {0}")]
    ImportFormat(String),
}

impl From<std::io::Error> for TrackerError {
    fn from(err: std::io::Error) -> Self {
        TrackerError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Persistence(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_display_joins_messages() {
        let err = TrackerError::Validation(vec![
            "Amount must be a positive number".to_string(),
            "Date is required".to_string(),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid transaction: Amount must be a positive number; Date is required"
        );
    }

    #[test]
    fn io_errors_map_to_persistence() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: TrackerError = io.into();
        assert!(matches!(err, TrackerError::Persistence(_)));
    }
}
