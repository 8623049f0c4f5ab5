//! Reconciler error types.

use thiserror::Error;

use dirigo_directory::error::DirectoryError;

use crate::fields::ValueShape;
use crate::kinds::Kind;

/// Error that can occur while reconciling a managed object.
#[derive(Debug, Error)]
pub enum ReconcileError {
    /// No usable directory client could be obtained from the provider
    /// configuration. Raised by the wiring layer before any operation runs.
    #[error("no usable directory client: {message}")]
    ClientUnavailable { message: String },

    /// The remote call failed with anything other than the no-op condition.
    #[error("remote call rejected: {0}")]
    Remote(#[from] DirectoryError),

    /// A composite identifier does not parse.
    #[error("malformed identifier '{id}': {reason}")]
    MalformedIdentifier { id: String, reason: String },

    /// Read found the remote object diverged from the recorded state; local
    /// state has already been cleared.
    #[error("drift detected for '{id}': {detail}")]
    DriftDetected { id: String, detail: String },

    /// A declared timestamp is not valid RFC3339. Raised before any remote
    /// call is made.
    #[error("invalid timestamp in '{attribute}': '{value}' is not RFC3339")]
    TimestampParse {
        attribute: String,
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// The declared DNS record type is not one of the supported kinds.
    #[error("unsupported DNS record type '{value}'")]
    UnsupportedRecordType { value: String },

    /// A required attribute is missing from the declaration.
    #[error("missing required attribute '{attribute}' for {kind}")]
    MissingAttribute { kind: Kind, attribute: &'static str },

    /// A declared attribute carries the wrong value shape.
    #[error("attribute '{attribute}' must be {expected}")]
    InvalidValue {
        attribute: String,
        expected: ValueShape,
    },

    /// An identity-determining attribute appeared in an update diff.
    /// Changing it requires destroying and recreating the object.
    #[error("attribute '{attribute}' of {kind} cannot change without replacement")]
    ImmutableAttribute { kind: Kind, attribute: String },

    /// The declaration is internally inconsistent.
    #[error("invalid declaration: {message}")]
    InvalidSpec { message: String },

    /// The object has no local identifier; it was never created or has been
    /// deleted.
    #[error("{kind} object has no identifier")]
    MissingIdentifier { kind: Kind },
}

impl ReconcileError {
    /// Get a stable code for classification and logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            ReconcileError::ClientUnavailable { .. } => "CLIENT_UNAVAILABLE",
            ReconcileError::Remote(_) => "REMOTE_REJECTED",
            ReconcileError::MalformedIdentifier { .. } => "MALFORMED_IDENTIFIER",
            ReconcileError::DriftDetected { .. } => "DRIFT_DETECTED",
            ReconcileError::TimestampParse { .. } => "TIMESTAMP_PARSE",
            ReconcileError::UnsupportedRecordType { .. } => "UNSUPPORTED_RECORD_TYPE",
            ReconcileError::MissingAttribute { .. } => "MISSING_ATTRIBUTE",
            ReconcileError::InvalidValue { .. } => "INVALID_VALUE",
            ReconcileError::ImmutableAttribute { .. } => "IMMUTABLE_ATTRIBUTE",
            ReconcileError::InvalidSpec { .. } => "INVALID_SPEC",
            ReconcileError::MissingIdentifier { .. } => "MISSING_IDENTIFIER",
        }
    }

    // Convenience constructors

    /// Create a client-unavailable error.
    pub fn client_unavailable(message: impl Into<String>) -> Self {
        ReconcileError::ClientUnavailable {
            message: message.into(),
        }
    }

    /// Create a malformed-identifier error.
    pub fn malformed_identifier(id: impl Into<String>, reason: impl Into<String>) -> Self {
        ReconcileError::MalformedIdentifier {
            id: id.into(),
            reason: reason.into(),
        }
    }

    /// Create a drift error.
    pub fn drift(id: impl Into<String>, detail: impl Into<String>) -> Self {
        ReconcileError::DriftDetected {
            id: id.into(),
            detail: detail.into(),
        }
    }

    /// Create an invalid-declaration error.
    pub fn invalid_spec(message: impl Into<String>) -> Self {
        ReconcileError::InvalidSpec {
            message: message.into(),
        }
    }
}

/// Result type for reconciler operations.
pub type ReconcileResult<T> = Result<T, ReconcileError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_wraps_directory_error() {
        let err: ReconcileError = DirectoryError::not_found("dnszone", "example.test.").into();
        assert_eq!(err.error_code(), "REMOTE_REJECTED");
        assert!(err.to_string().contains("not found"));
    }

    #[test]
    fn test_display_messages() {
        let err = ReconcileError::malformed_identifier("a/b", "expected three parts");
        assert_eq!(
            err.to_string(),
            "malformed identifier 'a/b': expected three parts"
        );

        let err = ReconcileError::client_unavailable("provider not configured");
        assert_eq!(err.error_code(), "CLIENT_UNAVAILABLE");

        let err = ReconcileError::UnsupportedRecordType {
            value: "SPF".to_string(),
        };
        assert_eq!(err.to_string(), "unsupported DNS record type 'SPF'");
    }
}
