//! Directory client error types.
//!
//! Every remote failure is a typed variant; the no-op modification condition
//! (`EmptyModlist`) is a first-class variant so callers never have to match
//! on error text. A substring check against foreign error messages is kept
//! only as a compatibility shim for transports that surface the condition as
//! free text.

use thiserror::Error;

/// The literal condition string legacy transports embed in no-op
/// modification errors.
pub const EMPTY_MODLIST_MARKER: &str = "EmptyModlist";

/// Error that can occur while talking to the directory server.
#[derive(Debug, Error)]
pub enum DirectoryError {
    /// Failed to establish a connection to the server.
    #[error("connection failed: {message}")]
    ConnectionFailed {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The call did not complete within the client's timeout.
    #[error("connection timeout after {timeout_secs} seconds")]
    ConnectionTimeout { timeout_secs: u64 },

    /// The server is temporarily unavailable.
    #[error("directory server unavailable: {message}")]
    Unavailable { message: String },

    /// The server refused the configured credentials.
    #[error("authentication failed: invalid credentials")]
    AuthenticationFailed,

    /// The addressed object does not exist.
    #[error("{object_class} '{name}' not found")]
    NotFound { object_class: String, name: String },

    /// An object with the same name already exists.
    #[error("{object_class} '{name}' already exists")]
    AlreadyExists { object_class: String, name: String },

    /// The server reports that a modification contained no actual changes.
    #[error("no modifications to perform on {object_class} '{name}'")]
    EmptyModlist { object_class: String, name: String },

    /// The server rejected the call for any other reason.
    #[error("call rejected: {message}")]
    Rejected {
        /// Machine-readable error code, when the transport exposes one.
        code: Option<i32>,
        message: String,
    },

    /// Client configuration is invalid.
    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    /// Internal client error.
    #[error("internal error: {message}")]
    Internal {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl DirectoryError {
    /// Check whether this error is the no-op modification condition.
    ///
    /// Prefers the structured [`DirectoryError::EmptyModlist`] variant;
    /// falls back to matching the marker substring in `Rejected` messages
    /// for transports that only relay the server's text.
    pub fn is_no_op(&self) -> bool {
        match self {
            DirectoryError::EmptyModlist { .. } => true,
            DirectoryError::Rejected { message, .. } => message.contains(EMPTY_MODLIST_MARKER),
            _ => false,
        }
    }

    /// Check whether this error means the addressed object is absent.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DirectoryError::NotFound { .. })
    }

    /// Get a stable code for classification and logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            DirectoryError::ConnectionFailed { .. } => "CONNECTION_FAILED",
            DirectoryError::ConnectionTimeout { .. } => "CONNECTION_TIMEOUT",
            DirectoryError::Unavailable { .. } => "UNAVAILABLE",
            DirectoryError::AuthenticationFailed => "AUTH_FAILED",
            DirectoryError::NotFound { .. } => "NOT_FOUND",
            DirectoryError::AlreadyExists { .. } => "ALREADY_EXISTS",
            DirectoryError::EmptyModlist { .. } => "EMPTY_MODLIST",
            DirectoryError::Rejected { .. } => "REJECTED",
            DirectoryError::InvalidConfiguration { .. } => "INVALID_CONFIG",
            DirectoryError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    // Convenience constructors

    /// Create a connection failed error.
    pub fn connection_failed(message: impl Into<String>) -> Self {
        DirectoryError::ConnectionFailed {
            message: message.into(),
            source: None,
        }
    }

    /// Create a connection failed error with an underlying source.
    pub fn connection_failed_with_source(
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        DirectoryError::ConnectionFailed {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        DirectoryError::Unavailable {
            message: message.into(),
        }
    }

    /// Create a not-found error.
    pub fn not_found(object_class: impl Into<String>, name: impl Into<String>) -> Self {
        DirectoryError::NotFound {
            object_class: object_class.into(),
            name: name.into(),
        }
    }

    /// Create an already-exists error.
    pub fn already_exists(object_class: impl Into<String>, name: impl Into<String>) -> Self {
        DirectoryError::AlreadyExists {
            object_class: object_class.into(),
            name: name.into(),
        }
    }

    /// Create an empty-modlist error.
    pub fn empty_modlist(object_class: impl Into<String>, name: impl Into<String>) -> Self {
        DirectoryError::EmptyModlist {
            object_class: object_class.into(),
            name: name.into(),
        }
    }

    /// Create a rejected error.
    pub fn rejected(message: impl Into<String>) -> Self {
        DirectoryError::Rejected {
            code: None,
            message: message.into(),
        }
    }

    /// Create an invalid-configuration error.
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        DirectoryError::InvalidConfiguration {
            message: message.into(),
        }
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        DirectoryError::Internal {
            message: message.into(),
            source: None,
        }
    }
}

/// Result type for directory client operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_op_structured_variant() {
        let err = DirectoryError::empty_modlist("user", "jdoe");
        assert!(err.is_no_op());
        assert_eq!(err.error_code(), "EMPTY_MODLIST");
    }

    #[test]
    fn test_no_op_compat_shim_on_rejected_text() {
        let err = DirectoryError::rejected("server said: EmptyModlist: no changes");
        assert!(err.is_no_op());

        let other = DirectoryError::rejected("permission denied");
        assert!(!other.is_no_op());
    }

    #[test]
    fn test_not_found_is_never_a_no_op() {
        let err = DirectoryError::not_found("dnszone", "example.test.");
        assert!(err.is_not_found());
        assert!(!err.is_no_op());
    }

    #[test]
    fn test_display_messages() {
        let err = DirectoryError::not_found("host", "h1.example.test.");
        assert_eq!(err.to_string(), "host 'h1.example.test.' not found");

        let err = DirectoryError::empty_modlist("group", "admins");
        assert_eq!(err.to_string(), "no modifications to perform on group 'admins'");
    }

    #[test]
    fn test_error_with_source() {
        let source = std::io::Error::other("connection reset");
        let err = DirectoryError::connection_failed_with_source("lost server", source);

        if let DirectoryError::ConnectionFailed { source, .. } = &err {
            assert!(source.is_some());
        } else {
            panic!("expected ConnectionFailed variant");
        }
    }
}
