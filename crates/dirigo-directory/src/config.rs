//! Client configuration types.
//!
//! One `DirectoryConfig` is built from provider-level settings and handed to
//! whichever transport implements [`crate::client::DirectoryClient`].

use serde::{Deserialize, Serialize};

use crate::error::{DirectoryError, DirectoryResult};

/// Connection timeouts shared by all transports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionSettings {
    /// Connect timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_request_timeout() -> u64 {
    60
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            connect_timeout_secs: default_connect_timeout(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl ConnectionSettings {
    /// Connect timeout as a `Duration`.
    pub fn connect_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.connect_timeout_secs)
    }

    /// Request timeout as a `Duration`.
    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.request_timeout_secs)
    }
}

/// TLS settings for the server connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TlsConfig {
    /// Whether to verify the server certificate.
    #[serde(default = "default_true")]
    pub verify_certificate: bool,

    /// Path to a CA certificate bundle.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ca_cert_path: Option<String>,
}

fn default_true() -> bool {
    true
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            verify_certificate: true,
            ca_cert_path: None,
        }
    }
}

impl TlsConfig {
    /// Log a security warning when certificate verification is disabled.
    ///
    /// Call after deserializing from external sources.
    pub fn validate_security(&self) {
        if !self.verify_certificate {
            tracing::warn!(
                target: "security",
                "TLS certificate verification is DISABLED; the connection is \
                 vulnerable to man-in-the-middle attacks. Only use this for \
                 local development."
            );
        }
    }
}

/// Provider-level configuration for reaching the directory server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DirectoryConfig {
    /// Server host name.
    pub host: String,

    /// Server port.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Base path of the RPC endpoint.
    #[serde(default = "default_base_path")]
    pub base_path: String,

    /// Principal used to authenticate.
    pub username: String,

    /// Password for the principal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    /// TLS settings.
    #[serde(default)]
    pub tls: TlsConfig,

    /// Connection timeouts.
    #[serde(default)]
    pub connection: ConnectionSettings,
}

fn default_port() -> u16 {
    443
}

fn default_base_path() -> String {
    "/rpc".to_string()
}

impl DirectoryConfig {
    /// Create a configuration for the given host and principal.
    pub fn new(host: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port: default_port(),
            base_path: default_base_path(),
            username: username.into(),
            password: None,
            tls: TlsConfig::default(),
            connection: ConnectionSettings::default(),
        }
    }

    /// Set the password.
    #[must_use]
    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.password = Some(password.into());
        self
    }

    /// Set the port.
    #[must_use]
    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Validate the configuration.
    pub fn validate(&self) -> DirectoryResult<()> {
        if self.host.trim().is_empty() {
            return Err(DirectoryError::invalid_configuration("host must not be empty"));
        }
        if self.port == 0 {
            return Err(DirectoryError::invalid_configuration("port must not be zero"));
        }
        if self.username.trim().is_empty() {
            return Err(DirectoryError::invalid_configuration(
                "username must not be empty",
            ));
        }
        self.tls.validate_security();
        Ok(())
    }

    /// The server's base URL.
    pub fn base_url(&self) -> String {
        format!("https://{}:{}{}", self.host, self.port, self.base_path)
    }

    /// A copy safe for logging, with credentials redacted.
    pub fn redacted(&self) -> Self {
        Self {
            password: self.password.as_ref().map(|_| "***REDACTED***".to_string()),
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DirectoryConfig::new("idm.example.test", "admin");
        assert_eq!(config.port, 443);
        assert_eq!(config.base_path, "/rpc");
        assert!(config.tls.verify_certificate);
        assert_eq!(config.connection.connect_timeout_secs, 30);
        assert_eq!(config.connection.request_timeout_secs, 60);
    }

    #[test]
    fn test_validate_rejects_empty_host() {
        let config = DirectoryConfig::new("", "admin");
        let err = config.validate().unwrap_err();
        assert_eq!(err.error_code(), "INVALID_CONFIG");
    }

    #[test]
    fn test_validate_rejects_empty_username() {
        let config = DirectoryConfig::new("idm.example.test", "  ");
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_base_url() {
        let config = DirectoryConfig::new("idm.example.test", "admin").with_port(8443);
        assert_eq!(config.base_url(), "https://idm.example.test:8443/rpc");
    }

    #[test]
    fn test_redacted_hides_password() {
        let config = DirectoryConfig::new("idm.example.test", "admin").with_password("hunter2");
        let redacted = config.redacted();
        assert_eq!(redacted.password.as_deref(), Some("***REDACTED***"));
        assert_eq!(redacted.username, "admin");
    }

    #[test]
    fn test_deserialization_applies_defaults() {
        let config: DirectoryConfig =
            serde_json::from_str(r#"{"host": "idm.example.test", "username": "admin"}"#).unwrap();
        assert_eq!(config.port, 443);
        assert!(config.validate().is_ok());
    }
}
