//! Vault error types using thiserror 2.0.
//!
//! Transport failures are split by kind (connect, timeout, TLS) so callers
//! and retry closures can tell a connectivity problem from a server-reported
//! error.

use std::error::Error as StdError;

use thiserror::Error;
use vault_json::JsonError;

/// Vault-specific errors.
#[derive(Error, Debug)]
pub enum VaultError {
    /// Could not establish a connection (DNS, refused, unreachable)
    #[error("Connection failed: {0}")]
    Connect(String),

    /// Connect or read deadline exceeded
    #[error("Request timed out: {0}")]
    Timeout(String),

    /// Certificate validation or trust material failure
    #[error("TLS error: {0}")]
    Tls(String),

    /// Request could not be built (bad URL, header, method)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Non-success status, classified as a failure by the caller
    #[error("Vault responded with status {status}: {body}")]
    HttpStatus {
        /// HTTP status code
        status: u16,
        /// Raw response body, lossily decoded
        body: String,
    },

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] JsonError),
}

/// Result type for Vault operations.
pub type VaultResult<T> = Result<T, VaultError>;

impl VaultError {
    /// Check if error is retryable.
    ///
    /// Connectivity failures, rate limiting and server-side errors are
    /// transient; everything else will fail the same way again.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Connect(_) | Self::Timeout(_) => true,
            Self::HttpStatus { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }

    /// Status code for HTTP-level failures.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Create a connection error.
    #[must_use]
    pub fn connect(msg: impl Into<String>) -> Self {
        Self::Connect(msg.into())
    }

    /// Create a timeout error.
    #[must_use]
    pub fn timeout(msg: impl Into<String>) -> Self {
        Self::Timeout(msg.into())
    }

    /// Create a TLS error.
    #[must_use]
    pub fn tls(msg: impl Into<String>) -> Self {
        Self::Tls(msg.into())
    }

    /// Create an invalid request error.
    #[must_use]
    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    /// Create an invalid configuration error.
    #[must_use]
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Create an HTTP status error from a raw body.
    #[must_use]
    pub fn http_status(status: u16, body: &[u8]) -> Self {
        Self::HttpStatus {
            status,
            body: String::from_utf8_lossy(body).into_owned(),
        }
    }

    /// Classify a reqwest failure into connect, timeout or TLS.
    #[must_use]
    pub fn from_reqwest(err: &reqwest::Error) -> Self {
        let detail = describe_chain(err);
        if err.is_timeout() {
            Self::Timeout(detail)
        } else if is_tls_failure(err) {
            Self::Tls(detail)
        } else if err.is_builder() {
            Self::InvalidRequest(detail)
        } else {
            Self::Connect(detail)
        }
    }
}

/// Join an error and all of its sources into one line.
fn describe_chain(err: &(dyn StdError + 'static)) -> String {
    let mut parts = vec![err.to_string()];
    let mut current = err.source();
    while let Some(cause) = current {
        let text = cause.to_string();
        if !parts.iter().any(|p| p.contains(&text)) {
            parts.push(text);
        }
        current = cause.source();
    }
    parts.join(": ")
}

/// True when a rustls error appears anywhere in the source chain.
///
/// hyper nests handshake failures two `io::Error` layers deep, and
/// `io::Error::source()` skips a custom payload, so the walk descends into
/// `get_ref()` instead.
fn is_tls_failure(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(e) = current {
        if e.downcast_ref::<rustls::Error>().is_some() {
            return true;
        }
        current = match e.downcast_ref::<std::io::Error>().and_then(std::io::Error::get_ref) {
            Some(inner) => Some(inner as &(dyn StdError + 'static)),
            None => e.source(),
        };
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = VaultError::connect("connection refused");
        assert_eq!(err.to_string(), "Connection failed: connection refused");

        let err = VaultError::http_status(503, b"{\"errors\":[]}");
        assert_eq!(err.to_string(), "Vault responded with status 503: {\"errors\":[]}");
    }

    #[test]
    fn test_retryable_errors() {
        assert!(VaultError::connect("refused").is_retryable());
        assert!(VaultError::timeout("read").is_retryable());
        assert!(VaultError::http_status(500, b"").is_retryable());
        assert!(VaultError::http_status(429, b"").is_retryable());
        assert!(!VaultError::http_status(404, b"").is_retryable());
        assert!(!VaultError::tls("unknown issuer").is_retryable());
        assert!(!VaultError::invalid_config("addr").is_retryable());
    }

    #[test]
    fn test_status_accessor() {
        assert_eq!(VaultError::http_status(403, b"denied").status(), Some(403));
        assert_eq!(VaultError::timeout("t").status(), None);
    }

    #[test]
    fn test_from_json_error() {
        let json_err = vault_json::parse_str("{").unwrap_err();
        let vault_err: VaultError = json_err.into();
        assert!(matches!(vault_err, VaultError::Json(JsonError::Parse { .. })));
    }

    #[test]
    fn test_tls_failure_detected_through_io_error() {
        let tls = rustls::Error::InvalidCertificate(rustls::CertificateError::UnknownIssuer);
        let io = std::io::Error::new(std::io::ErrorKind::InvalidData, tls);
        assert!(is_tls_failure(&io));

        let plain = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
        assert!(!is_tls_failure(&plain));
    }

    #[test]
    fn test_tls_failure_detected_through_nested_io_errors() {
        let tls = rustls::Error::InvalidCertificate(rustls::CertificateError::UnknownIssuer);
        let inner = std::io::Error::new(std::io::ErrorKind::InvalidData, tls);
        let outer = std::io::Error::other(inner);
        assert!(is_tls_failure(&outer));

        let refused = std::io::Error::other(std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "refused",
        ));
        assert!(!is_tls_failure(&refused));
    }

    #[test]
    fn test_chain_description() {
        let inner = std::io::Error::new(std::io::ErrorKind::TimedOut, "deadline");
        assert_eq!(describe_chain(&inner), "deadline");
    }
}
