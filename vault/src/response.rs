//! HTTP response as returned by the transport.

use vault_json::{parse, Value};

use crate::error::{VaultError, VaultResult};

/// Status, headers and raw body of one HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    status: u16,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    mime_type: Option<String>,
}

impl HttpResponse {
    /// Create a response, deriving the MIME type from `Content-Type`.
    #[must_use]
    pub fn new(status: u16, headers: Vec<(String, String)>, body: Vec<u8>) -> Self {
        let mime_type = headers
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case("content-type"))
            .and_then(|(_, value)| value.split(';').next())
            .map(|essence| essence.trim().to_ascii_lowercase())
            .filter(|essence| !essence.is_empty());

        Self {
            status,
            headers,
            body,
            mime_type,
        }
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status(&self) -> u16 {
        self.status
    }

    /// True for 2xx statuses.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.status >= 200 && self.status < 300
    }

    /// All response headers in received order.
    #[must_use]
    pub fn headers(&self) -> &[(String, String)] {
        &self.headers
    }

    /// First value of a header, matched case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Raw body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// MIME type without parameters, lower-cased.
    #[must_use]
    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    #[must_use]
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    /// Parse the body as JSON. A body that is empty or only JSON whitespace
    /// parses as `null`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Json`] for malformed bodies.
    pub fn json(&self) -> VaultResult<Value> {
        if self
            .body
            .iter()
            .all(|&b| matches!(b, b' ' | b'\t' | b'\n' | b'\r'))
        {
            return Ok(Value::Null);
        }
        Ok(parse(&self.body)?)
    }

    /// Turn a non-2xx response into [`VaultError::HttpStatus`].
    ///
    /// # Errors
    ///
    /// Returns the status and raw body for any non-2xx status.
    pub fn error_for_status(self) -> VaultResult<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(VaultError::http_status(self.status, &self.body))
        }
    }
}
