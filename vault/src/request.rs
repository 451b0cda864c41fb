//! Outgoing HTTP request description.
//!
//! A request is plain data: the transport turns it into exactly one
//! physical connection attempt. Nothing here is reused across attempts.

use std::fmt;
use std::time::Duration;

use url::Url;
use vault_json::{write, Value, WriteStyle};

use crate::error::{VaultError, VaultResult};
use crate::tls::TlsConfig;

/// Default connect timeout.
pub const DEFAULT_OPEN_TIMEOUT: Duration = Duration::from_secs(30);

/// Default read timeout.
pub const DEFAULT_READ_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP methods used against the Vault API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// POST
    Post,
    /// PUT
    Put,
    /// DELETE
    Delete,
}

impl HttpMethod {
    /// Method name on the request line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }

    /// Write-style methods carry a body; GET and DELETE never do.
    #[must_use]
    pub const fn sends_body(self) -> bool {
        matches!(self, Self::Post | Self::Put)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Self::GET,
            HttpMethod::Post => Self::POST,
            HttpMethod::Put => Self::PUT,
            HttpMethod::Delete => Self::DELETE,
        }
    }
}

/// A single HTTP request.
#[derive(Clone)]
pub struct HttpRequest {
    method: HttpMethod,
    url: String,
    headers: Vec<(String, Option<String>)>,
    query: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    open_timeout: Duration,
    read_timeout: Duration,
    tls: TlsConfig,
}

impl HttpRequest {
    /// Create a request for an absolute URL.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            query: Vec::new(),
            body: None,
            open_timeout: DEFAULT_OPEN_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            tls: TlsConfig::default(),
        }
    }

    /// Append a header. Duplicates are allowed; see [`HttpRequest::effective_headers`].
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), Some(value.into())));
        self
    }

    /// Append a header whose value may be absent.
    #[must_use]
    pub fn optional_header(mut self, name: impl Into<String>, value: Option<String>) -> Self {
        self.headers.push((name.into(), value));
        self
    }

    /// Append a query parameter.
    #[must_use]
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Set raw body bytes.
    #[must_use]
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set a compact JSON body and its content type.
    #[must_use]
    pub fn json(self, value: &Value) -> Self {
        self.header("Content-Type", "application/json")
            .body(write(value, &WriteStyle::compact()))
    }

    /// Set the connect timeout. Zero disables it.
    #[must_use]
    pub const fn open_timeout(mut self, timeout: Duration) -> Self {
        self.open_timeout = timeout;
        self
    }

    /// Set the read timeout. Zero disables it.
    #[must_use]
    pub const fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set TLS configuration.
    #[must_use]
    pub fn tls(mut self, tls: TlsConfig) -> Self {
        self.tls = tls;
        self
    }

    /// Request method.
    #[must_use]
    pub const fn method(&self) -> HttpMethod {
        self.method
    }

    /// URL as supplied, without merged query parameters.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Body bytes, if any.
    #[must_use]
    pub fn body_bytes(&self) -> Option<&[u8]> {
        self.body.as_deref()
    }

    /// Connect timeout, `None` when disabled.
    #[must_use]
    pub fn connect_deadline(&self) -> Option<Duration> {
        (!self.open_timeout.is_zero()).then_some(self.open_timeout)
    }

    /// Read timeout, `None` when disabled.
    #[must_use]
    pub fn read_deadline(&self) -> Option<Duration> {
        (!self.read_timeout.is_zero()).then_some(self.read_timeout)
    }

    /// TLS configuration.
    #[must_use]
    pub const fn tls_config(&self) -> &TlsConfig {
        &self.tls
    }

    /// Headers actually sent.
    ///
    /// Entries with an absent or empty value are dropped; of the rest, the
    /// last value for each name (compared case-insensitively) wins. Names
    /// keep the position of their first appearance.
    #[must_use]
    pub fn effective_headers(&self) -> Vec<(&str, &str)> {
        let mut resolved: Vec<(&str, &str)> = Vec::new();
        for (name, value) in &self.headers {
            let Some(value) = value.as_deref().filter(|v| !v.is_empty()) else {
                continue;
            };
            match resolved
                .iter_mut()
                .find(|(existing, _)| existing.eq_ignore_ascii_case(name))
            {
                Some(slot) => slot.1 = value,
                None => resolved.push((name.as_str(), value)),
            }
        }
        resolved
    }

    /// URL with query parameters appended after any existing query string.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidRequest`] if the URL is not absolute
    /// HTTP(S).
    pub fn resolved_url(&self) -> VaultResult<Url> {
        let mut url = Url::parse(&self.url)
            .map_err(|e| VaultError::invalid_request(format!("invalid URL {}: {e}", self.url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(VaultError::invalid_request(format!(
                "unsupported scheme {} in {}",
                url.scheme(),
                self.url
            )));
        }
        if !self.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(self.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }
        Ok(url)
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header_names: Vec<&str> = self.headers.iter().map(|(n, _)| n.as_str()).collect();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("headers", &header_names)
            .field("query", &self.query)
            .field("body_len", &self.body.as_ref().map(Vec::len))
            .field("open_timeout", &self.open_timeout)
            .field("read_timeout", &self.read_timeout)
            .field("tls", &self.tls)
            .finish()
    }
}
