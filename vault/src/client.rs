//! Vault HTTP client.
//!
//! Resolves paths against `{address}/v1/`, attaches the token and namespace
//! headers, and runs every call through the retry executor.

use secrecy::ExposeSecret;
use tracing::{debug, instrument};
use vault_json::Value;

use crate::config::{VaultConfig, NAMESPACE_HEADER, TOKEN_HEADER};
use crate::error::VaultError;
use crate::request::{HttpMethod, HttpRequest};
use crate::response::HttpResponse;
use crate::retry::{Attempted, ExhaustedRetries, RetryPolicy};
use crate::transport::{BlockingTransport, Transport};

/// Outcome of a client call.
pub type ClientResult = Result<Attempted<HttpResponse>, ExhaustedRetries<VaultError>>;

/// Vault client over a pluggable transport.
#[derive(Debug, Clone)]
pub struct VaultClient<T: Transport = BlockingTransport> {
    config: VaultConfig,
    retry: RetryPolicy,
    transport: T,
}

impl VaultClient {
    /// Create a client using the blocking HTTP transport.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfig`] if the address is unusable.
    pub fn new(config: VaultConfig) -> Result<Self, VaultError> {
        Self::with_transport(config, BlockingTransport::new())
    }
}

impl<T: Transport> VaultClient<T> {
    /// Create a client using `transport`.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfig`] if the address is unusable.
    pub fn with_transport(config: VaultConfig, transport: T) -> Result<Self, VaultError> {
        config.validate()?;
        Ok(Self {
            retry: RetryPolicy::from(&config),
            config,
            transport,
        })
    }

    /// Client configuration.
    #[must_use]
    pub const fn config(&self) -> &VaultConfig {
        &self.config
    }

    /// Retry policy derived from the configuration.
    #[must_use]
    pub const fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Prepare a request for an API path, relative to `/v1/`.
    #[must_use]
    pub fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        let url = format!(
            "{}/v1/{}",
            self.config.address.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        HttpRequest::new(method, url)
            .optional_header(
                TOKEN_HEADER,
                self.config.token.as_ref().map(|t| t.expose_secret().to_string()),
            )
            .optional_header(NAMESPACE_HEADER, self.config.namespace.clone())
            .header("Accept", "application/json")
            .open_timeout(self.config.open_timeout)
            .read_timeout(self.config.read_timeout)
            .tls(self.config.tls.clone())
    }

    /// Send a prepared request under the retry policy.
    ///
    /// Transport failures and non-2xx statuses both count as failed attempts.
    ///
    /// # Errors
    ///
    /// Returns [`ExhaustedRetries`] holding the final attempt's error.
    #[instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    pub fn send(&self, request: &HttpRequest) -> ClientResult {
        let result = self.retry.execute(|attempt| {
            debug!(attempt, "dispatching request");
            self.transport.execute(request)?.error_for_status()
        });
        match &result {
            Ok(done) => debug!(status = done.value.status(), attempts = done.attempts, "request succeeded"),
            Err(failed) => debug!(attempts = failed.attempts, "request failed"),
        }
        result
    }

    /// GET `path` with query parameters.
    ///
    /// # Errors
    ///
    /// See [`VaultClient::send`].
    pub fn get(&self, path: &str, query: &[(&str, &str)]) -> ClientResult {
        self.send(&with_query(self.request(HttpMethod::Get, path), query))
    }

    /// DELETE `path` with query parameters.
    ///
    /// # Errors
    ///
    /// See [`VaultClient::send`].
    pub fn delete(&self, path: &str, query: &[(&str, &str)]) -> ClientResult {
        self.send(&with_query(self.request(HttpMethod::Delete, path), query))
    }

    /// POST a JSON body to `path`.
    ///
    /// # Errors
    ///
    /// See [`VaultClient::send`].
    pub fn post(&self, path: &str, query: &[(&str, &str)], body: &Value) -> ClientResult {
        self.send(&with_query(self.request(HttpMethod::Post, path), query).json(body))
    }

    /// PUT a JSON body to `path`.
    ///
    /// # Errors
    ///
    /// See [`VaultClient::send`].
    pub fn put(&self, path: &str, query: &[(&str, &str)], body: &Value) -> ClientResult {
        self.send(&with_query(self.request(HttpMethod::Put, path), query).json(body))
    }
}

fn with_query(request: HttpRequest, query: &[(&str, &str)]) -> HttpRequest {
    query
        .iter()
        .fold(request, |request, (name, value)| request.query(*name, *value))
}
