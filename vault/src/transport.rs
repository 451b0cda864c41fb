//! Blocking HTTP transport.
//!
//! Each `execute` builds its own client from the request's TLS policy and
//! timeouts, performs one physical connection attempt with pooling
//! disabled, reads the full body, and tears everything down. Retrying is
//! layered on top by [`crate::retry`].

use reqwest::blocking::Client;
use reqwest::header::CONTENT_LENGTH;
use tracing::{debug, instrument};

use crate::error::{VaultError, VaultResult};
use crate::request::HttpRequest;
use crate::response::HttpResponse;

/// User agent sent with every request.
pub const USER_AGENT: &str = concat!("vault-core-rust/", env!("CARGO_PKG_VERSION"));

/// Executes a single HTTP request.
pub trait Transport {
    /// Perform the request once.
    ///
    /// # Errors
    ///
    /// [`VaultError::Connect`], [`VaultError::Timeout`] or [`VaultError::Tls`]
    /// for network failures; [`VaultError::InvalidRequest`] when the request
    /// cannot be built. Non-2xx statuses are returned as responses.
    fn execute(&self, request: &HttpRequest) -> VaultResult<HttpResponse>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn execute(&self, request: &HttpRequest) -> VaultResult<HttpResponse> {
        (**self).execute(request)
    }
}

/// Transport backed by reqwest's blocking client over rustls.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlockingTransport;

impl BlockingTransport {
    /// Create a new transport.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn build_client(request: &HttpRequest) -> VaultResult<Client> {
        let policy = request.tls_config().resolve()?;
        debug!(tls = policy.name(), "building HTTP client");

        let builder = Client::builder()
            .use_rustls_tls()
            .user_agent(USER_AGENT)
            .pool_max_idle_per_host(0)
            .connect_timeout(request.connect_deadline())
            .timeout(request.read_deadline());

        policy
            .apply(builder)
            .build()
            .map_err(|e| VaultError::tls(format!("cannot initialise TLS client: {e}")))
    }
}

impl Transport for BlockingTransport {
    #[instrument(skip_all, fields(method = %request.method(), url = %request.url()))]
    fn execute(&self, request: &HttpRequest) -> VaultResult<HttpResponse> {
        let url = request.resolved_url()?;
        let client = Self::build_client(request)?;

        let mut builder = client.request(request.method().into(), url);
        for (name, value) in request.effective_headers() {
            builder = builder.header(name, value);
        }
        if request.method().sends_body() {
            let body = request.body_bytes().unwrap_or_default().to_vec();
            builder = builder.header(CONTENT_LENGTH, body.len()).body(body);
        }

        let response = builder.send().map_err(|e| VaultError::from_reqwest(&e))?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_string(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .bytes()
            .map_err(|e| VaultError::from_reqwest(&e))?
            .to_vec();

        debug!(status, body_len = body.len(), "received response");
        Ok(HttpResponse::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::request::HttpMethod;
    use std::time::Duration;

    #[test]
    fn test_invalid_url_fails_before_connecting() {
        let request = HttpRequest::new(HttpMethod::Get, "not a url");
        let err = BlockingTransport::new().execute(&request).unwrap_err();
        assert!(matches!(err, VaultError::InvalidRequest(_)));
    }

    #[test]
    fn test_connection_refused_is_connect_error() {
        // port 1 on loopback has no listener
        let request = HttpRequest::new(HttpMethod::Get, "http://127.0.0.1:1/v1/sys/health")
            .open_timeout(Duration::from_secs(2));
        let err = BlockingTransport::new().execute(&request).unwrap_err();
        assert!(matches!(err, VaultError::Connect(_)), "got {err:?}");
    }

    #[test]
    fn test_bad_trust_material_is_tls_error() {
        let request = HttpRequest::new(HttpMethod::Get, "https://127.0.0.1:1/")
            .tls(crate::tls::TlsConfig::with_pem(Vec::new()));
        let err = BlockingTransport::new().execute(&request).unwrap_err();
        assert!(matches!(err, VaultError::Tls(_)));
    }

    #[test]
    fn test_user_agent_names_crate() {
        assert!(USER_AGENT.starts_with("vault-core-rust/"));
    }
}
