//! Blocking HTTP core for Vault clients.
//!
//! Provides a single-attempt HTTP transport with TLS trust policy and
//! timeouts, a fixed-interval retry executor that reports how many attempts
//! a call took, and a small client that ties both to a [`VaultConfig`].
//!
//! ```no_run
//! use vault_core::{VaultClient, VaultConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = VaultConfig::from_env()?.with_max_attempts(3);
//! let client = VaultClient::new(config)?;
//! let response = client.get("secret/data/app", &[])?;
//! let secret = response.value.json()?;
//! println!("{} attempt(s): {}", response.attempts, secret.pointer("/data/data").is_some());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod client;
pub mod config;
pub mod error;
pub mod request;
pub mod response;
pub mod retry;
pub mod tls;
pub mod tracing_config;
pub mod transport;

pub use client::{ClientResult, VaultClient};
pub use config::VaultConfig;
pub use error::{VaultError, VaultResult};
pub use request::{HttpMethod, HttpRequest};
pub use response::HttpResponse;
pub use retry::{with_retries, Attempted, ExhaustedRetries, RetryPolicy};
pub use tls::{PemSource, TlsConfig, TlsPolicy};
pub use transport::{BlockingTransport, Transport};
