//! TLS trust configuration and policy resolution.
//!
//! Resolution order: custom PEM trust anchors when supplied, otherwise the
//! system trust store. Disabling verification is an explicit opt-in and
//! still encrypts the connection; it only stops authenticating the peer.

use std::fmt;
use std::path::PathBuf;

use reqwest::blocking::ClientBuilder;
use reqwest::Certificate;

use crate::error::{VaultError, VaultResult};

/// Where custom PEM trust material comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PemSource {
    /// PEM text held in memory (inline config, embedded resource)
    Bytes(Vec<u8>),
    /// PEM file on disk
    File(PathBuf),
}

impl PemSource {
    fn load(&self) -> VaultResult<Vec<u8>> {
        match self {
            Self::Bytes(bytes) => Ok(bytes.clone()),
            Self::File(path) => std::fs::read(path).map_err(|e| {
                VaultError::tls(format!("cannot read CA bundle {}: {e}", path.display()))
            }),
        }
    }
}

/// TLS settings for a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsConfig {
    /// Verify the server certificate chain
    pub verify: bool,
    /// Custom trust anchors; `None` uses the system trust store
    pub trust: Option<PemSource>,
}

impl Default for TlsConfig {
    fn default() -> Self {
        Self {
            verify: true,
            trust: None,
        }
    }
}

impl TlsConfig {
    /// Verify against the system trust store.
    #[must_use]
    pub fn system() -> Self {
        Self::default()
    }

    /// Verify against PEM certificates held in memory.
    #[must_use]
    pub fn with_pem(pem: impl Into<Vec<u8>>) -> Self {
        Self {
            verify: true,
            trust: Some(PemSource::Bytes(pem.into())),
        }
    }

    /// Verify against a PEM bundle on disk.
    #[must_use]
    pub fn with_pem_file(path: impl Into<PathBuf>) -> Self {
        Self {
            verify: true,
            trust: Some(PemSource::File(path.into())),
        }
    }

    /// Skip certificate verification. The connection is still encrypted.
    #[must_use]
    pub const fn insecure() -> Self {
        Self {
            verify: false,
            trust: None,
        }
    }

    /// Resolve into the policy applied to the HTTP client.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::Tls`] if custom trust material cannot be read or
    /// contains no certificates.
    pub fn resolve(&self) -> VaultResult<TlsPolicy> {
        if !self.verify {
            return Ok(TlsPolicy::Insecure);
        }
        match &self.trust {
            None => Ok(TlsPolicy::System),
            Some(source) => {
                let pem = source.load()?;
                let certs = Certificate::from_pem_bundle(&pem)
                    .map_err(|e| VaultError::tls(format!("invalid PEM trust material: {e}")))?;
                if certs.is_empty() {
                    return Err(VaultError::tls("PEM trust material contains no certificates"));
                }
                Ok(TlsPolicy::Custom(certs))
            }
        }
    }
}

/// Resolved TLS behaviour for one client.
pub enum TlsPolicy {
    /// Trust only the supplied certificates
    Custom(Vec<Certificate>),
    /// Trust the system store
    System,
    /// Accept any certificate
    Insecure,
}

impl TlsPolicy {
    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Custom(_) => "custom",
            Self::System => "system",
            Self::Insecure => "insecure",
        }
    }

    /// Apply to a client builder.
    #[must_use]
    pub fn apply(self, builder: ClientBuilder) -> ClientBuilder {
        match self {
            Self::Custom(certs) => certs
                .into_iter()
                .fold(builder.tls_built_in_root_certs(false), ClientBuilder::add_root_certificate),
            Self::System => builder,
            Self::Insecure => builder.danger_accept_invalid_certs(true),
        }
    }
}

impl fmt::Debug for TlsPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(certs) => f.debug_tuple("Custom").field(&certs.len()).finish(),
            Self::System => f.write_str("System"),
            Self::Insecure => f.write_str("Insecure"),
        }
    }
}
