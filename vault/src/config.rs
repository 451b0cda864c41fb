//! Vault client configuration.
//!
//! Resolved once, from the environment or explicitly, and passed to the
//! client by value. Nothing here is process-global.

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::{VaultError, VaultResult};
use crate::request::{DEFAULT_OPEN_TIMEOUT, DEFAULT_READ_TIMEOUT};
use crate::retry::{DEFAULT_MAX_ATTEMPTS, DEFAULT_RETRY_INTERVAL};
use crate::tls::{PemSource, TlsConfig};

/// Header carrying the client token.
pub const TOKEN_HEADER: &str = "X-Vault-Token";

/// Header carrying the namespace.
pub const NAMESPACE_HEADER: &str = "X-Vault-Namespace";

/// Default server address.
pub const DEFAULT_ADDRESS: &str = "http://127.0.0.1:8200";

/// Vault client configuration.
#[derive(Clone)]
pub struct VaultConfig {
    /// Server base URL
    pub address: String,
    /// Client token
    pub token: Option<SecretString>,
    /// Enterprise namespace
    pub namespace: Option<String>,
    /// Connect timeout; zero disables
    pub open_timeout: Duration,
    /// Read timeout; zero disables
    pub read_timeout: Duration,
    /// TLS verification and trust anchors
    pub tls: TlsConfig,
    /// Total attempts per request
    pub max_attempts: u32,
    /// Wait between attempts
    pub retry_interval: Duration,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            token: None,
            namespace: None,
            open_timeout: DEFAULT_OPEN_TIMEOUT,
            read_timeout: DEFAULT_READ_TIMEOUT,
            tls: TlsConfig::default(),
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_interval: DEFAULT_RETRY_INTERVAL,
        }
    }
}

impl fmt::Debug for VaultConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultConfig")
            .field("address", &self.address)
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .field("namespace", &self.namespace)
            .field("open_timeout", &self.open_timeout)
            .field("read_timeout", &self.read_timeout)
            .field("tls", &self.tls)
            .field("max_attempts", &self.max_attempts)
            .field("retry_interval", &self.retry_interval)
            .finish()
    }
}

impl VaultConfig {
    /// Create a configuration for `address` with all other fields defaulted.
    #[must_use]
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            ..Default::default()
        }
    }

    /// Resolve from `VAULT_*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfig`] for malformed values.
    pub fn from_env() -> VaultResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve using `lookup` in place of the environment.
    ///
    /// Unset and empty variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfig`] for malformed values.
    pub fn from_lookup<F>(lookup: F) -> VaultResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut config = Self::default();

        if let Some(address) = get("VAULT_ADDR") {
            config.address = address;
        }
        config.token = get("VAULT_TOKEN").map(SecretString::from);
        config.namespace = get("VAULT_NAMESPACE");
        if let Some(secs) = get("VAULT_OPEN_TIMEOUT") {
            config.open_timeout = parse_seconds("VAULT_OPEN_TIMEOUT", &secs)?;
        }
        if let Some(secs) = get("VAULT_READ_TIMEOUT") {
            config.read_timeout = parse_seconds("VAULT_READ_TIMEOUT", &secs)?;
        }
        if let Some(verify) = get("VAULT_SSL_VERIFY") {
            config.tls.verify = parse_bool("VAULT_SSL_VERIFY", &verify)?;
        }
        if let Some(path) = get("VAULT_SSL_CERT") {
            config.tls.trust = Some(PemSource::File(PathBuf::from(path)));
        }

        config.validate()?;
        Ok(config)
    }

    /// Check the address is an absolute HTTP(S) URL.
    ///
    /// # Errors
    ///
    /// Returns [`VaultError::InvalidConfig`] otherwise.
    pub fn validate(&self) -> VaultResult<()> {
        let url = url::Url::parse(&self.address).map_err(|e| {
            VaultError::invalid_config(format!("invalid address {}: {e}", self.address))
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(VaultError::invalid_config(format!(
                "address must be http or https: {}",
                self.address
            )));
        }
        Ok(())
    }

    /// Set the client token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(SecretString::from(token.into()));
        self
    }

    /// Set the namespace.
    #[must_use]
    pub fn with_namespace(mut self, namespace: impl Into<String>) -> Self {
        self.namespace = Some(namespace.into());
        self
    }

    /// Set the connect timeout.
    #[must_use]
    pub const fn with_open_timeout(mut self, timeout: Duration) -> Self {
        self.open_timeout = timeout;
        self
    }

    /// Set the read timeout.
    #[must_use]
    pub const fn with_read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = timeout;
        self
    }

    /// Set TLS configuration.
    #[must_use]
    pub fn with_tls(mut self, tls: TlsConfig) -> Self {
        self.tls = tls;
        self
    }

    /// Set total attempts per request.
    #[must_use]
    pub const fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Set the wait between attempts.
    #[must_use]
    pub const fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }
}

fn parse_seconds(key: &str, value: &str) -> VaultResult<Duration> {
    value
        .trim()
        .parse::<u64>()
        .map(Duration::from_secs)
        .map_err(|_| VaultError::invalid_config(format!("{key} must be whole seconds, got {value:?}")))
}

fn parse_bool(key: &str, value: &str) -> VaultResult<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "1" => Ok(true),
        "false" | "0" => Ok(false),
        _ => Err(VaultError::invalid_config(format!(
            "{key} must be true or false, got {value:?}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = VaultConfig::default();
        assert_eq!(config.address, "http://127.0.0.1:8200");
        assert!(config.token.is_none());
        assert_eq!(config.open_timeout, Duration::from_secs(30));
        assert_eq!(config.read_timeout, Duration::from_secs(30));
        assert!(config.tls.verify);
        assert_eq!(config.max_attempts, 1);
        assert_eq!(config.retry_interval, Duration::from_millis(1000));
    }

    #[test]
    fn test_from_lookup() {
        let config = VaultConfig::from_lookup(lookup(&[
            ("VAULT_ADDR", "https://vault.internal:8200"),
            ("VAULT_TOKEN", "hvs.abc"),
            ("VAULT_NAMESPACE", "team-a"),
            ("VAULT_OPEN_TIMEOUT", "5"),
            ("VAULT_READ_TIMEOUT", "0"),
            ("VAULT_SSL_VERIFY", "false"),
            ("VAULT_SSL_CERT", "/etc/vault/ca.pem"),
        ]))
        .unwrap();

        assert_eq!(config.address, "https://vault.internal:8200");
        assert_eq!(config.token.as_ref().unwrap().expose_secret(), "hvs.abc");
        assert_eq!(config.namespace.as_deref(), Some("team-a"));
        assert_eq!(config.open_timeout, Duration::from_secs(5));
        assert_eq!(config.read_timeout, Duration::ZERO);
        assert!(!config.tls.verify);
        assert_eq!(config.tls.trust, Some(PemSource::File("/etc/vault/ca.pem".into())));
    }

    #[test]
    fn test_empty_values_keep_defaults() {
        let config = VaultConfig::from_lookup(lookup(&[("VAULT_ADDR", ""), ("VAULT_TOKEN", "  ")])).unwrap();
        assert_eq!(config.address, DEFAULT_ADDRESS);
        assert!(config.token.is_none());
    }

    #[test]
    fn test_malformed_values_rejected() {
        let err = VaultConfig::from_lookup(lookup(&[("VAULT_READ_TIMEOUT", "ten")])).unwrap_err();
        assert!(matches!(err, VaultError::InvalidConfig(msg) if msg.contains("VAULT_READ_TIMEOUT")));

        let err = VaultConfig::from_lookup(lookup(&[("VAULT_SSL_VERIFY", "maybe")])).unwrap_err();
        assert!(matches!(err, VaultError::InvalidConfig(_)));

        let err = VaultConfig::from_lookup(lookup(&[("VAULT_ADDR", "vault:8200")])).unwrap_err();
        assert!(matches!(err, VaultError::InvalidConfig(_)));
    }

    #[test]
    fn test_bool_forms() {
        assert!(parse_bool("K", "TRUE").unwrap());
        assert!(parse_bool("K", "1").unwrap());
        assert!(!parse_bool("K", "0").unwrap());
    }

    #[test]
    fn test_debug_redacts_token() {
        let config = VaultConfig::new("http://vault:8200").with_token("hvs.very-secret");
        let debug = format!("{config:?}");
        assert!(debug.contains("[REDACTED]"));
        assert!(!debug.contains("hvs.very-secret"));
    }

    #[test]
    fn test_builders() {
        let config = VaultConfig::new("http://vault:8200")
            .with_namespace("ns")
            .with_open_timeout(Duration::from_secs(1))
            .with_read_timeout(Duration::from_secs(2))
            .with_tls(TlsConfig::insecure())
            .with_max_attempts(3)
            .with_retry_interval(Duration::from_millis(10));
        assert_eq!(config.namespace.as_deref(), Some("ns"));
        assert_eq!(config.open_timeout, Duration::from_secs(1));
        assert_eq!(config.read_timeout, Duration::from_secs(2));
        assert!(!config.tls.verify);
        assert_eq!(config.max_attempts, 3);
        assert!(config.validate().is_ok());
    }
}
