//! TLS policy tests against a local rustls server with a self-signed
//! certificate for `localhost`.

use std::io::{self, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use rustls::pki_types::{PrivateKeyDer, PrivatePkcs8KeyDer};
use rustls::{ServerConfig, ServerConnection, StreamOwned};
use vault_core::{
    BlockingTransport, HttpMethod, HttpRequest, TlsConfig, Transport, VaultClient, VaultConfig,
    VaultError,
};

const RESPONSE: &[u8] = b"HTTP/1.1 200 OK\r\n\
content-type: application/json\r\n\
content-length: 11\r\n\
connection: close\r\n\
\r\n\
{\"ok\":true}";

/// Self-signed HTTPS server answering every request with `{"ok":true}`.
struct TlsServer {
    port: u16,
    cert_pem: String,
}

impl TlsServer {
    fn start() -> Self {
        let certified = rcgen::generate_simple_self_signed(vec!["localhost".to_string()]).unwrap();
        let key = PrivateKeyDer::Pkcs8(PrivatePkcs8KeyDer::from(certified.key_pair.serialize_der()));
        let config = ServerConfig::builder_with_provider(Arc::new(
            rustls::crypto::ring::default_provider(),
        ))
        .with_safe_default_protocol_versions()
        .unwrap()
        .with_no_client_auth()
        .with_single_cert(vec![certified.cert.der().clone()], key)
        .unwrap();
        let config = Arc::new(config);

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        thread::spawn(move || {
            for stream in listener.incoming().flatten() {
                // rejected handshakes surface here as errors
                let _ = serve(stream, Arc::clone(&config));
            }
        });

        Self {
            port,
            cert_pem: certified.cert.pem(),
        }
    }

    fn url(&self) -> String {
        format!("https://localhost:{}/v1/sys/health", self.port)
    }
}

fn serve(stream: TcpStream, config: Arc<ServerConfig>) -> io::Result<()> {
    stream.set_read_timeout(Some(Duration::from_secs(5)))?;
    let conn = ServerConnection::new(config).map_err(io::Error::other)?;
    let mut tls = StreamOwned::new(conn, stream);

    let mut request = Vec::new();
    let mut chunk = [0u8; 1024];
    while !request.windows(4).any(|w| w == b"\r\n\r\n") {
        let n = tls.read(&mut chunk)?;
        if n == 0 {
            return Ok(());
        }
        request.extend_from_slice(&chunk[..n]);
    }

    tls.write_all(RESPONSE)?;
    tls.conn.send_close_notify();
    tls.flush()
}

fn get(url: String, tls: TlsConfig) -> Result<vault_core::HttpResponse, VaultError> {
    let request = HttpRequest::new(HttpMethod::Get, url)
        .open_timeout(Duration::from_secs(5))
        .read_timeout(Duration::from_secs(5))
        .tls(tls);
    BlockingTransport::new().execute(&request)
}

#[test]
fn test_self_signed_rejected_by_system_trust() {
    let server = TlsServer::start();

    let err = get(server.url(), TlsConfig::system()).unwrap_err();

    assert!(matches!(err, VaultError::Tls(_)), "got {err:?}");
    assert!(!err.is_retryable());
}

#[test]
fn test_self_signed_accepted_when_verification_disabled() {
    let server = TlsServer::start();

    let response = get(server.url(), TlsConfig::insecure()).unwrap();

    assert_eq!(response.status(), 200);
    let body = response.json().unwrap();
    assert!(body.get("ok").unwrap().unwrap().as_bool().unwrap());
}

#[test]
fn test_self_signed_accepted_with_custom_pem() {
    let server = TlsServer::start();

    let response = get(server.url(), TlsConfig::with_pem(server.cert_pem.as_bytes())).unwrap();

    assert_eq!(response.status(), 200);
}

#[test]
fn test_self_signed_accepted_with_pem_file() {
    let server = TlsServer::start();
    let path = std::env::temp_dir().join(format!("vault-core-ca-{}-{}.pem", std::process::id(), server.port));
    std::fs::write(&path, &server.cert_pem).unwrap();

    let result = get(server.url(), TlsConfig::with_pem_file(&path));
    let _ = std::fs::remove_file(&path);

    assert_eq!(result.unwrap().status(), 200);
}

#[test]
fn test_client_reports_tls_failure_from_last_attempt() {
    let server = TlsServer::start();
    let config = VaultConfig::new(format!("https://localhost:{}", server.port))
        .with_max_attempts(2)
        .with_retry_interval(Duration::ZERO);
    let client = VaultClient::new(config).unwrap();

    let err = client.get("sys/health", &[]).unwrap_err();

    assert!(matches!(err.last_error(), VaultError::Tls(_)), "got {err:?}");
}
