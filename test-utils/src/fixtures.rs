//! Test fixtures with sample data.
//!
//! Response bodies shaped like the ones a Vault server returns, used by
//! parser and client tests.

use vault_json::{Map, Value};

/// KV v2 read response.
pub const KV_READ_RESPONSE: &str = r#"{
  "request_id": "6a6b7a8c-2f1d-4f7e-9b1a-2c3d4e5f6a7b",
  "lease_id": "",
  "renewable": false,
  "lease_duration": 0,
  "data": {
    "data": {
      "username": "svc-app",
      "password": "s3cr3t\"with\\escapes"
    },
    "metadata": {
      "created_time": "2024-11-02T10:00:00.000000Z",
      "deletion_time": "",
      "destroyed": false,
      "version": 3
    }
  },
  "wrap_info": null,
  "warnings": null,
  "auth": null
}"#;

/// Error body returned with 4xx/5xx statuses.
pub const ERROR_RESPONSE: &str = r#"{"errors":["permission denied"]}"#;

/// Lease renewal response.
pub const LEASE_RENEW_RESPONSE: &str =
    r#"{"lease_id":"database/creds/readonly/abc123","renewable":true,"lease_duration":3600}"#;

/// Documents the parser must reject, with the byte offset of the fault.
pub const MALFORMED_DOCUMENTS: &[(&str, usize)] = &[
    (r#"{"a": }"#, 6),
    ("[1,2,]", 5),
    ("[1 2]", 3),
    (r#"{"a":1,}"#, 7),
    ("[01]", 2),
    ("[1.]", 3),
    ("[-]", 2),
    (r#"["\x"]"#, 3),
    ("[true", 5),
    ("nul", 3),
    ("{} x", 3),
];

/// Request body for a lease renewal.
#[must_use]
pub fn lease_renew_body(lease_id: &str, increment: u64) -> Value {
    let mut map = Map::new();
    map.set("lease_id", Value::from(lease_id));
    map.set("increment", Value::from(increment));
    Value::Object(map)
}
