//! Conformance tests for the JSON document model against Vault-shaped
//! payloads and known malformed inputs.

use test_utils::fixtures::{
    lease_renew_body, ERROR_RESPONSE, KV_READ_RESPONSE, LEASE_RENEW_RESPONSE, MALFORMED_DOCUMENTS,
};
use vault_json::{parse, parse_str, JsonError, Value, WriteStyle};

#[test]
fn test_object_with_mixed_array_round_trips() {
    let text = r#"{"a":1,"b":[true,false,null]}"#;
    let value = parse_str(text).unwrap();

    assert!(value.is_object());
    assert_eq!(value.pointer("/a").unwrap().as_number().unwrap().as_text(), "1");
    let b = value.get("b").unwrap().unwrap();
    assert_eq!(b.size().unwrap(), 3);
    assert_eq!(b.get(0).unwrap(), Some(&Value::Bool(true)));
    assert_eq!(b.get(1).unwrap(), Some(&Value::Bool(false)));
    assert_eq!(b.get(2).unwrap(), Some(&Value::Null));

    assert_eq!(vault_json::write(&value, &WriteStyle::compact()), text);
}

#[test]
fn test_missing_value_reports_closing_brace() {
    let err = parse_str(r#"{"a": }"#).unwrap_err();
    assert!(matches!(
        err,
        JsonError::Parse {
            line: 1,
            column: 7,
            offset: 6,
            ..
        }
    ));
}

#[test]
fn test_as_string_on_number_is_type_mismatch() {
    let value = parse_str("[12]").unwrap();
    let number = value.get(0).unwrap().unwrap();
    assert!(matches!(
        number.as_str(),
        Err(JsonError::TypeMismatch {
            expected: "string",
            actual: "number"
        })
    ));
}

#[test]
fn test_malformed_documents_report_offsets() {
    for (input, offset) in MALFORMED_DOCUMENTS {
        let err = parse_str(input).unwrap_err();
        assert_eq!(err.offset(), Some(*offset), "wrong offset for {input:?}: {err}");
    }
}

#[test]
fn test_kv_read_navigation() {
    let value = parse(KV_READ_RESPONSE.as_bytes()).unwrap();

    let secret = value.pointer("/data/data").unwrap();
    assert_eq!(secret.get("username").unwrap().unwrap().as_str().unwrap(), "svc-app");
    assert_eq!(
        secret.get("password").unwrap().unwrap().as_str().unwrap(),
        "s3cr3t\"with\\escapes"
    );
    assert_eq!(value.pointer("/data/metadata/version").unwrap().as_i32().unwrap(), 3);
    assert!(value.get("wrap_info").unwrap().unwrap().is_null());
    assert!(!value.get("renewable").unwrap().unwrap().as_bool().unwrap());
}

#[test]
fn test_pretty_output_reparses() {
    let value = parse_str(KV_READ_RESPONSE).unwrap();
    let pretty = value.to_pretty_string();
    assert!(pretty.contains("\n    \"data\": {"));
    assert_eq!(parse_str(&pretty).unwrap(), value);
}

#[test]
fn test_error_body_navigation() {
    let value = parse_str(ERROR_RESPONSE).unwrap();
    let errors = value.get("errors").unwrap().unwrap().as_array().unwrap();
    assert_eq!(errors[0].as_str().unwrap(), "permission denied");
}

#[test]
fn test_request_body_construction() {
    let body = lease_renew_body("database/creds/readonly/abc123", 3600);
    assert_eq!(
        body.to_compact_string(),
        r#"{"lease_id":"database/creds/readonly/abc123","increment":3600}"#
    );

    let renewed = parse_str(LEASE_RENEW_RESPONSE).unwrap();
    assert_eq!(renewed.get("lease_duration").unwrap().unwrap().as_u64().unwrap(), 3600);
    assert!(matches!(
        renewed.get("lease_id").unwrap().unwrap().as_i64(),
        Err(JsonError::TypeMismatch { .. })
    ));
}

#[test]
fn test_number_format_errors() {
    let value = parse_str(r#"{"big":99999999999999999999,"frac":2.5}"#).unwrap();
    assert!(matches!(
        value.get("big").unwrap().unwrap().as_i64(),
        Err(JsonError::Format { target: "i64", .. })
    ));
    assert!(value.get("big").unwrap().unwrap().as_f64().is_ok());
    assert!(matches!(
        value.get("frac").unwrap().unwrap().as_i32(),
        Err(JsonError::Format { .. })
    ));
}
