//! Unit tests for envelope types.

use rstest::rstest;

use super::*;

#[test]
fn request_from_bytes_encodes_payload() {
    let request = ServerRequest::from_bytes(b"hello");
    assert_eq!(request.payload(), "aGVsbG8=");
}

#[test]
fn request_headers_are_retained() {
    let request = ServerRequest::new("").with_header("accept", "application/json");
    assert_eq!(request.headers().len(), 1);
    let json = serde_json::to_string(&request).expect("serialise");
    assert!(json.contains("\"accept\":\"application/json\""));
}

#[test]
fn request_without_headers_serialises_payload_only() {
    let json = serde_json::to_string(&ServerRequest::new("aGk=")).expect("serialise");
    assert_eq!(json, r#"{"payload":"aGk="}"#);
}

#[test]
fn success_response_carries_payload() {
    let response = ServerResponse::success(b"olleh");
    assert!(response.is_success());
    assert_eq!(response.payload(), Some("b2xsZWg="));
    assert_eq!(
        response.decode_payload().expect("decode"),
        Some(b"olleh".to_vec())
    );
}

#[test]
fn failure_response_has_no_payload() {
    let response = ServerResponse::failure("boom");
    assert!(!response.is_success());
    assert_eq!(response.status().code(), 500);
    assert_eq!(response.status().message(), "boom");
    assert_eq!(response.decode_payload().expect("decode"), None);
}

#[test]
fn not_implemented_response_uses_reason_text() {
    let response = ServerResponse::not_implemented();
    assert_eq!(response.status().code(), 503);
    assert_eq!(response.status().message(), "Not Implemented");
    assert_eq!(response.payload(), None);
}

#[rstest]
#[case::success(StatusCode::Success, 200, "Success")]
#[case::failed(StatusCode::Failed, 500, "Failed")]
#[case::not_implemented(StatusCode::NotImplemented, 503, "Not Implemented")]
fn status_code_numbers_and_reasons(
    #[case] code: StatusCode,
    #[case] number: u16,
    #[case] reason: &str,
) {
    assert_eq!(code.as_u16(), number);
    assert_eq!(code.reason(), reason);
    assert_eq!(StatusCode::try_from(number), Ok(code));
}

#[rstest]
#[case(0)]
#[case(201)]
#[case(404)]
fn unknown_numeric_codes_are_rejected(#[case] number: u16) {
    assert_eq!(StatusCode::try_from(number), Err(number));
    let status: Status =
        serde_json::from_value(serde_json::json!({"code": number, "status": "other"}))
            .expect("deserialise");
    assert_eq!(status.status_code(), None);
}
