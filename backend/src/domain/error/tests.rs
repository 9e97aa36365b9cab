//! Tests for domain error construction and trace capture.

use super::*;
use rstest::rstest;

#[rstest]
#[case(Error::invalid_request("bad"), ErrorCode::InvalidRequest)]
#[case(Error::unauthorized("who"), ErrorCode::Unauthorized)]
#[case(Error::forbidden("no"), ErrorCode::Forbidden)]
#[case(Error::not_found("gone"), ErrorCode::NotFound)]
#[case(Error::method_not_allowed("verb"), ErrorCode::MethodNotAllowed)]
#[case(Error::conflict("taken"), ErrorCode::Conflict)]
#[case(Error::service_unavailable("down"), ErrorCode::ServiceUnavailable)]
#[case(Error::internal("boom"), ErrorCode::InternalError)]
fn constructors_set_code(#[case] error: Error, #[case] expected: ErrorCode) {
    assert_eq!(error.code(), expected);
}

#[rstest]
fn trace_id_is_none_out_of_scope() {
    assert!(Error::internal("boom").trace_id().is_none());
}

#[tokio::test]
async fn trace_id_is_captured_in_scope() {
    let trace_id: TraceId = "00000000-0000-0000-0000-000000000000"
        .parse()
        .expect("valid UUID");
    let error = TraceId::scope(trace_id, async { Error::not_found("gone") }).await;
    assert_eq!(
        error.trace_id(),
        Some("00000000-0000-0000-0000-000000000000")
    );
}

#[rstest]
#[case(ErrorCode::InternalError, true)]
#[case(ErrorCode::ServiceUnavailable, true)]
#[case(ErrorCode::NotFound, false)]
#[case(ErrorCode::Conflict, false)]
fn server_fault_classification(#[case] code: ErrorCode, #[case] expected: bool) {
    assert_eq!(code.is_server_fault(), expected);
}

#[rstest]
fn display_uses_message() {
    assert_eq!(Error::conflict("taken").to_string(), "taken");
}
