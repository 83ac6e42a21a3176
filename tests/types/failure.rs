use retry_rail::messages;
use retry_rail::types::{
    ClassifiedFailure, FailureKind, LOCAL_IO_CODE, RETRYABLE_STATUSES, SOCKET_TIMEOUT_CODE,
    TIMEOUT_CODE,
};

#[test]
fn missing_status_is_transient_network() {
    let dns = ClassifiedFailure::network("dns");
    assert_eq!(dns.kind(), FailureKind::TransientNetwork);
    assert_eq!(
        ClassifiedFailure::new(Some(0), None, "refused").kind(),
        FailureKind::TransientNetwork
    );
}

#[test]
fn server_statuses_are_transient_server() {
    for status in [500, 501, 503, 599] {
        let failure = ClassifiedFailure::with_status(status, "x");
        assert_eq!(failure.kind(), FailureKind::TransientServer);
    }
}

#[test]
fn retryable_client_statuses_are_transient_server() {
    for status in RETRYABLE_STATUSES {
        let failure = ClassifiedFailure::with_status(status, "x");
        assert_eq!(failure.kind(), FailureKind::TransientServer);
    }
}

#[test]
fn other_client_statuses_are_permanent() {
    for status in [400, 401, 403, 404, 409, 422, 451] {
        let failure = ClassifiedFailure::with_status(status, "x");
        assert_eq!(failure.kind(), FailureKind::PermanentClient);
    }
}

#[test]
fn timeout_codes_make_client_statuses_transient() {
    let aborted = ClassifiedFailure::with_status(404, "x").code(TIMEOUT_CODE);
    assert_eq!(aborted.kind(), FailureKind::TransientNetwork);

    let socket = ClassifiedFailure::with_status(403, "x").code(SOCKET_TIMEOUT_CODE);
    assert_eq!(socket.kind(), FailureKind::TransientNetwork);

    let other = ClassifiedFailure::with_status(403, "x").code("ECONNRESET");
    assert_eq!(other.kind(), FailureKind::PermanentClient);
}

#[test]
fn server_status_wins_over_timeout_code() {
    let failure = ClassifiedFailure::with_status(502, "x").code(TIMEOUT_CODE);
    assert_eq!(failure.kind(), FailureKind::TransientServer);
}

#[test]
fn statuses_outside_error_ranges_are_unknown() {
    for status in [200, 204, 301, 304, 399] {
        let failure = ClassifiedFailure::with_status(status, "x");
        assert_eq!(failure.kind(), FailureKind::Unknown);
        assert!(!failure.kind().is_transient());
    }
}

#[test]
fn timeout_constructor_uses_abort_code() {
    let failure = ClassifiedFailure::timeout("took too long");
    assert_eq!(failure.failure_code(), Some(TIMEOUT_CODE));
    assert!(failure.is_timeout());
    assert_eq!(failure.to_string(), "[ECONNABORTED] took too long");
}

#[test]
fn kind_display() {
    assert_eq!(
        FailureKind::PermanentClient.to_string(),
        "permanent client failure"
    );
    assert_eq!(
        FailureKind::TransientNetwork.to_string(),
        "transient network failure"
    );
}

#[test]
fn local_io_code_is_unknown_and_not_retried() {
    let failure = ClassifiedFailure::network("permission denied").code(LOCAL_IO_CODE);
    assert!(failure.is_local_io());
    assert_eq!(failure.kind(), FailureKind::Unknown);
    assert!(!failure.is_network());
    assert_eq!(failure.user_message(), messages::UNKNOWN);

    let with_status = ClassifiedFailure::with_status(503, "disk").code(LOCAL_IO_CODE);
    assert_eq!(with_status.kind(), FailureKind::Unknown);
}

#[test]
fn auth_failures() {
    assert!(ClassifiedFailure::with_status(401, "x").is_auth());
    assert!(ClassifiedFailure::with_status(403, "x").is_auth());
    for status in [400, 404, 419, 500] {
        let failure = ClassifiedFailure::with_status(status, "x");
        assert!(!failure.is_auth(), "{status}");
    }
    assert!(!ClassifiedFailure::network("offline").is_auth());
}

#[test]
fn network_failures() {
    assert!(ClassifiedFailure::network("offline").is_network());
    assert!(ClassifiedFailure::with_status(0, "refused").is_network());
    let aborted = ClassifiedFailure::with_status(400, "x").code(TIMEOUT_CODE);
    assert!(aborted.is_network());
    assert!(!ClassifiedFailure::with_status(503, "x").is_network());
}

#[test]
fn summary_flattens_classification() {
    let summary = ClassifiedFailure::timeout("took too long").summary();
    assert_eq!(summary.message, messages::CONNECTIVITY);
    assert_eq!(summary.status, None);
    assert_eq!(summary.kind, FailureKind::TransientNetwork);
    assert!(summary.retryable);
    assert!(summary.network);
    assert!(!summary.auth);

    let forbidden = ClassifiedFailure::with_status(403, "admin only").summary();
    assert_eq!(forbidden.status, Some(403));
    assert_eq!(forbidden.message, messages::FORBIDDEN);
    assert!(forbidden.auth);
    assert!(!forbidden.retryable);
}
