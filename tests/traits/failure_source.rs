use std::fmt;
use std::io::{Error, ErrorKind};

use retry_rail::traits::{is_retryable, FailureSource};
use retry_rail::types::{ClassifiedFailure, FailureKind, LOCAL_IO_CODE, TIMEOUT_CODE};

#[derive(Debug)]
enum ApiError {
    Http { status: u16, body: String },
    Aborted,
    Offline,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http { status, body } => write!(f, "http {}: {}", status, body),
            ApiError::Aborted => f.write_str("request aborted"),
            ApiError::Offline => f.write_str("network unreachable"),
        }
    }
}

impl FailureSource for ApiError {
    fn transport_status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            ApiError::Aborted | ApiError::Offline => None,
        }
    }

    fn failure_code(&self) -> Option<&str> {
        match self {
            ApiError::Aborted => Some(TIMEOUT_CODE),
            _ => None,
        }
    }
}

fn http(status: u16) -> ApiError {
    ApiError::Http {
        status,
        body: String::new(),
    }
}

#[test]
fn classify_carries_status_code_and_message() {
    let failure = ApiError::Http {
        status: 409,
        body: "duplicate sku".into(),
    }
    .classify();
    assert_eq!(failure.status(), Some(409));
    assert_eq!(failure.failure_code(), None);
    assert_eq!(failure.message(), "http 409: duplicate sku");
    assert_eq!(failure.kind(), FailureKind::PermanentClient);

    let aborted = ApiError::Aborted.classify();
    assert!(aborted.is_timeout());
    assert_eq!(aborted.kind(), FailureKind::TransientNetwork);
}

#[test]
fn retryable_follows_classification() {
    assert!(ApiError::Offline.is_retryable());
    assert!(http(503).is_retryable());
    assert!(!http(401).is_retryable());
    assert!(is_retryable(&ApiError::Aborted));
}

#[test]
fn unknown_kind_for_non_error_status() {
    let err = ApiError::Http {
        status: 302,
        body: "moved".into(),
    };
    assert_eq!(err.failure_kind(), FailureKind::Unknown);
    assert!(!err.is_retryable());
}

#[test]
fn classified_failure_classifies_to_itself() {
    let failure = ClassifiedFailure::with_status(504, "gateway").code("ETIMEDOUT");
    assert_eq!(failure.classify(), failure);
}

#[test]
fn io_errors_have_no_status() {
    let timed_out = Error::new(ErrorKind::TimedOut, "read timeout").classify();
    assert_eq!(timed_out.status(), None);
    assert_eq!(timed_out.failure_code(), Some("ETIMEDOUT"));
    assert_eq!(timed_out.message(), "read timeout");

    let refused = Error::from(ErrorKind::ConnectionRefused);
    assert_eq!(refused.failure_code(), None);
    assert_eq!(refused.failure_kind(), FailureKind::TransientNetwork);
}

#[test]
fn local_io_errors_are_not_retryable() {
    let denied = Error::from(ErrorKind::PermissionDenied);
    assert_eq!(denied.failure_code(), Some(LOCAL_IO_CODE));
    assert_eq!(denied.failure_kind(), FailureKind::Unknown);
    assert!(!denied.is_retryable());

    let disk_full = Error::other("disk full").classify();
    assert!(disk_full.is_local_io());
    assert!(!disk_full.is_network());
}

#[test]
fn boxed_errors_delegate() {
    let boxed: Box<ApiError> = Box::new(http(429));
    assert_eq!(boxed.transport_status(), Some(429));
    assert_eq!(boxed.failure_kind(), FailureKind::TransientServer);
}
