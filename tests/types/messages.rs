use retry_rail::messages::{self, user_message};
use retry_rail::types::ClassifiedFailure;

fn message_for(status: Option<u16>) -> &'static str {
    user_message(&ClassifiedFailure::new(status, None, "raw server detail"))
}

#[test]
fn network_failures_ask_to_check_connection() {
    assert_eq!(message_for(None), messages::CONNECTIVITY);
    let aborted = ClassifiedFailure::timeout("aborted");
    assert_eq!(user_message(&aborted), messages::CONNECTIVITY);
}

#[test]
fn server_failures_share_one_message() {
    for status in [500, 502, 503, 504] {
        assert_eq!(message_for(Some(status)), messages::SERVER);
    }
}

#[test]
fn client_statuses_have_specific_messages() {
    assert_eq!(message_for(Some(400)), messages::BAD_REQUEST);
    assert_eq!(message_for(Some(401)), messages::UNAUTHORIZED);
    assert_eq!(message_for(Some(403)), messages::FORBIDDEN);
    assert_eq!(message_for(Some(404)), messages::NOT_FOUND);
    assert_eq!(message_for(Some(408)), messages::REQUEST_TIMEOUT);
    assert_eq!(message_for(Some(409)), messages::CONFLICT);
    assert_eq!(message_for(Some(422)), messages::UNPROCESSABLE);
    assert_eq!(message_for(Some(429)), messages::TOO_MANY_REQUESTS);
}

#[test]
fn anything_else_is_unknown() {
    assert_eq!(message_for(Some(418)), messages::UNKNOWN);
    assert_eq!(message_for(Some(302)), messages::UNKNOWN);
}

#[test]
fn raw_message_never_leaks() {
    for status in [None, Some(400), Some(418), Some(500)] {
        assert!(!message_for(status).contains("raw server detail"));
    }
}

#[test]
fn retrying_text() {
    assert_eq!(messages::retrying(1, 3), "Retrying... (1/3)");
    assert_eq!(messages::retrying(4, 5), "Retrying... (4/5)");
}
