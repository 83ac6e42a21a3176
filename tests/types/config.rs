use std::time::Duration;

use retry_rail::types::{RetryConfig, RetryNotice};

#[test]
fn config_reads_millisecond_delay() {
    let config: RetryConfig =
        serde_json::from_str(r#"{"max_retries":5,"retry_delay_ms":250,"notice":"every_retry"}"#)
            .unwrap();

    assert_eq!(config.max_retries, 5);
    assert_eq!(config.retry_delay, Duration::from_millis(250));
    assert_eq!(config.notice, RetryNotice::EveryRetry);
}

#[test]
fn missing_fields_fall_back_to_defaults() {
    let config: RetryConfig = serde_json::from_str(r#"{"max_retries":2}"#).unwrap();
    assert_eq!(config, RetryConfig::default().with_max_retries(2));
}

#[test]
fn config_serializes_delay_as_millis() {
    let config = RetryConfig::new()
        .with_retry_delay(Duration::from_millis(1500))
        .with_notice(RetryNotice::Silent);
    let json = serde_json::to_value(config).unwrap();

    assert_eq!(json["retry_delay_ms"], 1500);
    assert_eq!(json["notice"], "silent");
    assert_eq!(json["max_retries"], 3);
}
