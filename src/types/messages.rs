//! Fixed user-facing messages keyed by failure status.

use super::failure::ClassifiedFailure;

pub const CONNECTIVITY: &str = "Unable to reach the server. Please check your internet connection.";
pub const SERVER: &str = "Server error. Please try again later.";
pub const NOT_FOUND: &str = "The requested resource was not found.";
pub const FORBIDDEN: &str = "You do not have permission to perform this action.";
pub const UNAUTHORIZED: &str = "Please sign in again.";
pub const BAD_REQUEST: &str = "The submitted data is invalid. Please try again.";
pub const REQUEST_TIMEOUT: &str = "The request timed out. Please try again.";
pub const CONFLICT: &str = "This action conflicts with existing data.";
pub const UNPROCESSABLE: &str = "The submitted data could not be processed.";
pub const TOO_MANY_REQUESTS: &str = "Too many requests. Please wait a moment.";
pub const UNKNOWN: &str = "An unknown error occurred.";

pub const CONNECTION_RESTORED: &str = "Internet connection restored.";
pub const CONNECTION_LOST: &str = "Internet connection lost.";

/// Returns the message shown to a user for `failure`.
///
/// The raw failure message is never used: it may carry server internals.
///
/// # Examples
///
/// ```
/// use retry_rail::types::{messages, ClassifiedFailure};
///
/// let failure = ClassifiedFailure::with_status(502, "upstream reset");
/// assert_eq!(messages::user_message(&failure), messages::SERVER);
/// ```
pub fn user_message(failure: &ClassifiedFailure) -> &'static str {
    match failure.status() {
        _ if failure.is_local_io() => UNKNOWN,
        None => CONNECTIVITY,
        Some(status) if status >= 500 => SERVER,
        Some(404) => NOT_FOUND,
        Some(403) => FORBIDDEN,
        Some(401) => UNAUTHORIZED,
        Some(400) => BAD_REQUEST,
        Some(408) => REQUEST_TIMEOUT,
        Some(409) => CONFLICT,
        Some(422) => UNPROCESSABLE,
        Some(429) => TOO_MANY_REQUESTS,
        Some(_) => UNKNOWN,
    }
}

/// Warning text for a scheduled retry, e.g. `Retrying... (1/3)`.
pub fn retrying(failed_attempts: u32, max_retries: u32) -> String {
    format!("Retrying... ({failed_attempts}/{max_retries})")
}
