//! Form validation.
//!
//! - [`Validation`]: accumulates every failed rule instead of stopping at
//!   the first
//! - [`security`]: sanitization, injection filters, phone/postal/national
//!   code and password checks
//!
//! # Examples
//!
//! ```
//! use retry_rail::validation::{check_password, is_postal_code, validate_input, Validation};
//!
//! assert!(is_postal_code("1234567890"));
//! assert!(validate_input("1' UNION SELECT * FROM users --").is_err());
//!
//! let password: Validation<_, ()> = check_password("hunter2");
//! assert!(password.is_invalid());
//! ```
pub mod core;
pub mod security;

pub use self::core::*;
pub use self::security::*;
