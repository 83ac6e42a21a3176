//! Integration tests for async retry execution.


mod retry_tests;


#[cfg(feature = "async-tokio")]
mod tokio_tests;
