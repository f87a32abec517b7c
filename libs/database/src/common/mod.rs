//! Utilities shared by every store implementation

pub mod error;
pub mod retry;

pub use error::ConnectionError;
pub use retry::{RetryConfig, retry_if};
