/// Failure to reach or authenticate against the store.
///
/// Fatal for the request that triggered it; the connection manager keeps no
/// handle so the next `acquire()` tries again.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConnectionError {
    /// Invalid connection string or client options
    #[error("Invalid store configuration: {0}")]
    Configuration(String),

    /// Store unreachable
    #[error("Connection failed: {0}")]
    Unreachable(String),

    /// Credentials rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),
}

impl ConnectionError {
    /// Whether retrying the connect step could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ConnectionError::Unreachable(_))
    }
}
