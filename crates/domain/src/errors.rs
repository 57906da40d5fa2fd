use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// No response was received at all (connection, TLS, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// The service answered with a non-2xx status.
    #[error("{message} (HTTP {status})")]
    RemoteFetch { status: u16, message: String },

    #[error("Invalid response from gateway API: {0}")]
    InvalidResponse(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid account id: {0}")]
    InvalidAccountId(String),

    #[error("No valid hosts entries in input")]
    NoValidEntries,

    #[error("Sync aborted: {0}")]
    AbortedRun(String),
}

impl DomainError {
    pub fn remote_fetch(status: u16, message: impl Into<String>) -> Self {
        DomainError::RemoteFetch {
            status,
            message: message.into(),
        }
    }

    /// Wraps a failed snapshot read so it surfaces as a single top-level abort.
    pub fn abort(context: &str, cause: &DomainError) -> Self {
        DomainError::AbortedRun(format!("{}: {}", context, cause))
    }
}
