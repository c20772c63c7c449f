//! Shared error type across visitcount crates.

use thiserror::Error;

/// Shared result type.
pub type Result<T> = std::result::Result<T, CountError>;

/// Unified error type used by core and gateway.
#[derive(Debug, Error)]
pub enum CountError {
    #[error("bad config: {0}")]
    BadConfig(String),
    #[error("store: {0}")]
    Store(String),
    #[error("internal: {0}")]
    Internal(String),
}

impl CountError {
    /// Stable code string, used in logs and tests.
    pub fn code(&self) -> &'static str {
        match self {
            CountError::BadConfig(_) => "BAD_CONFIG",
            CountError::Store(_) => "STORE",
            CountError::Internal(_) => "INTERNAL",
        }
    }
}
