use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures encountered while loading a resource from the remote API.
///
/// A successful call that yields zero items is not an error; that is
/// represented by an empty `Listing`.
#[non_exhaustive]
#[derive(Clone, Debug, Error, PartialEq, Deserialize, Serialize)]
pub enum FetchError {
    /// The request never reached the server, or it timed out.
    #[error("network failure: {0}")]
    Network(String),
    /// The server responded with a non-2xx status.
    #[error("server responded with status {status}")]
    Server { status: u16 },
    /// The response body could not be decoded into the expected shape.
    #[error("unable to decode response: {0}")]
    Decode(String),
}

/// The single user-visible failure category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub enum FailureCategory {
    CouldNotLoad,
}

impl FetchError {
    pub fn category(&self) -> FailureCategory {
        FailureCategory::CouldNotLoad
    }

    /// Whether repeating the same request may reasonably succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            FetchError::Network(_) => true,
            FetchError::Server { status } => *status >= 500 || *status == 429,
            FetchError::Decode(_) => false,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Decode(e.to_string())
    }
}

#[non_exhaustive]
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq, Deserialize, Serialize)]
pub enum AuthError {
    #[error("not logged in")]
    NotLoggedIn,
}
