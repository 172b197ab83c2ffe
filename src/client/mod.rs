//! Client-side library: typed API client, registration/session store, and
//! the assignment widget logic.
//!
//! This is the Rust counterpart of the browser client. Session state is
//! persisted under a directory that stands in for the browser's local
//! storage, and the API base URL comes from configuration rather than a
//! hardcoded endpoint.

pub mod api;
pub mod assignment;
pub mod session;

pub use api::ApiClient;
pub use assignment::{is_match, AssignState, AssignmentWidget};
pub use session::{Profile, ProfilePatch, SessionStore, STEP_COMPLETE, STEP_NOT_STARTED};

/// Error type for client-side operations.
#[derive(Debug)]
pub enum Error {
    /// The request could not be sent or the response not read
    Transport(String),
    /// The server answered with a non-success status
    Status(u16, String),
    /// The response body failed to decode
    Decode(String),
    /// The server acknowledged the request but reported failure
    Api(String),
    /// Session state could not be read or written
    Storage(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Transport(msg) => write!(f, "transport error: {}", msg),
            Error::Status(status, body) => write!(f, "unexpected status {}: {}", status, body),
            Error::Decode(msg) => write!(f, "decode error: {}", msg),
            Error::Api(msg) => write!(f, "{}", msg),
            Error::Storage(msg) => write!(f, "session storage error: {}", msg),
        }
    }
}

impl std::error::Error for Error {}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            Error::Decode(err.to_string())
        } else {
            Error::Transport(err.to_string())
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Storage(err.to_string())
    }
}
