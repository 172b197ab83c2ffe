//! REST API module.
//!
//! Route handlers following the original frontend contract: list/get
//! endpoints return the records directly, mutations return a confirmation
//! body, and errors use the structured envelope from [`crate::errors`].

mod projects;
mod slack;
mod volunteers;

pub use projects::*;
pub use slack::*;
pub use volunteers::*;

use serde::{Deserialize, Serialize};

/// Confirmation body returned by mutating endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct Confirmation {
    pub result: String,
}

/// Acknowledgement body returned by the registration endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterAck {
    pub success: bool,
}
