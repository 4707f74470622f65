//! Explicit session state for the backend collaborator.
//!
//! The session travels as a value into every gateway call instead of living
//! in process-wide mutable state; whoever owns the login flow owns the
//! session object.

use serde::{Deserialize, Serialize};

use saleflow_core::UserId;

/// An authenticated user's session: bearer token plus identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserId,
    pub username: String,
}

impl Session {
    pub fn new(token: impl Into<String>, user: UserId, username: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            user,
            username: username.into(),
        }
    }
}
