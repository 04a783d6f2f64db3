//! Chat message types sent to the completion backend.
//!
//! The wire format of a chat-completion message is `{"role", "content"}`,
//! so these types serialize directly into the request body.

use serde::{Deserialize, Serialize};

/// The role of a message sender.
///
/// A prompt is always sent as one user turn; no other role is produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
}

/// A single chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    /// Create a new user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
}
