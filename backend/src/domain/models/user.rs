//! Domain models for users and their login sessions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub username: String,
    /// Stored credential, compared as an opaque string
    pub password: String,
    /// Creation timestamp (RFC 3339)
    pub created_at: String,
}

impl User {
    pub fn to_profile(&self) -> shared::UserProfile {
        shared::UserProfile {
            id: self.id.clone(),
            username: self.username.clone(),
        }
    }
}

/// A bearer-token login session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user_id: String,
    pub created_at: String,
}
