//! Per-user preferences.

use tracing::info;

use crate::db::DbConnection;
use crate::domain::errors::DomainResult;
use shared::{Perspective, UserSettings};

#[derive(Clone)]
pub struct SettingsService {
    db: DbConnection,
}

impl SettingsService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    /// The user's settings; the perspective defaults to realistic until
    /// they pick one.
    pub async fn get_settings(&self, user_id: &str) -> DomainResult<UserSettings> {
        let perspective = self
            .db
            .get_perspective(user_id)
            .await?
            .map(|raw| Perspective::parse_or_default(&raw))
            .unwrap_or_default();
        Ok(UserSettings { perspective })
    }

    pub async fn set_perspective(
        &self,
        user_id: &str,
        perspective: Perspective,
    ) -> DomainResult<UserSettings> {
        self.db
            .set_perspective(user_id, perspective.as_str())
            .await?;
        info!("User {} switched perspective to {}", user_id, perspective);
        Ok(UserSettings { perspective })
    }
}
