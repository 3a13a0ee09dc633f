//! Category management.

use tracing::info;
use uuid::Uuid;

use crate::db::DbConnection;
use crate::domain::errors::{DomainError, DomainResult};
use crate::domain::models::Category;
use shared::CreateCategoryRequest;

const MAX_NAME_LEN: usize = 64;

#[derive(Clone)]
pub struct CategoryService {
    db: DbConnection,
}

impl CategoryService {
    pub fn new(db: DbConnection) -> Self {
        Self { db }
    }

    pub async fn create_category(
        &self,
        user_id: &str,
        request: CreateCategoryRequest,
    ) -> DomainResult<Category> {
        let name = request.name.trim().to_string();
        if name.is_empty() || name.len() > MAX_NAME_LEN {
            return Err(DomainError::Validation(format!(
                "Category name must be between 1 and {} characters",
                MAX_NAME_LEN
            )));
        }
        if self.db.category_name_exists(user_id, &name).await? {
            return Err(DomainError::Conflict(format!(
                "Category '{}' already exists",
                name
            )));
        }

        let category = Category {
            id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            name,
            kind: request.kind,
        };
        self.db.create_category(&category).await?;
        info!("Created category {} for user {}", category.name, user_id);
        Ok(category)
    }

    pub async fn list_categories(&self, user_id: &str) -> DomainResult<Vec<Category>> {
        Ok(self.db.list_categories(user_id).await?)
    }

    pub async fn get_category(&self, user_id: &str, category_id: &str) -> DomainResult<Category> {
        self.db
            .get_category(user_id, category_id)
            .await?
            .ok_or(DomainError::NotFound("category"))
    }

    /// Delete a category. Refused while transactions still reference it.
    pub async fn delete_category(&self, user_id: &str, category_id: &str) -> DomainResult<()> {
        let in_use = self
            .db
            .count_category_transactions(user_id, category_id)
            .await?;
        if in_use > 0 {
            return Err(DomainError::Conflict(format!(
                "Category has {} transactions; delete or move them first",
                in_use
            )));
        }
        if !self.db.delete_category(user_id, category_id).await? {
            return Err(DomainError::NotFound("category"));
        }
        Ok(())
    }
}
