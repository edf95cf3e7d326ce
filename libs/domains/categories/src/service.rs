use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use validator::Validate;

use crate::error::{CategoryError, CategoryResult};
use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

/// Service layer for Category business logic
#[derive(Clone)]
pub struct CategoryService<R: CategoryRepository> {
    repository: Arc<R>,
}

impl<R: CategoryRepository> CategoryService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new category with validation
    pub async fn create_category(&self, input: CreateCategory) -> CategoryResult<Category> {
        input
            .validate()
            .map_err(|e| CategoryError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    /// Get a non-deleted category by ID
    pub async fn get_category(&self, id: ObjectId) -> CategoryResult<Category> {
        self.repository
            .get_active(id)
            .await?
            .ok_or(CategoryError::NotFound)
    }

    /// List all non-deleted categories
    pub async fn list_categories(&self) -> CategoryResult<Vec<Category>> {
        self.repository.list().await
    }

    /// Update a category
    pub async fn update_category(
        &self,
        id: ObjectId,
        input: UpdateCategory,
    ) -> CategoryResult<Category> {
        input
            .validate()
            .map_err(|e| CategoryError::Validation(e.to_string()))?;

        self.repository
            .update(id, input)
            .await?
            .ok_or(CategoryError::NotFound)
    }

    /// Soft-delete a category
    pub async fn delete_category(&self, id: ObjectId) -> CategoryResult<()> {
        let deleted = self.repository.soft_delete(id).await?;

        if !deleted {
            return Err(CategoryError::NotFound);
        }

        Ok(())
    }
}
