use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CategoryResult;
use crate::models::{Category, CreateCategory, UpdateCategory};

/// Repository trait for Category persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// Create a new category
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category>;

    /// Get a category by ID regardless of its soft-delete flag
    async fn get_by_id(&self, id: ObjectId) -> CategoryResult<Option<Category>>;

    /// Get a non-deleted category by ID
    async fn get_active(&self, id: ObjectId) -> CategoryResult<Option<Category>>;

    /// Fetch all categories matching the given ids (used for reference resolution)
    async fn get_by_ids(&self, ids: &[ObjectId]) -> CategoryResult<Vec<Category>>;

    /// List all non-deleted categories
    async fn list(&self) -> CategoryResult<Vec<Category>>;

    /// Update a non-deleted category, returning the updated record
    async fn update(&self, id: ObjectId, input: UpdateCategory) -> CategoryResult<Option<Category>>;

    /// Soft-delete a category. Returns false when no live record matched.
    async fn soft_delete(&self, id: ObjectId) -> CategoryResult<bool>;
}

/// In-memory implementation of CategoryRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCategoryRepository {
    categories: Arc<RwLock<HashMap<ObjectId, Category>>>,
}

impl InMemoryCategoryRepository {
    pub fn new() -> Self {
        Self {
            categories: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl CategoryRepository for InMemoryCategoryRepository {
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        let category = Category::new(input);
        self.categories
            .write()
            .await
            .insert(category.id, category.clone());

        tracing::info!(category_id = %category.id, "Created category");
        Ok(category)
    }

    async fn get_by_id(&self, id: ObjectId) -> CategoryResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.get(&id).cloned())
    }

    async fn get_active(&self, id: ObjectId) -> CategoryResult<Option<Category>> {
        let categories = self.categories.read().await;
        Ok(categories.get(&id).filter(|c| !c.is_deleted).cloned())
    }

    async fn get_by_ids(&self, ids: &[ObjectId]) -> CategoryResult<Vec<Category>> {
        let categories = self.categories.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| categories.get(id).cloned())
            .collect())
    }

    async fn list(&self) -> CategoryResult<Vec<Category>> {
        let categories = self.categories.read().await;

        let mut result: Vec<Category> = categories
            .values()
            .filter(|c| !c.is_deleted)
            .cloned()
            .collect();

        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    async fn update(&self, id: ObjectId, input: UpdateCategory) -> CategoryResult<Option<Category>> {
        let mut categories = self.categories.write().await;

        let Some(category) = categories.get_mut(&id).filter(|c| !c.is_deleted) else {
            return Ok(None);
        };

        category.apply_update(input);
        tracing::info!(category_id = %id, "Updated category");
        Ok(Some(category.clone()))
    }

    async fn soft_delete(&self, id: ObjectId) -> CategoryResult<bool> {
        let mut categories = self.categories.write().await;

        match categories.get_mut(&id).filter(|c| !c.is_deleted) {
            Some(category) => {
                category.is_deleted = true;
                category.updated_at = mongodb::bson::DateTime::now();
                tracing::info!(category_id = %id, "Soft-deleted category");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
