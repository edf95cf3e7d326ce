use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

use crate::error::CategoryResult;
use crate::models::{Category, CreateCategory, UpdateCategory};
use crate::repository::CategoryRepository;

/// Name of the backing collection.
const COLLECTION: &str = "categories";

/// MongoDB implementation of [`CategoryRepository`].
#[derive(Clone)]
pub struct MongoCategoryRepository {
    collection: Collection<Category>,
}

impl MongoCategoryRepository {
    pub fn new(database: Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }

    fn set_document(input: &UpdateCategory) -> Document {
        let mut set = doc! { "updatedAt": DateTime::now() };
        if let Some(ref name) = input.name {
            set.insert("name", name);
        }
        if let Some(ref description) = input.description {
            set.insert("description", description);
        }
        set
    }
}

#[async_trait]
impl CategoryRepository for MongoCategoryRepository {
    async fn create(&self, input: CreateCategory) -> CategoryResult<Category> {
        let category = Category::new(input);
        self.collection.insert_one(&category).await?;

        tracing::info!(category_id = %category.id, "Created category");
        Ok(category)
    }

    async fn get_by_id(&self, id: ObjectId) -> CategoryResult<Option<Category>> {
        let found = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(found)
    }

    async fn get_active(&self, id: ObjectId) -> CategoryResult<Option<Category>> {
        let found = self
            .collection
            .find_one(doc! { "_id": id, "isDeleted": false })
            .await?;
        Ok(found)
    }

    async fn get_by_ids(&self, ids: &[ObjectId]) -> CategoryResult<Vec<Category>> {
        let cursor = self
            .collection
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        let found = cursor.try_collect().await?;
        Ok(found)
    }

    async fn list(&self) -> CategoryResult<Vec<Category>> {
        let cursor = self
            .collection
            .find(doc! { "isDeleted": false })
            .sort(doc! { "name": 1 })
            .await?;
        let found = cursor.try_collect().await?;
        Ok(found)
    }

    async fn update(&self, id: ObjectId, input: UpdateCategory) -> CategoryResult<Option<Category>> {
        let updated = self
            .collection
            .find_one_and_update(
                doc! { "_id": id, "isDeleted": false },
                doc! { "$set": Self::set_document(&input) },
            )
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(category_id = %id, "Updated category");
        }
        Ok(updated)
    }

    async fn soft_delete(&self, id: ObjectId) -> CategoryResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id, "isDeleted": false },
                doc! { "$set": { "isDeleted": true, "updatedAt": DateTime::now() } },
            )
            .await?;

        if result.modified_count > 0 {
            tracing::info!(category_id = %id, "Soft-deleted category");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_document_includes_only_given_fields() {
        let set = MongoCategoryRepository::set_document(&UpdateCategory {
            name: Some("Tablets".to_string()),
            description: None,
        });

        assert_eq!(set.get_str("name").unwrap(), "Tablets");
        assert!(!set.contains_key("description"));
        assert!(set.contains_key("updatedAt"));
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_create_and_list_roundtrip() {
        let client = mongodb::Client::with_uri_str("mongodb://localhost:27017")
            .await
            .unwrap();
        let repo = MongoCategoryRepository::new(client.database("storefront_test"));

        let created = repo
            .create(CreateCategory {
                name: format!("cat-{}", ObjectId::new()),
                description: String::new(),
            })
            .await
            .unwrap();

        let listed = repo.list().await.unwrap();
        assert!(listed.iter().any(|c| c.id == created.id));
    }
}
