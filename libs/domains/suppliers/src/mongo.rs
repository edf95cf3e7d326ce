use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};

use crate::error::SupplierResult;
use crate::models::{CreateSupplier, Supplier, UpdateSupplier};
use crate::repository::SupplierRepository;

const COLLECTION: &str = "suppliers";

/// MongoDB implementation of [`SupplierRepository`].
#[derive(Clone)]
pub struct MongoSupplierRepository {
    collection: Collection<Supplier>,
}

impl MongoSupplierRepository {
    pub fn new(database: Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }

    fn set_document(input: &UpdateSupplier) -> Document {
        let mut set = doc! { "updatedAt": DateTime::now() };
        if let Some(ref name) = input.name {
            set.insert("name", name);
        }
        if let Some(ref email) = input.email {
            set.insert("email", email);
        }
        if let Some(ref phone_number) = input.phone_number {
            set.insert("phoneNumber", phone_number);
        }
        if let Some(ref address) = input.address {
            set.insert("address", address);
        }
        set
    }
}

#[async_trait]
impl SupplierRepository for MongoSupplierRepository {
    async fn create(&self, input: CreateSupplier) -> SupplierResult<Supplier> {
        let supplier = Supplier::new(input);
        self.collection.insert_one(&supplier).await?;

        tracing::info!(supplier_id = %supplier.id, "Created supplier");
        Ok(supplier)
    }

    async fn get_by_id(&self, id: ObjectId) -> SupplierResult<Option<Supplier>> {
        let found = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(found)
    }

    async fn get_active(&self, id: ObjectId) -> SupplierResult<Option<Supplier>> {
        let found = self
            .collection
            .find_one(doc! { "_id": id, "isDeleted": false })
            .await?;
        Ok(found)
    }

    async fn get_by_ids(&self, ids: &[ObjectId]) -> SupplierResult<Vec<Supplier>> {
        let cursor = self
            .collection
            .find(doc! { "_id": { "$in": ids.to_vec() } })
            .await?;
        let found = cursor.try_collect().await?;
        Ok(found)
    }

    async fn list(&self) -> SupplierResult<Vec<Supplier>> {
        let cursor = self
            .collection
            .find(doc! { "isDeleted": false })
            .sort(doc! { "name": 1 })
            .await?;
        let found = cursor.try_collect().await?;
        Ok(found)
    }

    async fn update(&self, id: ObjectId, input: UpdateSupplier) -> SupplierResult<Option<Supplier>> {
        let updated = self
            .collection
            .find_one_and_update(
                doc! { "_id": id, "isDeleted": false },
                doc! { "$set": Self::set_document(&input) },
            )
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(supplier_id = %id, "Updated supplier");
        }
        Ok(updated)
    }

    async fn soft_delete(&self, id: ObjectId) -> SupplierResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id, "isDeleted": false },
                doc! { "$set": { "isDeleted": true, "updatedAt": DateTime::now() } },
            )
            .await?;

        if result.modified_count > 0 {
            tracing::info!(supplier_id = %id, "Soft-deleted supplier");
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
    fn test_set_document_renames_phone_number() {
        let set = MongoSupplierRepository::set_document(&UpdateSupplier {
            phone_number: Some("0912345678".to_string()),
            ..Default::default()
        });

        assert_eq!(set.get_str("phoneNumber").unwrap(), "0912345678");
        assert!(!set.contains_key("phone_number"));
        assert!(set.contains_key("updatedAt"));
    }
}
