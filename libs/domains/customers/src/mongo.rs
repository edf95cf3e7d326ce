use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, DateTime};
use mongodb::{Collection, Database};

use crate::error::CustomerResult;
use crate::models::Customer;
use crate::repository::CustomerRepository;

const COLLECTION: &str = "customers";

/// MongoDB implementation of [`CustomerRepository`].
#[derive(Clone)]
pub struct MongoCustomerRepository {
    collection: Collection<Customer>,
}

impl MongoCustomerRepository {
    pub fn new(database: Database) -> Self {
        Self {
            collection: database.collection(COLLECTION),
        }
    }
}

#[async_trait]
impl CustomerRepository for MongoCustomerRepository {
    async fn create(&self, customer: Customer) -> CustomerResult<Customer> {
        self.collection.insert_one(&customer).await?;

        tracing::info!(customer_id = %customer.id, "Created customer");
        Ok(customer)
    }

    async fn get_by_id(&self, id: ObjectId) -> CustomerResult<Option<Customer>> {
        let found = self
            .collection
            .find_one(doc! { "_id": id, "isDeleted": false })
            .await?;
        Ok(found)
    }

    async fn get_by_email(&self, email: &str) -> CustomerResult<Option<Customer>> {
        let found = self
            .collection
            .find_one(doc! { "email": email, "isDeleted": false })
            .await?;
        Ok(found)
    }

    async fn email_exists(&self, email: &str) -> CustomerResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "email": email })
            .await?;
        Ok(count > 0)
    }

    async fn list(&self) -> CustomerResult<Vec<Customer>> {
        let cursor = self
            .collection
            .find(doc! { "isDeleted": false })
            .sort(doc! { "email": 1 })
            .await?;
        let found = cursor.try_collect().await?;
        Ok(found)
    }

    async fn update(&self, customer: Customer) -> CustomerResult<Customer> {
        self.collection
            .replace_one(doc! { "_id": customer.id }, &customer)
            .await?;

        tracing::info!(customer_id = %customer.id, "Updated customer");
        Ok(customer)
    }

    async fn soft_delete(&self, id: ObjectId) -> CustomerResult<bool> {
        let result = self
            .collection
            .update_one(
                doc! { "_id": id, "isDeleted": false },
                doc! { "$set": { "isDeleted": true, "updatedAt": DateTime::now() } },
            )
            .await?;

        if result.modified_count > 0 {
            tracing::info!(customer_id = %id, "Soft-deleted customer");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
