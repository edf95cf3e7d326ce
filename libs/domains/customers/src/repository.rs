use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::CustomerResult;
use crate::models::Customer;

/// Repository trait for Customer persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CustomerRepository: Send + Sync {
    /// Insert a pre-built customer entity
    async fn create(&self, customer: Customer) -> CustomerResult<Customer>;

    /// Get a non-deleted customer by ID
    async fn get_by_id(&self, id: ObjectId) -> CustomerResult<Option<Customer>>;

    /// Get a non-deleted customer by email (login path)
    async fn get_by_email(&self, email: &str) -> CustomerResult<Option<Customer>>;

    /// Check whether an email is already registered
    async fn email_exists(&self, email: &str) -> CustomerResult<bool>;

    /// List all non-deleted customers
    async fn list(&self) -> CustomerResult<Vec<Customer>>;

    /// Replace an existing customer record
    async fn update(&self, customer: Customer) -> CustomerResult<Customer>;

    /// Soft-delete a customer. Returns false when no live record matched.
    async fn soft_delete(&self, id: ObjectId) -> CustomerResult<bool>;
}

/// In-memory implementation of CustomerRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemoryCustomerRepository {
    customers: Arc<RwLock<HashMap<ObjectId, Customer>>>,
}

impl InMemoryCustomerRepository {
    pub fn new() -> Self {
        Self {
            customers: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl CustomerRepository for InMemoryCustomerRepository {
    async fn create(&self, customer: Customer) -> CustomerResult<Customer> {
        self.customers
            .write()
            .await
            .insert(customer.id, customer.clone());

        tracing::info!(customer_id = %customer.id, "Created customer");
        Ok(customer)
    }

    async fn get_by_id(&self, id: ObjectId) -> CustomerResult<Option<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers.get(&id).filter(|c| !c.is_deleted).cloned())
    }

    async fn get_by_email(&self, email: &str) -> CustomerResult<Option<Customer>> {
        let customers = self.customers.read().await;
        Ok(customers
            .values()
            .find(|c| !c.is_deleted && c.email.eq_ignore_ascii_case(email))
            .cloned())
    }

    async fn email_exists(&self, email: &str) -> CustomerResult<bool> {
        let customers = self.customers.read().await;
        Ok(customers
            .values()
            .any(|c| c.email.eq_ignore_ascii_case(email)))
    }

    async fn list(&self) -> CustomerResult<Vec<Customer>> {
        let customers = self.customers.read().await;

        let mut result: Vec<Customer> = customers
            .values()
            .filter(|c| !c.is_deleted)
            .cloned()
            .collect();

        result.sort_by(|a, b| a.email.cmp(&b.email));
        Ok(result)
    }

    async fn update(&self, customer: Customer) -> CustomerResult<Customer> {
        self.customers
            .write()
            .await
            .insert(customer.id, customer.clone());
        Ok(customer)
    }

    async fn soft_delete(&self, id: ObjectId) -> CustomerResult<bool> {
        let mut customers = self.customers.write().await;

        match customers.get_mut(&id).filter(|c| !c.is_deleted) {
            Some(customer) => {
                customer.is_deleted = true;
                customer.updated_at = mongodb::bson::DateTime::now();
                tracing::info!(customer_id = %id, "Soft-deleted customer");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CreateCustomer;

    fn customer(email: &str) -> Customer {
        Customer::new(
            CreateCustomer {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
                email: email.to_string(),
                phone_number: None,
                address: None,
                birthday: None,
                password: "secret".to_string(),
            },
            "hash".to_string(),
        )
    }

    #[tokio::test]
    async fn test_email_lookup_is_case_insensitive() {
        let repo = InMemoryCustomerRepository::new();
        repo.create(customer("Jane@Example.com")).await.unwrap();

        let found = repo.get_by_email("jane@example.com").await.unwrap();
        assert!(found.is_some());
        assert!(repo.email_exists("JANE@EXAMPLE.COM").await.unwrap());
    }

    #[tokio::test]
    async fn test_soft_deleted_customer_cannot_login_lookup() {
        let repo = InMemoryCustomerRepository::new();
        let c = repo.create(customer("jane@example.com")).await.unwrap();

        repo.soft_delete(c.id).await.unwrap();
        assert!(repo.get_by_email("jane@example.com").await.unwrap().is_none());
        assert!(repo.get_by_id(c.id).await.unwrap().is_none());
    }
}
