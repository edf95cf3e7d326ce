use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use validator::Validate;

use crate::error::{CustomerError, CustomerResult};
use crate::models::{CreateCustomer, Customer, CustomerResponse, UpdateCustomer};
use crate::repository::CustomerRepository;

/// Service layer for Customer business logic
#[derive(Clone)]
pub struct CustomerService<R: CustomerRepository> {
    repository: Arc<R>,
}

impl<R: CustomerRepository> CustomerService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Register a new customer with password hashing
    pub async fn create_customer(&self, input: CreateCustomer) -> CustomerResult<CustomerResponse> {
        input
            .validate()
            .map_err(|e| CustomerError::Validation(e.to_string()))?;

        if self.repository.email_exists(&input.email).await? {
            return Err(CustomerError::DuplicateEmail(input.email));
        }

        let password_hash = self.hash_password(&input.password)?;
        let customer = Customer::new(input, password_hash);

        let created = self.repository.create(customer).await?;
        Ok(created.into())
    }

    /// Get a customer by ID
    pub async fn get_customer(&self, id: ObjectId) -> CustomerResult<CustomerResponse> {
        let customer = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound)?;

        Ok(customer.into())
    }

    /// List all non-deleted customers
    pub async fn list_customers(&self) -> CustomerResult<Vec<CustomerResponse>> {
        let customers = self.repository.list().await?;
        Ok(customers.into_iter().map(Into::into).collect())
    }

    /// Update a customer
    pub async fn update_customer(
        &self,
        id: ObjectId,
        input: UpdateCustomer,
    ) -> CustomerResult<CustomerResponse> {
        input
            .validate()
            .map_err(|e| CustomerError::Validation(e.to_string()))?;

        let mut customer = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(CustomerError::NotFound)?;

        // Hash new password if provided
        let new_password_hash = match input.password {
            Some(ref password) => Some(self.hash_password(password)?),
            None => None,
        };

        // Check for duplicate email if email is being changed
        if let Some(ref new_email) = input.email {
            if !new_email.eq_ignore_ascii_case(&customer.email)
                && self.repository.email_exists(new_email).await?
            {
                return Err(CustomerError::DuplicateEmail(new_email.clone()));
            }
        }

        customer.apply_update(input, new_password_hash);

        let updated = self.repository.update(customer).await?;
        Ok(updated.into())
    }

    /// Soft-delete a customer
    pub async fn delete_customer(&self, id: ObjectId) -> CustomerResult<()> {
        let deleted = self.repository.soft_delete(id).await?;

        if !deleted {
            return Err(CustomerError::NotFound);
        }

        Ok(())
    }

    /// Verify customer credentials (for login).
    ///
    /// Returns the full entity so the caller can mint token claims.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> CustomerResult<Customer> {
        let customer = self
            .repository
            .get_by_email(email)
            .await?
            .ok_or(CustomerError::InvalidCredentials)?;

        if !self.verify_password(password, &customer.password_hash)? {
            return Err(CustomerError::InvalidCredentials);
        }

        Ok(customer)
    }

    // Password helpers

    fn hash_password(&self, password: &str) -> CustomerResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        let argon2 = Argon2::default();

        let hash = argon2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| CustomerError::Internal(format!("Password hashing failed: {}", e)))?;

        Ok(hash.to_string())
    }

    fn verify_password(&self, password: &str, hash: &str) -> CustomerResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| CustomerError::Internal(format!("Invalid password hash: {}", e)))?;

        Ok(Argon2::default()
            .verify_password(password.as_bytes(), &parsed_hash)
            .is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockCustomerRepository;

    fn create() -> CreateCustomer {
        CreateCustomer {
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone_number: None,
            address: None,
            birthday: None,
            password: "secret".to_string(),
        }
    }

    #[tokio::test]
    async fn test_create_customer_hashes_password() {
        let mut mock_repo = MockCustomerRepository::new();
        mock_repo.expect_email_exists().returning(|_| Ok(false));
        mock_repo
            .expect_create()
            .withf(|customer: &Customer| {
                customer.password_hash != "secret"
                    && customer.password_hash.starts_with("$argon2")
            })
            .returning(Ok);

        let service = CustomerService::new(mock_repo);
        let created = service.create_customer(create()).await.unwrap();
        assert_eq!(created.email, "jane@example.com");
    }

    #[tokio::test]
    async fn test_create_customer_duplicate_email() {
        let mut mock_repo = MockCustomerRepository::new();
        mock_repo.expect_email_exists().returning(|_| Ok(true));

        let service = CustomerService::new(mock_repo);
        let result = service.create_customer(create()).await;

        assert!(matches!(result, Err(CustomerError::DuplicateEmail(_))));
    }

    #[tokio::test]
    async fn test_verify_credentials_roundtrip() {
        let service = CustomerService::new(MockCustomerRepository::new());
        let hash = service.hash_password("secret").unwrap();

        assert!(service.verify_password("secret", &hash).unwrap());
        assert!(!service.verify_password("wrong", &hash).unwrap());
    }

    #[tokio::test]
    async fn test_verify_credentials_unknown_email() {
        let mut mock_repo = MockCustomerRepository::new();
        mock_repo.expect_get_by_email().returning(|_| Ok(None));

        let service = CustomerService::new(mock_repo);
        let result = service.verify_credentials("ghost@example.com", "x").await;

        assert!(matches!(result, Err(CustomerError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_verify_credentials_wrong_password() {
        let mut mock_repo = MockCustomerRepository::new();
        // Precompute the hash outside the closure so verification is real
        let service_for_hash = CustomerService::new(MockCustomerRepository::new());
        let hash = service_for_hash.hash_password("right").unwrap();
        let customer = Customer::new(create(), hash);

        mock_repo
            .expect_get_by_email()
            .returning(move |_| Ok(Some(customer.clone())));

        let service = CustomerService::new(mock_repo);
        let result = service.verify_credentials("jane@example.com", "wrong").await;

        assert!(matches!(result, Err(CustomerError::InvalidCredentials)));
    }
}
