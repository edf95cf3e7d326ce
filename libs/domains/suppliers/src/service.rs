use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use validator::Validate;

use crate::error::{SupplierError, SupplierResult};
use crate::models::{CreateSupplier, Supplier, UpdateSupplier};
use crate::repository::SupplierRepository;

/// Service layer for Supplier business logic
#[derive(Clone)]
pub struct SupplierService<R: SupplierRepository> {
    repository: Arc<R>,
}

impl<R: SupplierRepository> SupplierService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    pub async fn create_supplier(&self, input: CreateSupplier) -> SupplierResult<Supplier> {
        input
            .validate()
            .map_err(|e| SupplierError::Validation(e.to_string()))?;

        self.repository.create(input).await
    }

    pub async fn get_supplier(&self, id: ObjectId) -> SupplierResult<Supplier> {
        self.repository
            .get_active(id)
            .await?
            .ok_or(SupplierError::NotFound)
    }

    pub async fn list_suppliers(&self) -> SupplierResult<Vec<Supplier>> {
        self.repository.list().await
    }

    pub async fn update_supplier(
        &self,
        id: ObjectId,
        input: UpdateSupplier,
    ) -> SupplierResult<Supplier> {
        input
            .validate()
            .map_err(|e| SupplierError::Validation(e.to_string()))?;

        self.repository
            .update(id, input)
            .await?
            .ok_or(SupplierError::NotFound)
    }

    pub async fn delete_supplier(&self, id: ObjectId) -> SupplierResult<()> {
        let deleted = self.repository.soft_delete(id).await?;

        if !deleted {
            return Err(SupplierError::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::MockSupplierRepository;

    #[tokio::test]
    async fn test_create_supplier_rejects_bad_phone() {
        let mock_repo = MockSupplierRepository::new();
        let service = SupplierService::new(mock_repo);

        let result = service
            .create_supplier(CreateSupplier {
                name: "FPT".to_string(),
                email: None,
                phone_number: Some("not-a-phone".to_string()),
                address: None,
            })
            .await;

        assert!(matches!(result, Err(SupplierError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_supplier_not_found() {
        let mut mock_repo = MockSupplierRepository::new();
        mock_repo.expect_get_active().returning(|_| Ok(None));

        let service = SupplierService::new(mock_repo);
        let result = service.get_supplier(ObjectId::new()).await;

        assert!(matches!(result, Err(SupplierError::NotFound)));
    }

    #[tokio::test]
    async fn test_delete_supplier_not_found() {
        let mut mock_repo = MockSupplierRepository::new();
        mock_repo.expect_soft_delete().returning(|_| Ok(false));

        let service = SupplierService::new(mock_repo);
        let result = service.delete_supplier(ObjectId::new()).await;

        assert!(matches!(result, Err(SupplierError::NotFound)));
    }
}
