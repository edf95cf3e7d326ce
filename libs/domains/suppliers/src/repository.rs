use async_trait::async_trait;
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::SupplierResult;
use crate::models::{CreateSupplier, Supplier, UpdateSupplier};

/// Repository trait for Supplier persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SupplierRepository: Send + Sync {
    /// Create a new supplier
    async fn create(&self, input: CreateSupplier) -> SupplierResult<Supplier>;

    /// Get a supplier by ID regardless of its soft-delete flag
    async fn get_by_id(&self, id: ObjectId) -> SupplierResult<Option<Supplier>>;

    /// Get a non-deleted supplier by ID
    async fn get_active(&self, id: ObjectId) -> SupplierResult<Option<Supplier>>;

    /// Fetch all suppliers matching the given ids (used for reference resolution)
    async fn get_by_ids(&self, ids: &[ObjectId]) -> SupplierResult<Vec<Supplier>>;

    /// List all non-deleted suppliers
    async fn list(&self) -> SupplierResult<Vec<Supplier>>;

    /// Update a non-deleted supplier, returning the updated record
    async fn update(&self, id: ObjectId, input: UpdateSupplier) -> SupplierResult<Option<Supplier>>;

    /// Soft-delete a supplier. Returns false when no live record matched.
    async fn soft_delete(&self, id: ObjectId) -> SupplierResult<bool>;
}

/// In-memory implementation of SupplierRepository (for development/testing)
#[derive(Debug, Default, Clone)]
pub struct InMemorySupplierRepository {
    suppliers: Arc<RwLock<HashMap<ObjectId, Supplier>>>,
}

impl InMemorySupplierRepository {
    pub fn new() -> Self {
        Self {
            suppliers: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl SupplierRepository for InMemorySupplierRepository {
    async fn create(&self, input: CreateSupplier) -> SupplierResult<Supplier> {
        let supplier = Supplier::new(input);
        self.suppliers
            .write()
            .await
            .insert(supplier.id, supplier.clone());

        tracing::info!(supplier_id = %supplier.id, "Created supplier");
        Ok(supplier)
    }

    async fn get_by_id(&self, id: ObjectId) -> SupplierResult<Option<Supplier>> {
        let suppliers = self.suppliers.read().await;
        Ok(suppliers.get(&id).cloned())
    }

    async fn get_active(&self, id: ObjectId) -> SupplierResult<Option<Supplier>> {
        let suppliers = self.suppliers.read().await;
        Ok(suppliers.get(&id).filter(|s| !s.is_deleted).cloned())
    }

    async fn get_by_ids(&self, ids: &[ObjectId]) -> SupplierResult<Vec<Supplier>> {
        let suppliers = self.suppliers.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| suppliers.get(id).cloned())
            .collect())
    }

    async fn list(&self) -> SupplierResult<Vec<Supplier>> {
        let suppliers = self.suppliers.read().await;

        let mut result: Vec<Supplier> = suppliers
            .values()
            .filter(|s| !s.is_deleted)
            .cloned()
            .collect();

        result.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(result)
    }

    async fn update(&self, id: ObjectId, input: UpdateSupplier) -> SupplierResult<Option<Supplier>> {
        let mut suppliers = self.suppliers.write().await;

        let Some(supplier) = suppliers.get_mut(&id).filter(|s| !s.is_deleted) else {
            return Ok(None);
        };

        supplier.apply_update(input);
        tracing::info!(supplier_id = %id, "Updated supplier");
        Ok(Some(supplier.clone()))
    }

    async fn soft_delete(&self, id: ObjectId) -> SupplierResult<bool> {
        let mut suppliers = self.suppliers.write().await;

        match suppliers.get_mut(&id).filter(|s| !s.is_deleted) {
            Some(supplier) => {
                supplier.is_deleted = true;
                supplier.updated_at = mongodb::bson::DateTime::now();
                tracing::info!(supplier_id = %id, "Soft-deleted supplier");
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create() -> CreateSupplier {
        CreateSupplier {
            name: "FPT Trading".to_string(),
            email: None,
            phone_number: None,
            address: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_supplier() {
        let repo = InMemorySupplierRepository::new();
        let supplier = repo.create(create()).await.unwrap();

        let fetched = repo.get_active(supplier.id).await.unwrap();
        assert_eq!(fetched.unwrap().name, "FPT Trading");
    }

    #[tokio::test]
    async fn test_soft_delete_keeps_record_reachable_by_id() {
        let repo = InMemorySupplierRepository::new();
        let supplier = repo.create(create()).await.unwrap();

        assert!(repo.soft_delete(supplier.id).await.unwrap());
        assert!(repo.get_active(supplier.id).await.unwrap().is_none());

        let raw = repo.get_by_id(supplier.id).await.unwrap().unwrap();
        assert!(raw.is_deleted);
    }
}
