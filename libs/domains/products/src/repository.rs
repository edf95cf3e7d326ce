use async_trait::async_trait;
use domain_categories::{Category, CategoryRepository, InMemoryCategoryRepository};
use domain_suppliers::{InMemorySupplierRepository, Supplier, SupplierRepository};
use mongodb::bson::oid::ObjectId;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::ProductResult;
use crate::models::{Product, ProductPage, ProductPatch, ProductResponse};
use crate::query::SearchFilter;

/// Repository trait for Product persistence and result assembly.
///
/// Implementations execute the compiled predicate (count + sorted, paginated
/// fetch) and resolve category/supplier references into embedded objects.
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product
    async fn insert(&self, product: Product) -> ProductResult<Product>;

    /// Bulk-insert products (seeding); returns the number inserted
    async fn insert_many(&self, products: Vec<Product>) -> ProductResult<usize>;

    /// Get a product by ID regardless of its soft-delete flag
    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>>;

    /// Get a non-deleted product with references resolved
    async fn get_detail(&self, id: ObjectId) -> ProductResult<Option<ProductResponse>>;

    /// All non-deleted products with references resolved (no pagination)
    async fn find_all(&self) -> ProductResult<Vec<ProductResponse>>;

    /// Execute a search filter: count + fetch + reference resolution
    async fn search(&self, filter: &SearchFilter) -> ProductResult<ProductPage>;

    /// Check if a product name is already taken
    async fn exists_by_name(&self, name: &str) -> ProductResult<bool>;

    /// Replace the scalar fields and references of a non-deleted product.
    /// Images are not touched by this path.
    async fn update(&self, id: ObjectId, patch: ProductPatch) -> ProductResult<Option<Product>>;

    /// Hard-delete a product record
    async fn delete(&self, id: ObjectId) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing).
///
/// Shares the in-memory category/supplier stores so reference resolution
/// behaves like the database-backed implementation.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<ObjectId, Product>>>,
    categories: InMemoryCategoryRepository,
    suppliers: InMemorySupplierRepository,
}

impl InMemoryProductRepository {
    pub fn new(
        categories: InMemoryCategoryRepository,
        suppliers: InMemorySupplierRepository,
    ) -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
            categories,
            suppliers,
        }
    }

    fn matches(product: &Product, filter: &SearchFilter) -> bool {
        if product.is_deleted {
            return false;
        }
        if let Some(ref keyword) = filter.keyword {
            if !product
                .name
                .to_lowercase()
                .contains(&keyword.to_lowercase())
            {
                return false;
            }
        }
        if let Some(category_id) = filter.category_id {
            if product.category_id != category_id {
                return false;
            }
        }
        if let Some(supplier_id) = filter.supplier_id {
            if product.supplier_id != supplier_id {
                return false;
            }
        }
        match (filter.price_start, filter.price_end) {
            (Some(start), Some(end)) => product.price >= start && product.price <= end,
            (Some(start), None) => product.price >= start,
            (None, Some(end)) => product.price <= end,
            (None, None) => true,
        }
    }

    /// Sort: name ascending, then price ascending, then discount descending.
    fn sort(products: &mut [Product]) {
        products.sort_by(|a, b| {
            a.name
                .cmp(&b.name)
                .then(a.price.total_cmp(&b.price))
                .then(b.discount.total_cmp(&a.discount))
        });
    }

    async fn resolve(&self, products: Vec<Product>) -> ProductResult<Vec<ProductResponse>> {
        let category_ids: Vec<ObjectId> = products.iter().map(|p| p.category_id).collect();
        let supplier_ids: Vec<ObjectId> = products.iter().map(|p| p.supplier_id).collect();

        let categories: HashMap<ObjectId, Category> = self
            .categories
            .get_by_ids(&category_ids)
            .await?
            .into_iter()
            .map(|c| (c.id, c))
            .collect();
        let suppliers: HashMap<ObjectId, Supplier> = self
            .suppliers
            .get_by_ids(&supplier_ids)
            .await?
            .into_iter()
            .map(|s| (s.id, s))
            .collect();

        Ok(products
            .into_iter()
            .map(|p| {
                let category = categories.get(&p.category_id).cloned();
                let supplier = suppliers.get(&p.supplier_id).cloned();
                ProductResponse::with_refs(p, category, supplier)
            })
            .collect())
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn insert(&self, product: Product) -> ProductResult<Product> {
        self.products
            .write()
            .await
            .insert(product.id, product.clone());

        tracing::info!(product_id = %product.id, "Created product");
        Ok(product)
    }

    async fn insert_many(&self, products: Vec<Product>) -> ProductResult<usize> {
        let count = products.len();
        let mut store = self.products.write().await;
        for product in products {
            store.insert(product.id, product);
        }
        Ok(count)
    }

    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn get_detail(&self, id: ObjectId) -> ProductResult<Option<ProductResponse>> {
        let product = {
            let products = self.products.read().await;
            products.get(&id).filter(|p| !p.is_deleted).cloned()
        };

        match product {
            Some(product) => {
                let mut resolved = self.resolve(vec![product]).await?;
                Ok(resolved.pop())
            }
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> ProductResult<Vec<ProductResponse>> {
        let products: Vec<Product> = {
            let store = self.products.read().await;
            store.values().filter(|p| !p.is_deleted).cloned().collect()
        };
        self.resolve(products).await
    }

    async fn search(&self, filter: &SearchFilter) -> ProductResult<ProductPage> {
        let mut matched: Vec<Product> = {
            let store = self.products.read().await;
            store
                .values()
                .filter(|p| Self::matches(p, filter))
                .cloned()
                .collect()
        };

        // Total reflects the full matching set, independent of pagination
        let total = matched.len() as u64;

        Self::sort(&mut matched);
        let page: Vec<Product> = matched
            .into_iter()
            .skip(filter.pagination.skip as usize)
            .take(filter.pagination.limit as usize)
            .collect();

        let payload = self.resolve(page).await?;
        Ok(ProductPage {
            total,
            count: payload.len(),
            payload,
        })
    }

    async fn exists_by_name(&self, name: &str) -> ProductResult<bool> {
        let products = self.products.read().await;
        Ok(products.values().any(|p| p.name == name))
    }

    async fn update(&self, id: ObjectId, patch: ProductPatch) -> ProductResult<Option<Product>> {
        let mut products = self.products.write().await;

        let Some(product) = products.get_mut(&id).filter(|p| !p.is_deleted) else {
            return Ok(None);
        };

        product.apply_patch(patch);
        tracing::info!(product_id = %id, "Updated product");
        Ok(Some(product.clone()))
    }

    async fn delete(&self, id: ObjectId) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}
