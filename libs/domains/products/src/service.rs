use domain_categories::CategoryRepository;
use domain_suppliers::SupplierRepository;
use media::{sanitize_filename, FileStorage};
use mongodb::bson::oid::ObjectId;
use std::sync::Arc;
use tracing::warn;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{
    CreateProduct, ImageRef, Product, ProductDraft, ProductImageUpload, ProductPage, ProductPatch,
    ProductResponse, UpdateProduct,
};
use crate::query::{ProductQuery, SearchFilter};
use crate::repository::ProductRepository;

/// Service layer for Product business logic.
///
/// Owns the cross-entity rules: reference checks against categories and
/// suppliers, image persistence and cleanup, and the per-path error
/// conflation of the read endpoints.
pub struct ProductService<R, C, S> {
    repository: Arc<R>,
    categories: Arc<C>,
    suppliers: Arc<S>,
    storage: Arc<dyn FileStorage>,
}

impl<R, C, S> Clone for ProductService<R, C, S> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            categories: self.categories.clone(),
            suppliers: self.suppliers.clone(),
            storage: self.storage.clone(),
        }
    }
}

impl<R, C, S> ProductService<R, C, S>
where
    R: ProductRepository,
    C: CategoryRepository,
    S: SupplierRepository,
{
    pub fn new(
        repository: R,
        categories: Arc<C>,
        suppliers: Arc<S>,
        storage: Arc<dyn FileStorage>,
    ) -> Self {
        Self {
            repository: Arc::new(repository),
            categories,
            suppliers,
            storage,
        }
    }

    /// Create a product.
    ///
    /// The category and supplier existence checks are issued concurrently and
    /// awaited jointly; every violated reference contributes one message to
    /// the error list, and nothing is persisted unless both pass.
    pub async fn create_product(
        &self,
        input: CreateProduct,
        files: Vec<ProductImageUpload>,
    ) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let category_id: ObjectId = input
            .category_id
            .parse()
            .map_err(|_| ProductError::Validation("Invalid categoryId".to_string()))?;
        let supplier_id: ObjectId = input
            .supplier_id
            .parse()
            .map_err(|_| ProductError::Validation("Invalid supplierId".to_string()))?;

        if self.repository.exists_by_name(&input.name).await? {
            return Err(ProductError::DuplicateName(input.name));
        }

        // Both reference checks in flight at once; proceed only when both
        // have completed
        let (category, supplier) = tokio::join!(
            self.categories.get_by_id(category_id),
            self.suppliers.get_by_id(supplier_id)
        );

        let mut violations = Vec::new();
        match category? {
            None => violations.push("Category not found".to_string()),
            Some(category) if category.is_deleted => {
                violations.push("Category is deleted".to_string());
            }
            Some(_) => {}
        }
        match supplier? {
            None => violations.push("Supplier not found".to_string()),
            Some(supplier) if supplier.is_deleted => {
                violations.push("Supplier is deleted".to_string());
            }
            Some(_) => {}
        }

        if !violations.is_empty() {
            return Err(ProductError::References(violations));
        }

        // Persist the uploads and record their descriptors
        let mut images = Vec::with_capacity(files.len());
        for file in files {
            let location = self.storage.generate_location(&file.field, &file.filename);
            self.storage
                .write(&location, &file.data)
                .await
                .map_err(|e| ProductError::Internal(format!("Image upload failed: {}", e)))?;
            images.push(ImageRef {
                name: sanitize_filename(&file.filename),
                location,
            });
        }

        let product = Product::new(input, category_id, supplier_id, images);
        self.repository.insert(product).await
    }

    /// Bulk-seed products, attaching any live category and supplier.
    pub async fn seed_products(&self, drafts: Vec<ProductDraft>) -> ProductResult<usize> {
        for draft in &drafts {
            draft
                .validate()
                .map_err(|e| ProductError::Validation(e.to_string()))?;
        }

        let (categories, suppliers) =
            tokio::join!(self.categories.list(), self.suppliers.list());

        let category = categories?
            .into_iter()
            .next()
            .ok_or_else(|| ProductError::References(vec!["Category not found".to_string()]))?;
        let supplier = suppliers?
            .into_iter()
            .next()
            .ok_or_else(|| ProductError::References(vec!["Supplier not found".to_string()]))?;

        let products = drafts
            .into_iter()
            .map(|draft| Product::from_draft(draft, category.id, supplier.id))
            .collect();

        self.repository.insert_many(products).await
    }

    /// Get a non-deleted product with resolved references.
    ///
    /// Malformed ids, missing records, and storage failures all collapse to
    /// the same not-found outcome.
    pub async fn get_product(&self, id: &str) -> ProductResult<ProductResponse> {
        let id: ObjectId = id.parse().map_err(|_| ProductError::NotFound)?;

        self.repository
            .get_detail(id)
            .await
            .map_err(|_| ProductError::NotFound)?
            .ok_or(ProductError::NotFound)
    }

    /// All non-deleted products with resolved references. Failures collapse
    /// to the generic listing error.
    pub async fn list_all(&self) -> ProductResult<Vec<ProductResponse>> {
        self.repository
            .find_all()
            .await
            .map_err(|_| ProductError::ListFailed)
    }

    /// Paginated listing (no filters beyond the soft-delete flag).
    pub async fn list_page(
        &self,
        page: Option<u64>,
        page_size: Option<i64>,
    ) -> ProductResult<ProductPage> {
        let filter = SearchFilter::page_only(page, page_size);
        self.repository
            .search(&filter)
            .await
            .map_err(|_| ProductError::SearchFailed)
    }

    /// Full keyword/reference/price search. Any failure, including malformed
    /// reference ids, collapses to the generic search error.
    pub async fn search_products(&self, query: ProductQuery) -> ProductResult<ProductPage> {
        let filter = SearchFilter::from_query(query).map_err(|_| ProductError::SearchFailed)?;
        self.repository
            .search(&filter)
            .await
            .map_err(|_| ProductError::SearchFailed)
    }

    /// Replace a product's scalar fields and references. References are
    /// re-validated only when they change; images are never touched here.
    pub async fn update_product(&self, id: &str, input: UpdateProduct) -> ProductResult<Product> {
        let id: ObjectId = id.parse().map_err(|_| ProductError::NotFound)?;

        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let category_id: ObjectId = input
            .category_id
            .parse()
            .map_err(|_| ProductError::Validation("Invalid categoryId".to_string()))?;
        let supplier_id: ObjectId = input
            .supplier_id
            .parse()
            .map_err(|_| ProductError::Validation("Invalid supplierId".to_string()))?;

        let product = self
            .repository
            .get_by_id(id)
            .await?
            .filter(|p| !p.is_deleted)
            .ok_or(ProductError::NotFound)?;

        let mut violations = Vec::new();
        if product.category_id != category_id
            && self.categories.get_active(category_id).await?.is_none()
        {
            violations.push("Category not found".to_string());
        }
        if product.supplier_id != supplier_id
            && self.suppliers.get_active(supplier_id).await?.is_none()
        {
            violations.push("Supplier not found".to_string());
        }
        if !violations.is_empty() {
            return Err(ProductError::References(violations));
        }

        self.repository
            .update(id, ProductPatch::from_update(input, category_id, supplier_id))
            .await?
            .ok_or(ProductError::NotFound)
    }

    /// Hard-delete a product: remove each image file best-effort, then the
    /// database record.
    pub async fn delete_product(&self, id: &str) -> ProductResult<()> {
        let id: ObjectId = id.parse().map_err(|_| ProductError::NotFound)?;

        let product = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound)?;

        for image in &product.images {
            if let Err(e) = self.storage.delete(&image.location).await {
                warn!(location = %image.location, error = %e, "Failed to delete product image");
            }
        }

        let deleted = self.repository.delete(id).await?;
        if !deleted {
            return Err(ProductError::NotFound);
        }

        Ok(())
    }
}
