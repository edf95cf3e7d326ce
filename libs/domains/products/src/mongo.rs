//! MongoDB implementation of ProductRepository.
//!
//! This is where the compiled predicate is executed: one count over the full
//! matching set, one sorted/paginated fetch, then a two-step fetch-then-merge
//! dereference of category and supplier ids (a single `$in` query per
//! collection). Dangling references resolve to absent fields, not errors.

use async_trait::async_trait;
use domain_categories::Category;
use domain_suppliers::Supplier;
use futures::TryStreamExt;
use mongodb::bson::{doc, oid::ObjectId, Document};
use mongodb::options::ReturnDocument;
use mongodb::{Collection, Database};
use std::collections::HashMap;
use tracing::instrument;

use crate::error::ProductResult;
use crate::models::{Product, ProductPage, ProductPatch, ProductResponse};
use crate::query::{sort_spec, SearchFilter};
use crate::repository::ProductRepository;

/// MongoDB implementation of the ProductRepository
pub struct MongoProductRepository {
    collection: Collection<Product>,
    categories: Collection<Category>,
    suppliers: Collection<Supplier>,
}

impl MongoProductRepository {
    /// Create a new MongoProductRepository
    pub fn new(db: &Database) -> Self {
        Self {
            collection: db.collection::<Product>("products"),
            categories: db.collection::<Category>("categories"),
            suppliers: db.collection::<Supplier>("suppliers"),
        }
    }

    /// Get the underlying collection for advanced operations
    pub fn collection(&self) -> &Collection<Product> {
        &self.collection
    }

    /// Initialize indexes for query performance and the unique-name rule.
    ///
    /// Idempotent; safe to call on every startup.
    pub async fn init_indexes(&self) -> ProductResult<()> {
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        let indexes = vec![
            // Unique product name
            IndexModel::builder()
                .keys(doc! { "name": 1 })
                .options(
                    IndexOptions::builder()
                        .unique(true)
                        .name("idx_name_unique".to_string())
                        .build(),
                )
                .build(),
            // Reference lookups
            IndexModel::builder()
                .keys(doc! { "categoryId": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_category".to_string())
                        .build(),
                )
                .build(),
            IndexModel::builder()
                .keys(doc! { "supplierId": 1 })
                .options(
                    IndexOptions::builder()
                        .name("idx_supplier".to_string())
                        .build(),
                )
                .build(),
            // Price range queries
            IndexModel::builder()
                .keys(doc! { "price": 1 })
                .options(IndexOptions::builder().name("idx_price".to_string()).build())
                .build(),
        ];

        self.collection.create_indexes(indexes).await?;
        tracing::info!("Product indexes created successfully");
        Ok(())
    }

    fn patch_document(patch: &ProductPatch) -> Document {
        doc! {
            "name": &patch.name,
            "price": patch.price,
            "discount": patch.discount,
            "stock": patch.stock,
            "description": &patch.description,
            "categoryId": patch.category_id,
            "supplierId": patch.supplier_id,
            "updatedAt": mongodb::bson::DateTime::now(),
        }
    }

    /// Resolve category/supplier references for a batch of products.
    ///
    /// Distinct ids are fetched with one `$in` query per collection and merged
    /// back by id.
    async fn resolve(&self, products: Vec<Product>) -> ProductResult<Vec<ProductResponse>> {
        let mut category_ids: Vec<ObjectId> = products.iter().map(|p| p.category_id).collect();
        category_ids.sort_unstable();
        category_ids.dedup();
        let mut supplier_ids: Vec<ObjectId> = products.iter().map(|p| p.supplier_id).collect();
        supplier_ids.sort_unstable();
        supplier_ids.dedup();

        let categories: Vec<Category> = self
            .categories
            .find(doc! { "_id": { "$in": category_ids } })
            .await?
            .try_collect()
            .await?;
        let suppliers: Vec<Supplier> = self
            .suppliers
            .find(doc! { "_id": { "$in": supplier_ids } })
            .await?
            .try_collect()
            .await?;

        let categories: HashMap<ObjectId, Category> =
            categories.into_iter().map(|c| (c.id, c)).collect();
        let suppliers: HashMap<ObjectId, Supplier> =
            suppliers.into_iter().map(|s| (s.id, s)).collect();

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
impl ProductRepository for MongoProductRepository {
    #[instrument(skip(self, product), fields(product_name = %product.name))]
    async fn insert(&self, product: Product) -> ProductResult<Product> {
        self.collection.insert_one(&product).await?;

        tracing::info!(product_id = %product.id, "Product created successfully");
        Ok(product)
    }

    #[instrument(skip(self, products))]
    async fn insert_many(&self, products: Vec<Product>) -> ProductResult<usize> {
        if products.is_empty() {
            return Ok(0);
        }
        let result = self.collection.insert_many(&products).await?;
        Ok(result.inserted_ids.len())
    }

    #[instrument(skip(self))]
    async fn get_by_id(&self, id: ObjectId) -> ProductResult<Option<Product>> {
        let product = self.collection.find_one(doc! { "_id": id }).await?;
        Ok(product)
    }

    #[instrument(skip(self))]
    async fn get_detail(&self, id: ObjectId) -> ProductResult<Option<ProductResponse>> {
        let product = self
            .collection
            .find_one(doc! { "_id": id, "isDeleted": false })
            .await?;

        match product {
            Some(product) => {
                let mut resolved = self.resolve(vec![product]).await?;
                Ok(resolved.pop())
            }
            None => Ok(None),
        }
    }

    #[instrument(skip(self))]
    async fn find_all(&self) -> ProductResult<Vec<ProductResponse>> {
        let products: Vec<Product> = self
            .collection
            .find(doc! { "isDeleted": false })
            .await?
            .try_collect()
            .await?;

        self.resolve(products).await
    }

    #[instrument(skip(self, filter))]
    async fn search(&self, filter: &SearchFilter) -> ProductResult<ProductPage> {
        let predicate = filter.predicate();

        // Count over the whole matching set, ignoring pagination
        let total = self.collection.count_documents(predicate.clone()).await?;

        let options = mongodb::options::FindOptions::builder()
            .limit(filter.pagination.limit)
            .skip(filter.pagination.skip)
            .sort(sort_spec())
            .build();

        let products: Vec<Product> = self
            .collection
            .find(predicate)
            .with_options(options)
            .await?
            .try_collect()
            .await?;

        let payload = self.resolve(products).await?;
        Ok(ProductPage {
            total,
            count: payload.len(),
            payload,
        })
    }

    #[instrument(skip(self))]
    async fn exists_by_name(&self, name: &str) -> ProductResult<bool> {
        let count = self
            .collection
            .count_documents(doc! { "name": name })
            .await?;
        Ok(count > 0)
    }

    #[instrument(skip(self, patch))]
    async fn update(&self, id: ObjectId, patch: ProductPatch) -> ProductResult<Option<Product>> {
        let updated = self
            .collection
            .find_one_and_update(
                doc! { "_id": id, "isDeleted": false },
                doc! { "$set": Self::patch_document(&patch) },
            )
            .return_document(ReturnDocument::After)
            .await?;

        if updated.is_some() {
            tracing::info!(product_id = %id, "Product updated successfully");
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> ProductResult<bool> {
        let result = self.collection.delete_one(doc! { "_id": id }).await?;

        if result.deleted_count > 0 {
            tracing::info!(product_id = %id, "Product deleted successfully");
            Ok(true)
        } else {
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{to_bson, Bson};

    #[test]
    fn test_patch_document_covers_all_scalars_and_refs() {
        let patch = ProductPatch {
            name: "Phone".to_string(),
            price: 99.5,
            discount: 5.0,
            stock: 2,
            description: "desc".to_string(),
            category_id: ObjectId::new(),
            supplier_id: ObjectId::new(),
        };
        let doc = MongoProductRepository::patch_document(&patch);

        for key in [
            "name",
            "price",
            "discount",
            "stock",
            "description",
            "categoryId",
            "supplierId",
            "updatedAt",
        ] {
            assert!(doc.contains_key(key), "missing {key}");
        }
        assert!(!doc.contains_key("images"), "images never updated");
    }

    #[test]
    fn test_patch_document_value_types() {
        let patch = ProductPatch {
            name: "Phone".to_string(),
            price: 99.5,
            discount: 5.0,
            stock: 2,
            description: String::new(),
            category_id: ObjectId::new(),
            supplier_id: ObjectId::new(),
        };
        let doc = MongoProductRepository::patch_document(&patch);

        assert_eq!(doc.get_f64("price").unwrap(), 99.5);
        assert_eq!(doc.get_i64("stock").unwrap(), 2);
        assert!(matches!(
            doc.get("categoryId"),
            Some(Bson::ObjectId(_))
        ));
    }

    #[test]
    fn test_to_bson_roundtrip_keeps_object_ids() {
        // Predicates embed raw ObjectIds; make sure they serialize as such
        let id = ObjectId::new();
        let bson = to_bson(&id).unwrap();
        assert!(matches!(bson, Bson::ObjectId(_)));
    }
}
