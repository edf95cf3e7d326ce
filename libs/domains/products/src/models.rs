use domain_categories::{Category, CategoryResponse};
use domain_suppliers::{Supplier, SupplierResponse};
use mongodb::bson::{oid::ObjectId, DateTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Discounted price derived from price and discount percentage.
///
/// Never stored; computed on the way out of the system.
pub fn discounted_price(price: f64, discount: f64) -> f64 {
    price * (100.0 - discount) / 100.0
}

/// Image descriptor: the uploaded name plus its storage location.
///
/// The catalog knows nothing about the storage medium; the location string is
/// only meaningful to the media layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageRef {
    /// Original (sanitized) file name
    pub name: String,
    /// Storage-relative location
    pub location: String,
}

/// An uploaded image file on its way into storage.
#[derive(Debug, Clone)]
pub struct ProductImageUpload {
    /// Multipart field the file arrived under
    pub field: String,
    /// Client-supplied file name
    pub filename: String,
    /// Raw bytes
    pub data: Vec<u8>,
}

/// Product entity as stored in the `products` collection.
///
/// Field names match the wire/storage format (camelCase, `_id`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub name: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub discount: f64,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<ImageRef>,
    pub category_id: ObjectId,
    pub supplier_id: ObjectId,
    #[serde(default)]
    pub is_deleted: bool,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

impl Product {
    /// Create a new product from validated input plus stored image descriptors.
    pub fn new(
        input: CreateProduct,
        category_id: ObjectId,
        supplier_id: ObjectId,
        images: Vec<ImageRef>,
    ) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            name: input.name,
            price: input.price,
            discount: input.discount,
            stock: input.stock,
            description: input.description,
            images,
            category_id,
            supplier_id,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Build a product from a seeding draft and the references to attach.
    pub fn from_draft(draft: ProductDraft, category_id: ObjectId, supplier_id: ObjectId) -> Self {
        let now = DateTime::now();
        Self {
            id: ObjectId::new(),
            name: draft.name,
            price: draft.price,
            discount: draft.discount,
            stock: draft.stock,
            description: draft.description,
            images: Vec::new(),
            category_id,
            supplier_id,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn discounted_price(&self) -> f64 {
        discounted_price(self.price, self.discount)
    }

    /// Replace the scalar fields and references. Images are untouched.
    pub fn apply_patch(&mut self, patch: ProductPatch) {
        self.name = patch.name;
        self.price = patch.price;
        self.discount = patch.discount;
        self.stock = patch.stock;
        self.description = patch.description;
        self.category_id = patch.category_id;
        self.supplier_id = patch.supplier_id;
        self.updated_at = DateTime::now();
    }
}

/// Replacement values for the update path, with reference ids already parsed.
#[derive(Debug, Clone)]
pub struct ProductPatch {
    pub name: String,
    pub price: f64,
    pub discount: f64,
    pub stock: i64,
    pub description: String,
    pub category_id: ObjectId,
    pub supplier_id: ObjectId,
}

impl ProductPatch {
    pub fn from_update(input: UpdateProduct, category_id: ObjectId, supplier_id: ObjectId) -> Self {
        Self {
            name: input.name,
            price: input.price,
            discount: input.discount,
            stock: input.stock,
            description: input.description,
            category_id,
            supplier_id,
        }
    }
}

/// API representation of a product, optionally with resolved references.
///
/// `category`/`supplier` are embedded when the read path resolves them; a
/// dangling reference simply leaves the field absent.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductResponse {
    /// Hex-encoded id
    pub id: String,
    pub name: String,
    pub price: f64,
    pub discount: f64,
    /// Derived: price × (100 − discount) / 100
    pub discounted_price: f64,
    pub stock: i64,
    pub description: String,
    pub images: Vec<ImageRef>,
    pub category_id: String,
    pub supplier_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<CategoryResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<SupplierResponse>,
    pub is_deleted: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl ProductResponse {
    /// Response without reference resolution.
    pub fn from_product(product: Product) -> Self {
        Self::with_refs(product, None, None)
    }

    /// Response with resolved category/supplier embedded.
    pub fn with_refs(
        product: Product,
        category: Option<Category>,
        supplier: Option<Supplier>,
    ) -> Self {
        Self {
            id: product.id.to_hex(),
            discounted_price: product.discounted_price(),
            name: product.name,
            price: product.price,
            discount: product.discount,
            stock: product.stock,
            description: product.description,
            images: product.images,
            category_id: product.category_id.to_hex(),
            supplier_id: product.supplier_id.to_hex(),
            category: category.map(Into::into),
            supplier: supplier.map(Into::into),
            is_deleted: product.is_deleted,
            created_at: product.created_at.to_chrono(),
            updated_at: product.updated_at.to_chrono(),
        }
    }
}

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        Self::from_product(product)
    }
}

/// Paginated result envelope.
///
/// `total` counts every document matching the predicate; `count` is the size
/// of the returned page.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ProductPage {
    pub total: u64,
    pub count: usize,
    pub payload: Vec<ProductResponse>,
}

/// DTO for creating a new product.
///
/// Reference ids arrive as opaque strings and are parsed (and checked against
/// live records) by the service.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProduct {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub price: f64,
    #[validate(range(min = 0.0, max = 75.0))]
    #[serde(default)]
    pub discount: f64,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock: i64,
    #[validate(length(max = 3000))]
    #[serde(default)]
    pub description: String,
    pub category_id: String,
    pub supplier_id: String,
}

/// DTO for updating an existing product.
///
/// The update path replaces the scalar fields and references wholesale and
/// never touches images.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProduct {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub price: f64,
    #[validate(range(min = 0.0, max = 75.0))]
    #[serde(default)]
    pub discount: f64,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock: i64,
    #[validate(length(max = 3000))]
    #[serde(default)]
    pub description: String,
    pub category_id: String,
    pub supplier_id: String,
}

/// A product draft for bulk seeding; references are attached by the service.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct ProductDraft {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    #[validate(range(min = 0.0))]
    #[serde(default)]
    pub price: f64,
    #[validate(range(min = 0.0, max = 75.0))]
    #[serde(default)]
    pub discount: f64,
    #[validate(range(min = 0))]
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub description: String,
}
