//! Products Domain
//!
//! The catalog core. Listing and search compile optional request parameters
//! into a single MongoDB predicate (the filter builder in [`query`]), execute
//! a count plus a sorted, paginated fetch against that predicate, and resolve
//! category/supplier references into embedded objects (the result assembly in
//! the repository implementations).
//!
//! Products are the one entity with a hard delete: removing a product deletes
//! the database record and its image files, while the `isDeleted` flag is
//! still what the read paths filter on. Categories and suppliers stay
//! soft-deleted.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints (incl. multipart upload)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Validation, reference checks, image lifecycle
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Predicate execution + reference resolution
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Query/Model │  ← Filter builder, entities, DTOs
//! └─────────────┘
//! ```

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongo;
pub mod query;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use error::{ProductError, ProductResult};
pub use models::{
    discounted_price, CreateProduct, ImageRef, Product, ProductDraft, ProductImageUpload,
    ProductPage, ProductPatch, ProductResponse, UpdateProduct,
};
pub use mongo::MongoProductRepository;
pub use query::{fuzzy_pattern, Pagination, ProductQuery, SearchFilter};
pub use repository::{InMemoryProductRepository, ProductRepository};
pub use service::ProductService;
