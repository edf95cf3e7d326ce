//! Suppliers Domain
//!
//! Suppliers referenced by catalog entries. Like categories, suppliers are
//! soft-deleted so product references stay resolvable.

pub mod error;
pub mod handlers;
pub mod models;
pub mod mongo;
pub mod repository;
pub mod service;

pub use error::{SupplierError, SupplierResult};
pub use models::{CreateSupplier, Supplier, SupplierResponse, UpdateSupplier};
pub use mongo::MongoSupplierRepository;
pub use repository::{InMemorySupplierRepository, SupplierRepository};
pub use service::SupplierService;
