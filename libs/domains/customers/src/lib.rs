//! Customers Domain
//!
//! Customer accounts and session issuance. Registration hashes passwords with
//! argon2; login verifies credentials and issues a pair of stateless HS256
//! JWTs (access + refresh, both 30 days). Customers are soft-deleted.

pub mod auth_handlers;
pub mod error;
pub mod handlers;
pub mod models;
pub mod mongo;
pub mod repository;
pub mod service;

pub use auth_handlers::{auth_router, AuthState};
pub use error::{CustomerError, CustomerResult};
pub use models::{
    CreateCustomer, Customer, CustomerResponse, LoginRequest, LoginResponse, RefreshRequest,
    UpdateCustomer,
};
pub use mongo::MongoCustomerRepository;
pub use repository::{CustomerRepository, InMemoryCustomerRepository};
pub use service::CustomerService;
