//! Application state management.
//!
//! This module defines the shared application state passed to all request
//! handlers. The state contains:
//! - Configuration
//! - MongoDB client/database handles
//! - File storage backend
//! - JWT authentication

use axum_helpers::JwtAuth;
use media::FileStorage;
use std::sync::Arc;

/// Shared application state.
///
/// Cloned per handler (inexpensive Arc clones), providing access to:
/// - Application configuration loaded from environment variables
/// - The pooled MongoDB client and the application database handle
/// - The file storage backend for uploaded images
/// - The stateless JWT issuer/verifier
#[derive(Clone)]
pub struct AppState {
    pub config: crate::config::Config,
    /// Pooled MongoDB client (cheap to clone, shares the connection pool)
    pub client: mongodb::Client,
    /// Handle on the application database
    pub db: mongodb::Database,
    /// Uploaded-image storage backend
    pub storage: Arc<dyn FileStorage>,
    /// Stateless JWT issuer/verifier
    pub jwt_auth: JwtAuth,
}
