//! Database library providing the MongoDB connector and connection utilities.
//!
//! This library owns connection lifecycle concerns: configuration, initial
//! connect (optionally with retry/backoff), and health checks. Query logic
//! lives with the domain repositories.
//!
//! # Example
//!
//! ```ignore
//! use database::mongo;
//!
//! let config = mongo::MongoConfig::from_env()?;
//! let client = mongo::connect_from_config_with_retry(&config, None).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;
pub mod mongo;

pub use common::{retry, retry_with_backoff, RetryConfig};
