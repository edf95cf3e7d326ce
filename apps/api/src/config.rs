use axum_helpers::JwtConfig;
use core_config::{app_info, server::ServerConfig, storage::StorageConfig, AppInfo, FromEnv};
use database::mongo::MongoConfig;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Application-specific configuration
/// Composes shared config components from the `core_config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongo: MongoConfig,
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub jwt: JwtConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let mongo = MongoConfig::from_env()?; // Required - will fail if MONGODB_URI not set
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let storage = StorageConfig::from_env()?; // Uses defaults: UPLOAD_DIR=public/uploads
        let jwt = JwtConfig::from_env()?; // Required - will fail if JWT_SECRET not set

        Ok(Self {
            app: app_info!(),
            mongo,
            server,
            storage,
            jwt,
            environment,
        })
    }
}
