use crate::{env_or_default, ConfigError, FromEnv};

/// File storage configuration for uploaded media
#[derive(Clone, Debug)]
pub struct StorageConfig {
    /// Directory uploaded files are written under
    pub upload_dir: String,
    /// Base URL uploaded files are served from
    pub base_url: String,
}

impl StorageConfig {
    pub fn new(upload_dir: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            upload_dir: upload_dir.into(),
            base_url: base_url.into(),
        }
    }
}

impl FromEnv for StorageConfig {
    /// Reads from environment variables with sensible defaults:
    /// - UPLOAD_DIR: defaults to "public/uploads"
    /// - UPLOAD_BASE_URL: defaults to "/uploads"
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            upload_dir: env_or_default("UPLOAD_DIR", "public/uploads"),
            base_url: env_or_default("UPLOAD_BASE_URL", "/uploads"),
        })
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            upload_dir: "public/uploads".to_string(),
            base_url: "/uploads".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_storage_config_defaults() {
        temp_env::with_vars(
            [("UPLOAD_DIR", None::<&str>), ("UPLOAD_BASE_URL", None::<&str>)],
            || {
                let config = StorageConfig::from_env().unwrap();
                assert_eq!(config.upload_dir, "public/uploads");
                assert_eq!(config.base_url, "/uploads");
            },
        );
    }

    #[test]
    fn test_storage_config_from_env_custom() {
        temp_env::with_vars(
            [
                ("UPLOAD_DIR", Some("/var/lib/storefront/uploads")),
                ("UPLOAD_BASE_URL", Some("https://cdn.example.com/uploads")),
            ],
            || {
                let config = StorageConfig::from_env().unwrap();
                assert_eq!(config.upload_dir, "/var/lib/storefront/uploads");
                assert_eq!(config.base_url, "https://cdn.example.com/uploads");
            },
        );
    }
}
