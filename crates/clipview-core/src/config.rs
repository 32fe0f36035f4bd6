//! Configuration module
//!
//! Environment-driven configuration for the storage layer. Every setting is
//! optional at read time; the storage factory reports which settings a
//! chosen backend actually requires.

use std::env;

use crate::storage_types::StorageBackend;

/// Storage configuration read from the environment.
#[derive(Clone, Debug, Default)]
pub struct StorageConfig {
    pub storage_backend: Option<StorageBackend>,
    pub s3_region: Option<String>,
    pub aws_region: Option<String>,
    /// Custom endpoint for S3-compatible providers (MinIO, DigitalOcean Spaces, etc.)
    pub s3_endpoint: Option<String>,
    pub local_storage_path: Option<String>,
}

impl StorageConfig {
    pub fn from_env() -> Self {
        StorageConfig {
            storage_backend: env::var("STORAGE_BACKEND")
                .ok()
                .and_then(|v| v.parse().ok()),
            s3_region: env::var("S3_REGION").ok(),
            aws_region: env::var("AWS_REGION").ok(),
            s3_endpoint: env::var("S3_ENDPOINT").ok(),
            local_storage_path: env::var("LOCAL_STORAGE_PATH").ok(),
        }
    }

    /// Effective region: `S3_REGION` wins over `AWS_REGION`.
    pub fn region(&self) -> Option<&str> {
        self.s3_region.as_deref().or(self.aws_region.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_region_precedence() {
        let config = StorageConfig {
            s3_region: Some("us-east-1".to_string()),
            aws_region: Some("eu-west-1".to_string()),
            ..Default::default()
        };
        assert_eq!(config.region(), Some("us-east-1"));

        let config = StorageConfig {
            aws_region: Some("eu-west-1".to_string()),
            ..Default::default()
        };
        assert_eq!(config.region(), Some("eu-west-1"));
    }
}
