#[cfg(feature = "storage-s3")]
use crate::S3Presigner;
use crate::{StorageError, StorageResult, UploadPresigner};
use backoffice_core::StorageConfig;
use std::sync::Arc;

/// Create the upload presigner for the configured bucket
pub async fn create_presigner(config: &StorageConfig) -> StorageResult<Arc<dyn UploadPresigner>> {
    if config.bucket.trim().is_empty() {
        return Err(StorageError::ConfigError(
            "AWS_BUCKET_NAME not configured".to_string(),
        ));
    }

    #[cfg(feature = "storage-s3")]
    {
        let presigner = S3Presigner::new(config).await?;
        tracing::info!(
            bucket = %config.bucket,
            region = %config.region,
            custom_endpoint = config.endpoint_url.is_some(),
            "S3 upload presigner initialized"
        );
        Ok(Arc::new(presigner))
    }

    #[cfg(not(feature = "storage-s3"))]
    {
        Err(StorageError::ConfigError(
            "S3 presigner not available (storage-s3 feature not enabled)".to_string(),
        ))
    }
}
