use crate::traits::{
    PresignedPut, PresignedPutRequest, StorageError, StorageResult, UploadPresigner,
};
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::{Credentials, Region};
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::Client;
use backoffice_core::StorageConfig;

/// S3 presigner for direct browser uploads
#[derive(Clone)]
pub struct S3Presigner {
    client: Client,
    bucket: String,
    region: String,
}

impl S3Presigner {
    /// Create a presigner from explicit bucket credentials
    ///
    /// With `endpoint_url` set (e.g. "http://localhost:9000" for MinIO) the client
    /// switches to path-style addressing, which S3-compatible providers require.
    pub async fn new(config: &StorageConfig) -> StorageResult<Self> {
        let credentials = Credentials::new(
            config.access_key_id.clone(),
            config.secret_access_key.clone(),
            None,
            None,
            "backoffice-config",
        );

        let sdk_config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .load()
            .await;

        let mut s3_config_builder = aws_sdk_s3::config::Builder::from(&sdk_config);
        if let Some(ref endpoint) = config.endpoint_url {
            s3_config_builder = s3_config_builder
                .endpoint_url(endpoint)
                .force_path_style(true);
        }

        Ok(Self::from_client(
            Client::from_conf(s3_config_builder.build()),
            config.bucket.clone(),
            config.region.clone(),
        ))
    }

    /// Wrap an already configured client
    pub fn from_client(client: Client, bucket: String, region: String) -> Self {
        S3Presigner {
            client,
            bucket,
            region,
        }
    }

    pub fn region(&self) -> &str {
        &self.region
    }
}

#[async_trait]
impl UploadPresigner for S3Presigner {
    async fn presign_put(&self, request: &PresignedPutRequest) -> StorageResult<PresignedPut> {
        let content_length = i64::try_from(request.content_length).map_err(|_| {
            StorageError::BackendError(format!(
                "content length {} does not fit the S3 API",
                request.content_length
            ))
        })?;

        let presigning_config = PresigningConfig::expires_in(request.expires_in)
            .map_err(|e| StorageError::ConfigError(e.to_string()))?;

        let mut put = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(&request.key)
            .content_type(&request.content_type)
            .content_length(content_length)
            .checksum_sha256(&request.checksum_sha256);
        for (name, value) in &request.metadata {
            put = put.metadata(name, value);
        }

        let presigned = put.presigned(presigning_config).await.map_err(|e| {
            tracing::error!(
                error = %e,
                bucket = %self.bucket,
                key = %request.key,
                "S3 presign failed"
            );
            StorageError::BackendError(e.to_string())
        })?;

        let headers = presigned
            .headers()
            .map(|(name, value)| (name.to_string(), value.to_string()))
            .collect();

        tracing::debug!(
            bucket = %self.bucket,
            key = %request.key,
            expires_in_seconds = request.expires_in.as_secs(),
            "Generated presigned PUT URL"
        );

        Ok(PresignedPut {
            url: presigned.uri().to_string(),
            headers,
        })
    }

    fn bucket(&self) -> &str {
        &self.bucket
    }
}
