//! Storage abstraction trait
//!
//! This module defines the presigner seam the upload authorization service signs
//! through. The S3 backend lives in `s3`; tests substitute in-memory doubles.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Storage backend error: {0}")]
    BackendError(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Everything a presigned PUT binds. All fields are signed together; the
/// storage provider rejects a write whose bytes or headers differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresignedPutRequest {
    pub key: String,
    pub content_type: String,
    pub content_length: u64,
    /// Base64-encoded SHA-256 digest, as the provider expects it
    pub checksum_sha256: String,
    /// User metadata stored with the object
    pub metadata: Vec<(String, String)>,
    pub expires_in: Duration,
}

/// A signed write endpoint and the headers that must accompany the PUT
#[derive(Debug, Clone)]
pub struct PresignedPut {
    pub url: String,
    pub headers: Vec<(String, String)>,
}

/// Issues presigned PUT URLs against a single bucket
#[async_trait]
pub trait UploadPresigner: Send + Sync {
    /// Sign a PUT for exactly the attributes in `request`
    async fn presign_put(&self, request: &PresignedPutRequest) -> StorageResult<PresignedPut>;

    /// Name of the bucket uploads land in
    fn bucket(&self) -> &str;
}
