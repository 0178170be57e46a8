//! Upload authorization service
//!
//! Decides whether a declared upload is acceptable and, if so, mints a
//! short-lived presigned PUT bound to the declared content type, size and
//! checksum. The binding is enforced by the storage provider when the client
//! performs the write; nothing is stored locally.

use crate::checksum::sha256_hex_to_base64;
use crate::keys::generate_upload_key;
use crate::traits::{PresignedPutRequest, StorageError, UploadPresigner};
use backoffice_core::constants::{
    ALLOWED_UPLOAD_CONTENT_TYPES, MAX_UPLOAD_SIZE_BYTES, UPLOAD_URL_EXPIRY_SECS,
};
use chrono::{DateTime, Utc};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Object metadata key recording who requested the upload.
pub const UPLOADER_METADATA_KEY: &str = "userid";

/// Reasons an upload is refused. Every variant is terminal for the request.
#[derive(Debug, Error)]
pub enum AuthorizationError {
    #[error("Unauthorized")]
    Unauthorized,

    #[error("Tipo de ficheiro não suportado")]
    UnsupportedType(String),

    #[error("Ficheiro grande, por favor escolha um ficheiro mais pequeno")]
    TooLarge { size: u64, max: u64 },

    #[error("Checksum inválido: esperado SHA-256 em hexadecimal")]
    InvalidChecksum,

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// A write credential for exactly one declared upload
#[derive(Debug, Clone)]
pub struct SignedUploadGrant {
    pub url: String,
    /// Generated destination key
    pub key: String,
    /// Headers the PUT must carry unchanged
    pub headers: Vec<(String, String)>,
    pub expires_in_seconds: u64,
    pub expires_at: DateTime<Utc>,
}

impl SignedUploadGrant {
    /// URL the object is reachable at once uploaded (the signed URL without its query).
    pub fn public_url(&self) -> &str {
        self.url.split('?').next().unwrap_or(&self.url)
    }
}

/// Validate the declared attributes and return the base64 checksum to sign.
pub fn validate_declared_upload(
    content_type: &str,
    size_bytes: u64,
    checksum: &str,
) -> Result<String, AuthorizationError> {
    if !ALLOWED_UPLOAD_CONTENT_TYPES.contains(&content_type) {
        return Err(AuthorizationError::UnsupportedType(content_type.to_string()));
    }

    if size_bytes > MAX_UPLOAD_SIZE_BYTES {
        return Err(AuthorizationError::TooLarge {
            size: size_bytes,
            max: MAX_UPLOAD_SIZE_BYTES,
        });
    }

    sha256_hex_to_base64(checksum).ok_or(AuthorizationError::InvalidChecksum)
}

/// Issues presigned upload grants through an injected presigner
#[derive(Clone)]
pub struct UploadAuthorizer {
    presigner: Arc<dyn UploadPresigner>,
}

impl UploadAuthorizer {
    pub fn new(presigner: Arc<dyn UploadPresigner>) -> Self {
        Self { presigner }
    }

    /// Authorize one upload attempt.
    ///
    /// Checks run in order: caller identity, content type, size, checksum. The
    /// presigner is only called once all of them pass, and every successful call
    /// gets a brand-new destination key.
    #[tracing::instrument(
        skip(self, checksum, caller),
        fields(content_type = %content_type, size_bytes = size_bytes, operation = "authorize_upload")
    )]
    pub async fn authorize(
        &self,
        content_type: &str,
        size_bytes: u64,
        checksum: &str,
        caller: Option<&str>,
    ) -> Result<SignedUploadGrant, AuthorizationError> {
        let caller = caller
            .map(str::trim)
            .filter(|c| !c.is_empty())
            .ok_or(AuthorizationError::Unauthorized)?;

        let checksum_sha256 = match validate_declared_upload(content_type, size_bytes, checksum) {
            Ok(encoded) => encoded,
            Err(e) => {
                tracing::debug!(error = %e, "Upload rejected");
                return Err(e);
            }
        };

        let key = generate_upload_key();
        let expires_in = Duration::from_secs(UPLOAD_URL_EXPIRY_SECS);
        let request = PresignedPutRequest {
            key: key.clone(),
            content_type: content_type.to_string(),
            content_length: size_bytes,
            checksum_sha256,
            metadata: vec![(UPLOADER_METADATA_KEY.to_string(), caller.to_string())],
            expires_in,
        };

        let issued_at = Utc::now();
        let presigned = self.presigner.presign_put(&request).await?;

        tracing::info!(
            bucket = %self.presigner.bucket(),
            key = %key,
            "Issued presigned upload URL"
        );

        Ok(SignedUploadGrant {
            url: presigned.url,
            key,
            headers: presigned.headers,
            expires_in_seconds: UPLOAD_URL_EXPIRY_SECS,
            expires_at: issued_at + chrono::Duration::seconds(UPLOAD_URL_EXPIRY_SECS as i64),
        })
    }
}
