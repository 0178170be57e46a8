use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use utoipa::ToSchema;
use validator::Validate;

/// Request for a presigned image upload URL
#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SignedUploadRequest {
    /// Declared MIME type of the file
    #[validate(length(
        min = 1,
        max = 255,
        message = "Content type must be between 1 and 255 characters"
    ))]
    pub content_type: String,
    /// Declared file size in bytes
    pub size_bytes: u64,
    /// Hex-encoded SHA-256 digest of the file bytes
    #[serde(alias = "contentChecksum")]
    #[validate(length(min = 1, max = 128, message = "Checksum is required"))]
    pub checksum: String,
}

/// Successful upload authorization: `{ "success": { "url": ... } }`
///
/// Failures use the shared error body, whose `error` field is the discriminant
/// callers branch on.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignedUploadResponse {
    pub success: SignedUrl,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignedUrl {
    /// Presigned PUT URL, valid for 60 seconds
    pub url: String,
    /// Headers the upload must carry unchanged for the signature to hold
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub headers: BTreeMap<String, String>,
}
