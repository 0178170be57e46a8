//! Backoffice Storage Library
//!
//! This crate authorizes direct-to-bucket image uploads. The server never sees
//! file bytes: it validates the declared attributes and hands back a presigned
//! PUT URL that binds them.
//!
//! # Upload key format
//!
//! Keys are 64 lowercase hex characters (32 random bytes) at the bucket root.
//! Two grants never share a key, so a write can never replace an existing object
//! through a reused name.

pub mod authorization;
pub mod checksum;
pub mod factory;
pub mod keys;
#[cfg(feature = "storage-s3")]
pub mod s3;
pub mod traits;

// Re-export commonly used types
pub use authorization::{AuthorizationError, SignedUploadGrant, UploadAuthorizer};
pub use factory::create_presigner;
#[cfg(feature = "storage-s3")]
pub use s3::S3Presigner;
pub use traits::{PresignedPut, PresignedPutRequest, StorageError, StorageResult, UploadPresigner};
