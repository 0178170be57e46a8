pub mod publish;
pub mod upload;

pub use publish::{PublishResponse, PublishToInstagramRequest};
pub use upload::{SignedUploadRequest, SignedUploadResponse, SignedUrl};
