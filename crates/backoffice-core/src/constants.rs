//! Constants shared by the upload and publishing flows.

/// MIME types accepted for image uploads.
pub const ALLOWED_UPLOAD_CONTENT_TYPES: [&str; 4] =
    ["image/jpeg", "image/jpg", "image/png", "image/webp"];

/// Maximum declared upload size (10 MiB).
pub const MAX_UPLOAD_SIZE_BYTES: u64 = 1024 * 1024 * 10;

/// Lifetime of an issued upload URL.
pub const UPLOAD_URL_EXPIRY_SECS: u64 = 60;

/// Graph API base used for Instagram content publishing.
pub const DEFAULT_GRAPH_API_BASE: &str = "https://graph.facebook.com/v19.0";

/// Default HTTP client timeout for Graph API calls.
pub const DEFAULT_GRAPH_API_TIMEOUT_SECS: u64 = 30;
