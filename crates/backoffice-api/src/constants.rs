//! API constants
//!
//! All application routes live under a single versioned prefix.

/// Versioned prefix for every application route
pub const API_PREFIX: &str = "/api/v0";

/// Largest JSON body accepted. Requests carry metadata only, never file bytes.
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024;

/// Server-level cap on in-flight requests
pub const MAX_CONCURRENT_REQUESTS: usize = 1024;

/// Build version reported by the health endpoint
pub const SERVICE_VERSION: &str = env!("CARGO_PKG_VERSION");
