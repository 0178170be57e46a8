//! Application state shared by all handlers.
//!
//! Everything here is read-only after startup; the HTTP and S3 clients pool
//! their connections internally.

use crate::auth::SessionVerifier;
use backoffice_core::Config;
use backoffice_social::GraphApiClient;
use backoffice_storage::UploadAuthorizer;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub uploads: UploadAuthorizer,
    pub instagram: GraphApiClient,
    pub sessions: SessionVerifier,
}
