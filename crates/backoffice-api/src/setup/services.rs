//! Service construction from configuration

use crate::auth::SessionVerifier;
use crate::state::AppState;
use anyhow::{Context, Result};
use backoffice_core::Config;
use backoffice_social::GraphApiClient;
use backoffice_storage::{create_presigner, UploadAuthorizer};
use std::sync::Arc;

/// Build the shared application state
pub async fn initialize_services(config: &Config) -> Result<Arc<AppState>> {
    let presigner = create_presigner(&config.storage)
        .await
        .context("Failed to initialize upload presigner")?;

    let instagram = GraphApiClient::new(&config.instagram)?;
    tracing::info!(
        api_base = %config.instagram.api_base,
        timeout_secs = config.instagram.timeout_secs,
        "Instagram Graph API client initialized"
    );

    Ok(Arc::new(AppState {
        config: config.clone(),
        uploads: UploadAuthorizer::new(presigner),
        instagram,
        sessions: SessionVerifier::new(&config.base.auth_secret),
    }))
}
