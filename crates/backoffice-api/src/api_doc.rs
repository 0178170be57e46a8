//! OpenAPI documentation, served at `/api/openapi.json` and rendered at `/docs`.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::error;
use crate::handlers;
use backoffice_core::models;

/// Registers the bearer session scheme referenced by protected routes
struct SessionSecurity;

impl Modify for SessionSecurity {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_session",
                SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Backoffice API",
        version = "0.1.0",
        description = "Backoffice media services (v0): presigned image uploads to object storage and republishing news items on Instagram. Application routes are versioned under /api/v0/."
    ),
    paths(
        handlers::health::health_check,
        handlers::uploads::create_signed_upload_url,
        handlers::news::publish_to_instagram,
    ),
    components(
        schemas(
            // Upload models
            models::SignedUploadRequest,
            models::SignedUploadResponse,
            models::SignedUrl,
            // Publish models
            models::PublishToInstagramRequest,
            models::PublishResponse,
            // Health
            handlers::health::HealthResponse,
            // Error
            error::ErrorResponse,
        )
    ),
    modifiers(&SessionSecurity),
    tags(
        (name = "uploads", description = "Presigned direct-to-storage image uploads"),
        (name = "news", description = "Republishing news items on social platforms"),
        (name = "health", description = "Service health checks")
    )
)]
pub struct ApiDoc;
