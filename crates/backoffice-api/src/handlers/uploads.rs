use crate::auth::MaybeCaller;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use backoffice_core::models::{SignedUploadRequest, SignedUploadResponse, SignedUrl};
use backoffice_storage::AuthorizationError;
use std::sync::Arc;
use validator::Validate;

/// Issue a presigned URL for a direct browser-to-bucket image upload
///
/// The URL is valid for 60 seconds and only accepts a PUT whose content type,
/// length and SHA-256 checksum match the declared values.
#[utoipa::path(
    post,
    path = "/api/v0/uploads/signed-url",
    tag = "uploads",
    request_body = SignedUploadRequest,
    responses(
        (status = 200, description = "Presigned URL generated", body = SignedUploadResponse),
        (status = 400, description = "Invalid input", body = ErrorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse),
        (status = 413, description = "Declared size exceeds 10 MiB", body = ErrorResponse),
        (status = 415, description = "Content type not allowed", body = ErrorResponse),
        (status = 502, description = "Storage provider error", body = ErrorResponse)
    ),
    security(("bearer_session" = []))
)]
#[tracing::instrument(skip(state, caller, body), fields(operation = "signed_upload_url"))]
pub async fn create_signed_upload_url(
    State(state): State<Arc<AppState>>,
    MaybeCaller(caller): MaybeCaller,
    body: Result<ValidatedJson<SignedUploadRequest>, HttpAppError>,
) -> Result<impl IntoResponse, HttpAppError> {
    // No session means no further checks, whatever the body holds.
    let Some(caller) = caller else {
        return Err(AuthorizationError::Unauthorized.into());
    };

    let ValidatedJson(request) = body?;
    request.validate()?;

    let grant = state
        .uploads
        .authorize(
            &request.content_type,
            request.size_bytes,
            &request.checksum,
            Some(caller.user_id.as_str()),
        )
        .await?;

    tracing::info!(
        user_id = %caller.user_id,
        key = %grant.key,
        public_url = %grant.public_url(),
        expires_at = %grant.expires_at,
        "Signed upload URL issued"
    );

    Ok(Json(SignedUploadResponse {
        success: SignedUrl {
            url: grant.url,
            headers: grant.headers.into_iter().collect(),
        },
    }))
}
