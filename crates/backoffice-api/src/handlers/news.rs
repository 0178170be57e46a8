use crate::auth::CallerIdentity;
use crate::error::{ErrorResponse, HttpAppError, ValidatedJson};
use crate::state::AppState;
use axum::{extract::State, Json};
use backoffice_core::models::{PublishResponse, PublishToInstagramRequest};
use backoffice_social::{publish, resolve_caption};
use std::sync::Arc;
use validator::Validate;

/// Republish a news item on Instagram
///
/// Publishing outcomes, failures included, are reported with status 200 and the
/// `success` flag. Only a missing session or a malformed body is an HTTP error.
#[utoipa::path(
    post,
    path = "/api/v0/news/publish-to-instagram",
    tag = "news",
    request_body = PublishToInstagramRequest,
    responses(
        (status = 200, description = "Publish outcome", body = PublishResponse),
        (status = 400, description = "Malformed request body", body = ErrorResponse),
        (status = 401, description = "No valid session", body = ErrorResponse)
    ),
    security(("bearer_session" = []))
)]
#[tracing::instrument(
    skip(state, caller, body),
    fields(user_id = %caller.user_id, operation = "publish_to_instagram")
)]
pub async fn publish_to_instagram(
    State(state): State<Arc<AppState>>,
    caller: CallerIdentity,
    body: Result<ValidatedJson<PublishToInstagramRequest>, HttpAppError>,
) -> Result<Json<PublishResponse>, HttpAppError> {
    let ValidatedJson(request) = body?;
    request.validate()?;

    let caption = resolve_caption(
        request.caption.as_deref(),
        request.title.as_deref(),
        request.content.as_deref(),
    );
    let image_url = request.image_url.as_deref().unwrap_or_default();

    let response = match publish(&state.instagram, &caption, image_url).await {
        Ok(published) => {
            tracing::info!(
                news_id = ?request.id,
                instagram_post_id = %published.remote_id,
                "News item published to Instagram"
            );
            PublishResponse::published(published.remote_id)
        }
        Err(e) => {
            tracing::warn!(news_id = ?request.id, error = %e, "News item not published to Instagram");
            PublishResponse::failed(e.to_string())
        }
    };

    Ok(Json(response))
}
