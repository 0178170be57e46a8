use crate::auth::session::CallerIdentity;
use crate::state::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;

/// Resolve the caller from `Authorization: Bearer <session>`.
///
/// A missing or invalid session is not rejected here; handlers decide through
/// the `CallerIdentity` and `MaybeCaller` extractors.
pub async fn session_middleware(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let token = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_owned);

    if let Some(token) = token {
        match state.sessions.verify(&token) {
            Ok(identity) => {
                tracing::debug!(user_id = %identity.user_id, "Session resolved");
                request.extensions_mut().insert::<CallerIdentity>(identity);
            }
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring invalid session");
            }
        }
    }

    next.run(request).await
}
