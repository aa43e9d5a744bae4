use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::flash::{read_cookie, SESSION_COOKIE};
use crate::api::state::AppState;
use crate::db::SessionRepository;

/// Session middleware - resolves the session cookie to a `CurrentUser`.
///
/// Requests without a live session pass through untouched; the role
/// extractors decide what an anonymous caller may reach. A failed lookup is
/// logged and the request continues as anonymous, so it ends in the usual
/// redirect to the login page.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    if let Some(token) = read_cookie(request.headers(), SESSION_COOKIE) {
        match SessionRepository::get_user_by_token(&state.db, &token).await {
            Ok(Some(user)) => {
                tracing::debug!(user_id = user.user_id, role = %user.role, "Session resolved");
                request.extensions_mut().insert(user);
            }
            Ok(None) => tracing::debug!("Ignoring unknown or expired session cookie"),
            Err(e) => tracing::error!("❌ Session lookup failed: {}", e),
        }
    }

    next.run(request).await
}
