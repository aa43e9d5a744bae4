use axum::{extract::State, response::Response};
use serde::Serialize;

use crate::api::extract::Buyer;
use crate::api::flash::{view, Flash, FlashRedirect, OrFlash};
use crate::api::state::AppState;
use crate::services::{matching, Suggestion};

#[derive(Debug, Serialize)]
struct MatchView {
    matches: Vec<Suggestion>,
}

/// GET /ai_match
pub async fn ai_match(
    State(state): State<AppState>,
    Buyer(user): Buyer,
    flash: Flash,
) -> Result<Response, FlashRedirect> {
    let matches = matching::suggestions_for_buyer(&state.db, user.user_id)
        .await
        .or_flash("/dashboard")?;

    Ok(view("ai_match", flash, Some(&user), MatchView { matches }))
}
