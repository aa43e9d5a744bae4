use axum::extract::{Path, State};

use crate::api::extract::{Buyer, Seller};
use crate::api::flash::{FlashRedirect, OrFlash};
use crate::api::state::AppState;
use crate::services::requests;

/// POST /create_request/:waste_id
pub async fn create_request(
    State(state): State<AppState>,
    Buyer(user): Buyer,
    Path(waste_id): Path<i64>,
) -> Result<FlashRedirect, FlashRedirect> {
    let placed = requests::create_request(&state.db, user.user_id, waste_id)
        .await
        .or_flash("/dashboard")?;

    Ok(FlashRedirect::to("/dashboard")
        .with_message(format!("Request sent to seller for '{}'!", placed.waste_type)))
}

/// POST /handle_request/:request_id/:action
pub async fn handle_request(
    State(state): State<AppState>,
    Seller(user): Seller,
    Path((request_id, action)): Path<(i64, String)>,
) -> Result<FlashRedirect, FlashRedirect> {
    let (_, action) = requests::handle_request(&state.db, user.user_id, request_id, &action)
        .await
        .or_flash("/dashboard")?;

    Ok(FlashRedirect::to("/dashboard")
        .with_message(format!("Request {} successfully.", action.past_tense())))
}
