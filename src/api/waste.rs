use axum::{extract::State, response::Response, Form};
use serde::Deserialize;

use crate::api::auth::FormView;
use crate::api::extract::Seller;
use crate::api::flash::{view, Flash, FlashRedirect, OrFlash};
use crate::api::state::AppState;
use crate::services::catalog;

#[derive(Debug, Deserialize)]
pub struct WasteForm {
    #[serde(default, rename = "type")]
    pub waste_type: String,
    // Kept as text so bad input becomes a flash message, not a rejection
    #[serde(default)]
    pub quantity: String,
    #[serde(default)]
    pub description: String,
}

/// GET /add_waste
pub async fn add_waste_page(Seller(user): Seller, flash: Flash) -> Response {
    view(
        "add_waste",
        flash,
        Some(&user),
        FormView {
            action: "/add_waste",
            fields: &["type", "quantity", "description"],
        },
    )
}

/// POST /add_waste
pub async fn add_waste(
    State(state): State<AppState>,
    Seller(user): Seller,
    Form(form): Form<WasteForm>,
) -> Result<FlashRedirect, FlashRedirect> {
    catalog::add_waste_lot(
        &state.db,
        user.user_id,
        &form.waste_type,
        &form.quantity,
        &form.description,
    )
    .await
    .or_flash("/add_waste")?;

    Ok(FlashRedirect::to("/dashboard").with_message("Waste added successfully."))
}
