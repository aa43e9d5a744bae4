use axum::{extract::State, response::Response};
use serde::Serialize;

use crate::api::extract::Authenticated;
use crate::api::flash::{view, Flash, FlashRedirect, OrFlash};
use crate::api::state::AppState;
use crate::db::{CatalogEntry, IncomingRequest, OutgoingRequest, Role, WasteLot};
use crate::services::{catalog, requests};

#[derive(Debug, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Dashboard {
    /// Own lots and the requests made against them
    Seller {
        wastes: Vec<WasteLot>,
        requests: Vec<IncomingRequest>,
    },
    /// Preference-filtered catalog and own requests
    Buyer {
        wastes: Vec<CatalogEntry>,
        requests: Vec<OutgoingRequest>,
    },
}

/// GET /dashboard
pub async fn dashboard(
    State(state): State<AppState>,
    Authenticated(user): Authenticated,
    flash: Flash,
) -> Result<Response, FlashRedirect> {
    let data = match user.role {
        Role::Seller => Dashboard::Seller {
            wastes: catalog::list_for_seller(&state.db, user.user_id)
                .await
                .or_flash("/login")?,
            requests: requests::list_for_seller(&state.db, user.user_id)
                .await
                .or_flash("/login")?,
        },
        Role::Buyer => Dashboard::Buyer {
            wastes: catalog::list_for_buyer(&state.db, user.user_id)
                .await
                .or_flash("/login")?,
            requests: requests::list_for_buyer(&state.db, user.user_id)
                .await
                .or_flash("/login")?,
        },
    };

    Ok(view("dashboard", flash, Some(&user), data))
}
