use sqlx::{Pool, Sqlite};

use crate::db::{CatalogEntry, Role, UserRepository, WasteLot, WasteRepository};
use crate::error::AppError;
use crate::services::preferences::parse_preferences;

const INVALID_LOT: &str = "Enter valid waste type and quantity.";

/// Quantities are plain positive integers: digits only, no sign, not zero.
pub fn parse_quantity(raw: &str) -> Result<i64, AppError> {
    let raw = raw.trim();
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(AppError::Validation(INVALID_LOT.to_string()));
    }

    match raw.parse::<i64>() {
        Ok(quantity) if quantity > 0 => Ok(quantity),
        _ => Err(AppError::Validation(INVALID_LOT.to_string())),
    }
}

pub async fn add_waste_lot(
    pool: &Pool<Sqlite>,
    seller_id: i64,
    waste_type: &str,
    quantity: &str,
    description: &str,
) -> Result<WasteLot, AppError> {
    let waste_type = waste_type.trim();
    if waste_type.is_empty() {
        return Err(AppError::Validation(INVALID_LOT.to_string()));
    }
    let quantity = parse_quantity(quantity)?;

    let owner = UserRepository::get_by_id(pool, seller_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Seller not found.".to_string()))?;
    if owner.role != Role::Seller {
        return Err(AppError::Auth("Only sellers can add waste.".to_string()));
    }

    let lot = WasteRepository::create(pool, seller_id, waste_type, quantity, description.trim())
        .await?;

    tracing::info!(
        waste_id = lot.waste_id,
        seller_id,
        "♻️ Listed {} x {}",
        lot.quantity,
        lot.waste_type
    );
    Ok(lot)
}

pub async fn list_for_seller(
    pool: &Pool<Sqlite>,
    seller_id: i64,
) -> Result<Vec<WasteLot>, AppError> {
    WasteRepository::list_by_owner(pool, seller_id).await
}

/// Catalog filtered by the buyer's stored preferences, newest first
pub async fn list_for_buyer(
    pool: &Pool<Sqlite>,
    buyer_id: i64,
) -> Result<Vec<CatalogEntry>, AppError> {
    let buyer = UserRepository::get_by_id(pool, buyer_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Buyer not found.".to_string()))?;

    let preferences = parse_preferences(buyer.waste_types.as_deref());
    WasteRepository::list_catalog(pool, &preferences).await
}
