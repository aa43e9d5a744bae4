use sqlx::{Pool, Sqlite};

use crate::db::{
    IncomingRequest, OutgoingRequest, Request, RequestAction, RequestRepository, WasteRepository,
};
use crate::error::AppError;

const ALREADY_REQUESTED: &str = "You have already requested this waste.";
const ALREADY_HANDLED: &str = "Request has already been handled.";

pub fn duplicate_request() -> AppError {
    AppError::Duplicate(ALREADY_REQUESTED.to_string())
}

#[derive(Debug, Clone)]
pub struct RequestPlaced {
    pub request: Request,
    pub waste_type: String,
}

pub async fn create_request(
    pool: &Pool<Sqlite>,
    buyer_id: i64,
    waste_id: i64,
) -> Result<RequestPlaced, AppError> {
    let lot = WasteRepository::get_by_id(pool, waste_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Waste not found.".to_string()))?;

    if RequestRepository::find_by_pair(pool, buyer_id, waste_id).await?.is_some() {
        return Err(duplicate_request());
    }

    // A concurrent insert for the same pair trips the unique index instead
    let request = RequestRepository::create(pool, buyer_id, waste_id)
        .await
        .map_err(|e| e.map_unique_violation(duplicate_request))?;

    tracing::info!(request_id = request.request_id, buyer_id, waste_id, "📨 Request created");

    Ok(RequestPlaced {
        request,
        waste_type: lot.waste_type,
    })
}

/// Accept or deny a pending request on one of the seller's own lots.
pub async fn handle_request(
    pool: &Pool<Sqlite>,
    seller_id: i64,
    request_id: i64,
    action: &str,
) -> Result<(Request, RequestAction), AppError> {
    let action: RequestAction = action.parse()?;

    let request = RequestRepository::get_for_seller(pool, request_id, seller_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Request not found.".to_string()))?;

    if request.status.is_terminal()
        || !RequestRepository::resolve(pool, request_id, action.resulting_status()).await?
    {
        return Err(AppError::Conflict(ALREADY_HANDLED.to_string()));
    }
    let status = action.resulting_status();

    tracing::info!(request_id, seller_id, status = %status, "✅ Request {}", action.past_tense());

    Ok((Request { status, ..request }, action))
}

pub async fn list_for_seller(
    pool: &Pool<Sqlite>,
    seller_id: i64,
) -> Result<Vec<IncomingRequest>, AppError> {
    RequestRepository::list_for_seller(pool, seller_id).await
}

pub async fn list_for_buyer(
    pool: &Pool<Sqlite>,
    buyer_id: i64,
) -> Result<Vec<OutgoingRequest>, AppError> {
    RequestRepository::list_for_buyer(pool, buyer_id).await
}
