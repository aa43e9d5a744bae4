use sqlx::{Pool, Sqlite};
use crate::db::models::{IncomingRequest, OutgoingRequest, Request, RequestStatus};
use crate::error::AppError;

pub struct RequestRepository;

impl RequestRepository {
    pub async fn create(
        pool: &Pool<Sqlite>,
        buyer_id: i64,
        waste_id: i64,
    ) -> Result<Request, AppError> {
        let created_at = chrono::Utc::now().timestamp();

        let request = sqlx::query_as::<_, Request>(
            r#"
INSERT INTO requests (buyer_id, waste_id, status, created_at)
VALUES (?, ?, ?, ?)
RETURNING *
            "#,
        )
        .bind(buyer_id)
        .bind(waste_id)
        .bind(RequestStatus::Pending)
        .bind(created_at)
        .fetch_one(pool)
        .await?;

        Ok(request)
    }

    pub async fn find_by_pair(
        pool: &Pool<Sqlite>,
        buyer_id: i64,
        waste_id: i64,
    ) -> Result<Option<Request>, AppError> {
        let request = sqlx::query_as::<_, Request>(
            "SELECT * FROM requests WHERE buyer_id = ? AND waste_id = ?"
        )
        .bind(buyer_id)
        .bind(waste_id)
        .fetch_optional(pool)
        .await?;

        Ok(request)
    }

    pub async fn get_by_id(
        pool: &Pool<Sqlite>,
        request_id: i64,
    ) -> Result<Option<Request>, AppError> {
        let request = sqlx::query_as::<_, Request>(
            "SELECT * FROM requests WHERE request_id = ?"
        )
        .bind(request_id)
        .fetch_optional(pool)
        .await?;

        Ok(request)
    }

    /// A request, but only if it targets a lot owned by `seller_id`
    pub async fn get_for_seller(
        pool: &Pool<Sqlite>,
        request_id: i64,
        seller_id: i64,
    ) -> Result<Option<Request>, AppError> {
        let request = sqlx::query_as::<_, Request>(
            r#"
SELECT r.request_id, r.buyer_id, r.waste_id, r.status, r.created_at
FROM requests r
JOIN waste w ON r.waste_id = w.waste_id
WHERE r.request_id = ? AND w.user_id = ?
            "#
        )
        .bind(request_id)
        .bind(seller_id)
        .fetch_optional(pool)
        .await?;

        Ok(request)
    }

    /// Moves a pending request to `status`. Returns false if it was no longer pending.
    pub async fn resolve(
        pool: &Pool<Sqlite>,
        request_id: i64,
        status: RequestStatus,
    ) -> Result<bool, AppError> {
        let result = sqlx::query(
            "UPDATE requests SET status = ? WHERE request_id = ? AND status = ?"
        )
        .bind(status)
        .bind(request_id)
        .bind(RequestStatus::Pending)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }

    pub async fn list_for_seller(
        pool: &Pool<Sqlite>,
        seller_id: i64,
    ) -> Result<Vec<IncomingRequest>, AppError> {
        let requests = sqlx::query_as::<_, IncomingRequest>(
            r#"
SELECT r.request_id, r.waste_id, r.status, u.username AS buyer_name,
       w.type, w.quantity, r.created_at
FROM requests r
JOIN users u ON r.buyer_id = u.user_id
JOIN waste w ON r.waste_id = w.waste_id
WHERE w.user_id = ?
ORDER BY r.request_id DESC
            "#
        )
        .bind(seller_id)
        .fetch_all(pool)
        .await?;

        Ok(requests)
    }

    pub async fn list_for_buyer(
        pool: &Pool<Sqlite>,
        buyer_id: i64,
    ) -> Result<Vec<OutgoingRequest>, AppError> {
        let requests = sqlx::query_as::<_, OutgoingRequest>(
            r#"
SELECT r.request_id, r.waste_id, r.status, w.type, w.quantity,
       u.username AS seller_name, r.created_at
FROM requests r
JOIN waste w ON r.waste_id = w.waste_id
JOIN users u ON w.user_id = u.user_id
WHERE r.buyer_id = ?
ORDER BY r.request_id DESC
            "#
        )
        .bind(buyer_id)
        .fetch_all(pool)
        .await?;

        Ok(requests)
    }
}
