use sqlx::{Pool, Sqlite};
use uuid::Uuid;
use crate::db::models::{CurrentUser, Session};
use crate::error::AppError;

pub struct SessionRepository;

impl SessionRepository {
    pub async fn create(
        pool: &Pool<Sqlite>,
        user_id: i64,
        expiry_hours: i64,
    ) -> Result<Session, AppError> {
        let id = Uuid::new_v4().to_string();
        let token = Uuid::new_v4().to_string();
        let created_at = chrono::Utc::now().timestamp();
        let expires_at = expiry_hours
            .checked_mul(3600)
            .and_then(|secs| created_at.checked_add(secs))
            .ok_or_else(|| {
                AppError::Config(format!("Session expiry of {} hours is out of range", expiry_hours))
            })?;

        let session = sqlx::query_as::<_, Session>(
            r#"
INSERT INTO sessions (id, user_id, token, expires_at, created_at)
VALUES (?, ?, ?, ?, ?)
RETURNING *
            "#,
        )
        .bind(&id)
        .bind(user_id)
        .bind(&token)
        .bind(expires_at)
        .bind(created_at)
        .fetch_one(pool)
        .await?;

        Ok(session)
    }

    /// Resolve a live session token to the identity it belongs to
    pub async fn get_user_by_token(
        pool: &Pool<Sqlite>,
        token: &str,
    ) -> Result<Option<CurrentUser>, AppError> {
        let now = chrono::Utc::now().timestamp();

        let user = sqlx::query_as::<_, CurrentUser>(
            r#"
SELECT u.user_id, u.username, u.role
FROM sessions s
JOIN users u ON s.user_id = u.user_id
WHERE s.token = ? AND s.expires_at > ?
            "#
        )
        .bind(token)
        .bind(now)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    pub async fn delete(
        pool: &Pool<Sqlite>,
        token: &str,
    ) -> Result<(), AppError> {
        sqlx::query("DELETE FROM sessions WHERE token = ?")
            .bind(token)
            .execute(pool)
            .await?;

        Ok(())
    }

    pub async fn cleanup_expired(pool: &Pool<Sqlite>) -> Result<u64, AppError> {
        let now = chrono::Utc::now().timestamp();

        let result = sqlx::query("DELETE FROM sessions WHERE expires_at <= ?")
            .bind(now)
            .execute(pool)
            .await?;

        Ok(result.rows_affected())
    }
}
