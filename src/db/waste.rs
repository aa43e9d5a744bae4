use sqlx::{Pool, QueryBuilder, Sqlite};
use crate::db::models::{CatalogEntry, WasteLot};
use crate::error::AppError;

pub struct WasteRepository;

impl WasteRepository {
    pub async fn create(
        pool: &Pool<Sqlite>,
        user_id: i64,
        waste_type: &str,
        quantity: i64,
        description: &str,
    ) -> Result<WasteLot, AppError> {
        let created_at = chrono::Utc::now().timestamp();

        let lot = sqlx::query_as::<_, WasteLot>(
            r#"
INSERT INTO waste (user_id, type, quantity, description, created_at)
VALUES (?, ?, ?, ?, ?)
RETURNING waste_id, user_id, type, quantity, description, created_at
            "#,
        )
        .bind(user_id)
        .bind(waste_type)
        .bind(quantity)
        .bind(description)
        .bind(created_at)
        .fetch_one(pool)
        .await?;

        Ok(lot)
    }

    pub async fn get_by_id(
        pool: &Pool<Sqlite>,
        waste_id: i64,
    ) -> Result<Option<WasteLot>, AppError> {
        let lot = sqlx::query_as::<_, WasteLot>(
            r#"
SELECT waste_id, user_id, type, quantity, description, created_at
FROM waste
WHERE waste_id = ?
            "#
        )
        .bind(waste_id)
        .fetch_optional(pool)
        .await?;

        Ok(lot)
    }

    /// Lots owned by one seller, in insertion order
    pub async fn list_by_owner(
        pool: &Pool<Sqlite>,
        user_id: i64,
    ) -> Result<Vec<WasteLot>, AppError> {
        let lots = sqlx::query_as::<_, WasteLot>(
            r#"
SELECT waste_id, user_id, type, quantity, description, created_at
FROM waste
WHERE user_id = ?
ORDER BY waste_id ASC
            "#
        )
        .bind(user_id)
        .fetch_all(pool)
        .await?;

        Ok(lots)
    }

    /// Catalog with seller names, newest first.
    ///
    /// `types` must already be lower-cased; an empty slice means no filter.
    pub async fn list_catalog(
        pool: &Pool<Sqlite>,
        types: &[String],
    ) -> Result<Vec<CatalogEntry>, AppError> {
        let mut query = QueryBuilder::<Sqlite>::new(
            r#"
SELECT w.waste_id, w.user_id, w.type, w.quantity, w.description, w.created_at,
       u.username AS seller_name
FROM waste w
JOIN users u ON w.user_id = u.user_id
            "#,
        );

        if !types.is_empty() {
            query.push(" WHERE LOWER(w.type) IN (");
            let mut list = query.separated(", ");
            for waste_type in types {
                list.push_bind(waste_type.as_str());
            }
            list.push_unseparated(")");
        }

        query.push(" ORDER BY w.waste_id DESC");

        let entries = query
            .build_query_as::<CatalogEntry>()
            .fetch_all(pool)
            .await?;

        Ok(entries)
    }
}
