use std::time::Duration;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Sqlite};

use crate::config::Config;
use crate::error::AppError;

pub mod models;
pub mod users;
pub mod sessions;
pub mod waste;
pub mod requests;

pub use models::{
    CatalogEntry, CurrentUser, IncomingRequest, OutgoingRequest, Request, RequestAction,
    RequestStatus, Role, Session, User, WasteLot,
};
pub use users::UserRepository;
pub use sessions::SessionRepository;
pub use waste::WasteRepository;
pub use requests::RequestRepository;

/// Open the connection pool described by `config`.
pub async fn connect(config: &Config) -> Result<Pool<Sqlite>, AppError> {
    // An in-memory database lives and dies with its connection
    let in_memory = config.database_url.contains(":memory:");

    let mut options = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        .min_connections(config.db_min_connections)
        .acquire_timeout(Duration::from_secs(30));

    options = if in_memory {
        options.max_connections(1).idle_timeout(None).max_lifetime(None)
    } else {
        options
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
    };

    Ok(options.connect(&config.database_url).await?)
}

/// Apply the embedded schema migrations
pub async fn migrate(pool: &Pool<Sqlite>) -> Result<(), AppError> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
