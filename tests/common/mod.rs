#![allow(dead_code)]

use sqlx::{Pool, Sqlite};

use waste_exchange::config::Config;
use waste_exchange::db::{self, User};
use waste_exchange::services::{accounts, Registration};

/// Fresh in-memory database with the schema applied
pub async fn test_pool() -> Pool<Sqlite> {
    let pool = db::connect(&Config::default()).await.unwrap();
    db::migrate(&pool).await.unwrap();
    pool
}

pub fn registration(username: &str, role: &str, waste_types: Option<&str>) -> Registration {
    Registration {
        username: username.to_string(),
        email: format!("{}@example.com", username),
        password: "hunter22".to_string(),
        role: role.to_string(),
        waste_types: waste_types.map(str::to_string),
    }
}

pub async fn seller(pool: &Pool<Sqlite>, username: &str) -> User {
    accounts::register(pool, registration(username, "seller", None))
        .await
        .unwrap()
}

pub async fn buyer(pool: &Pool<Sqlite>, username: &str, waste_types: Option<&str>) -> User {
    accounts::register(pool, registration(username, "buyer", waste_types))
        .await
        .unwrap()
}
