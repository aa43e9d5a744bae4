use sqlx::{Pool, Sqlite};

use crate::crypto::{hash_password, verify_password};
use crate::db::{CurrentUser, Role, Session, SessionRepository, User, UserRepository};
use crate::error::AppError;

/// Raw registration input, as submitted by the form
#[derive(Debug, Clone, Default)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
    pub role: String,
    pub waste_types: Option<String>,
}

/// A freshly opened session and the identity it is bound to
#[derive(Debug, Clone)]
pub struct LoggedIn {
    pub session: Session,
    pub user: CurrentUser,
}

const INVALID_CREDENTIALS: &str = "Invalid username or password.";
const ACCOUNT_EXISTS: &str = "Username or Email already exists.";

pub fn account_exists() -> AppError {
    AppError::Conflict(ACCOUNT_EXISTS.to_string())
}

pub async fn register(pool: &Pool<Sqlite>, form: Registration) -> Result<User, AppError> {
    let username = form.username.trim();
    let email = form.email.trim();

    if username.is_empty() || email.is_empty() || form.password.is_empty() {
        return Err(AppError::Validation("Please fill all fields correctly.".to_string()));
    }
    if !email.contains('@') {
        return Err(AppError::Validation("Please enter a valid email address.".to_string()));
    }
    let role: Role = form.role.parse()?;

    // Preferences only mean something for buyers
    let waste_types = match role {
        Role::Buyer => form
            .waste_types
            .as_deref()
            .map(str::trim)
            .filter(|types| !types.is_empty()),
        Role::Seller => None,
    };

    if UserRepository::get_by_username(pool, username).await?.is_some()
        || UserRepository::get_by_email(pool, email).await?.is_some()
    {
        return Err(account_exists());
    }

    let password_hash = hash_password(&form.password)?;

    let user = UserRepository::create(pool, username, email, &password_hash, role, waste_types)
        .await
        .map_err(|e| e.map_unique_violation(account_exists))?;

    tracing::info!(user_id = user.user_id, role = %user.role, "👤 Registered {}", user.username);
    Ok(user)
}

pub async fn login(
    pool: &Pool<Sqlite>,
    username: &str,
    password: &str,
    expiry_hours: i64,
) -> Result<LoggedIn, AppError> {
    let user = UserRepository::get_by_username(pool, username.trim())
        .await?
        .ok_or_else(|| AppError::Auth(INVALID_CREDENTIALS.to_string()))?;

    if !verify_password(password, &user.password)? {
        tracing::debug!(user_id = user.user_id, "Rejected login with wrong password");
        return Err(AppError::Auth(INVALID_CREDENTIALS.to_string()));
    }

    let purged = SessionRepository::cleanup_expired(pool).await?;
    if purged > 0 {
        tracing::debug!("🧹 Purged {} expired sessions", purged);
    }

    let session = SessionRepository::create(pool, user.user_id, expiry_hours).await?;
    tracing::info!(user_id = user.user_id, "🔑 {} logged in", user.username);

    Ok(LoggedIn {
        session,
        user: CurrentUser {
            user_id: user.user_id,
            username: user.username,
            role: user.role,
        },
    })
}

pub async fn logout(pool: &Pool<Sqlite>, token: &str) -> Result<(), AppError> {
    SessionRepository::delete(pool, token).await
}
