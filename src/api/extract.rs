//! Role gates for handlers.
//!
//! Each extractor reads the `CurrentUser` put in place by the session
//! middleware. Anonymous callers are sent to the login page; callers with the
//! wrong role get the same redirect plus a message.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};

use crate::api::flash::FlashRedirect;
use crate::db::{CurrentUser, Role};

/// Any logged-in user
#[derive(Debug, Clone)]
pub struct Authenticated(pub CurrentUser);

/// A logged-in buyer
#[derive(Debug, Clone)]
pub struct Buyer(pub CurrentUser);

/// A logged-in seller
#[derive(Debug, Clone)]
pub struct Seller(pub CurrentUser);

fn current_user(parts: &Parts) -> Result<CurrentUser, FlashRedirect> {
    parts
        .extensions
        .get::<CurrentUser>()
        .cloned()
        .ok_or_else(|| FlashRedirect::to("/login"))
}

/// What to tell a logged-in user whose role cannot reach `path`
pub fn role_mismatch_message(required: Role, path: &str) -> &'static str {
    match required {
        Role::Buyer if path.starts_with("/create_request/") => "Only buyers can request waste.",
        Role::Seller if path.starts_with("/handle_request/") => "Only sellers can respond to requests.",
        Role::Buyer => "Only buyers can do that.",
        Role::Seller => "Only sellers can do that.",
    }
}

fn require_role(parts: &Parts, role: Role) -> Result<CurrentUser, FlashRedirect> {
    let user = current_user(parts)?;
    if user.role != role {
        let path = parts.uri.path();
        tracing::debug!(user_id = user.user_id, "Role {} cannot reach {}", user.role, path);
        return Err(FlashRedirect::to("/login").with_message(role_mismatch_message(role, path)));
    }
    Ok(user)
}

#[async_trait]
impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = FlashRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        current_user(parts).map(Authenticated)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Buyer
where
    S: Send + Sync,
{
    type Rejection = FlashRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, Role::Buyer).map(Buyer)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Seller
where
    S: Send + Sync,
{
    type Rejection = FlashRedirect;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        require_role(parts, Role::Seller).map(Seller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_mismatch_messages_name_the_action() {
        assert_eq!(
            role_mismatch_message(Role::Buyer, "/create_request/7"),
            "Only buyers can request waste."
        );
        assert_eq!(
            role_mismatch_message(Role::Seller, "/handle_request/3/accept"),
            "Only sellers can respond to requests."
        );
        assert_eq!(role_mismatch_message(Role::Buyer, "/ai_match"), "Only buyers can do that.");
        assert_eq!(role_mismatch_message(Role::Seller, "/add_waste"), "Only sellers can do that.");
    }
}
