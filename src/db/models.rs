use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;

use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Role {
    Buyer,
    Seller,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Buyer => "buyer",
            Role::Seller => "seller",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "buyer" => Ok(Role::Buyer),
            "seller" => Ok(Role::Seller),
            _ => Err(AppError::Validation("Role must be buyer or seller".to_string())),
        }
    }
}

/// Lifecycle of a request: created `Pending`, then `Accept` or `Deny` (terminal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum RequestStatus {
    Pending,
    Accept,
    Deny,
}

impl RequestStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RequestStatus::Pending => "pending",
            RequestStatus::Accept => "accept",
            RequestStatus::Deny => "deny",
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, RequestStatus::Pending)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a seller may do with a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestAction {
    Accept,
    Deny,
}

impl RequestAction {
    pub fn resulting_status(&self) -> RequestStatus {
        match self {
            RequestAction::Accept => RequestStatus::Accept,
            RequestAction::Deny => RequestStatus::Deny,
        }
    }

    pub fn past_tense(&self) -> &'static str {
        match self {
            RequestAction::Accept => "accepted",
            RequestAction::Deny => "denied",
        }
    }
}

impl FromStr for RequestAction {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "accept" => Ok(RequestAction::Accept),
            "deny" => Ok(RequestAction::Deny),
            _ => Err(AppError::Validation("Invalid action.".to_string())),
        }
    }
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password: String,
    pub role: Role,
    pub waste_types: Option<String>,
    pub created_at: i64,
}

#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: String,
    pub user_id: i64,
    pub token: String,
    pub expires_at: i64,
    pub created_at: i64,
}

/// Identity resolved from a live session, attached to each request.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CurrentUser {
    pub user_id: i64,
    pub username: String,
    pub role: Role,
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WasteLot {
    pub waste_id: i64,
    pub user_id: i64,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub waste_type: String,
    pub quantity: i64,
    pub description: String,
    pub created_at: i64,
}

/// A lot as a buyer sees it in the catalog
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CatalogEntry {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub lot: WasteLot,
    pub seller_name: String, // Joined from users table
}

#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Request {
    pub request_id: i64,
    pub buyer_id: i64,
    pub waste_id: i64,
    pub status: RequestStatus,
    pub created_at: i64,
}

/// A request against one of the seller's lots
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct IncomingRequest {
    pub request_id: i64,
    pub waste_id: i64,
    pub status: RequestStatus,
    pub buyer_name: String,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub waste_type: String,
    pub quantity: i64,
    pub created_at: i64,
}

/// A request the buyer has made
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OutgoingRequest {
    pub request_id: i64,
    pub waste_id: i64,
    pub status: RequestStatus,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub waste_type: String,
    pub quantity: i64,
    pub seller_name: String,
    pub created_at: i64,
}
