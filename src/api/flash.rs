//! Redirect-with-message responses and the cookies behind them.
//!
//! A failed form post never surfaces as an error page: the handler turns the
//! error into a short-lived `flash` cookie and a 303 to a sensible page, and
//! the next view reads and clears it.

use std::convert::Infallible;

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap, HeaderValue},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Serialize;

use crate::db::CurrentUser;
use crate::error::AppError;

pub const SESSION_COOKIE: &str = "session";
pub const FLASH_COOKIE: &str = "flash";

/// Look up a cookie value by name across all `Cookie` headers
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.to_string())
}

pub fn session_cookie(token: &str, max_age_secs: i64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        SESSION_COOKIE, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

pub fn expired_cookie(name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", name)
}

fn flash_cookie(message: &str) -> String {
    format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax",
        FLASH_COOKIE,
        urlencoding::encode(message)
    )
}

/// 303 See Other, optionally carrying a flash message and extra cookies
#[derive(Debug)]
pub struct FlashRedirect {
    location: String,
    message: Option<String>,
    cookies: Vec<String>,
}

impl FlashRedirect {
    pub fn to(location: impl Into<String>) -> Self {
        Self {
            location: location.into(),
            message: None,
            cookies: Vec::new(),
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_cookie(mut self, cookie: String) -> Self {
        self.cookies.push(cookie);
        self
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }
}

impl IntoResponse for FlashRedirect {
    fn into_response(self) -> Response {
        let mut response = Redirect::to(&self.location).into_response();
        let headers = response.headers_mut();

        let cookies = self
            .message
            .as_deref()
            .map(flash_cookie)
            .into_iter()
            .chain(self.cookies);

        for cookie in cookies {
            match HeaderValue::from_str(&cookie) {
                Ok(value) => {
                    headers.append(header::SET_COOKIE, value);
                }
                Err(e) => tracing::warn!("Dropping unencodable cookie: {}", e),
            }
        }

        response
    }
}

/// Recover an `AppError` at the route boundary as a flash + redirect
pub trait OrFlash<T> {
    fn or_flash(self, location: &str) -> Result<T, FlashRedirect>;
}

impl<T> OrFlash<T> for Result<T, AppError> {
    fn or_flash(self, location: &str) -> Result<T, FlashRedirect> {
        self.map_err(|err| {
            if err.is_client_error() {
                tracing::warn!("⚠️ {} (redirecting to {})", err, location);
            } else {
                tracing::error!("❌ {} (redirecting to {})", err, location);
            }
            FlashRedirect::to(location).with_message(err.user_message())
        })
    }
}

/// Pending flash message, if the previous response left one
#[derive(Debug, Default)]
pub struct Flash(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for Flash
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let message = read_cookie(&parts.headers, FLASH_COOKIE)
            .and_then(|raw| urlencoding::decode(&raw).ok().map(|m| m.into_owned()))
            .filter(|message| !message.is_empty());

        Ok(Flash(message))
    }
}

#[derive(Debug, Serialize)]
struct Page<'a, T: Serialize> {
    page: &'static str,
    flash: Option<String>,
    user: Option<&'a CurrentUser>,
    #[serde(flatten)]
    data: T,
}

/// Render a page as JSON, consuming any pending flash message
pub fn view<T: Serialize>(
    page: &'static str,
    flash: Flash,
    user: Option<&CurrentUser>,
    data: T,
) -> Response {
    let consumed = flash.0.is_some();
    let mut response = Json(Page {
        page,
        flash: flash.0,
        user,
        data,
    })
    .into_response();

    if consumed {
        if let Ok(value) = HeaderValue::from_str(&expired_cookie(FLASH_COOKIE)) {
            response.headers_mut().append(header::SET_COOKIE, value);
        }
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn test_read_cookie_across_headers() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark; session=abc"));
        headers.append(header::COOKIE, HeaderValue::from_static("flash=Hi%20there"));

        assert_eq!(read_cookie(&headers, "session").as_deref(), Some("abc"));
        assert_eq!(read_cookie(&headers, "flash").as_deref(), Some("Hi%20there"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn test_redirect_sets_encoded_flash_cookie() {
        let response = FlashRedirect::to("/dashboard")
            .with_message("Request sent to seller for 'metal'!")
            .into_response();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers()[header::LOCATION], "/dashboard");

        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("flash=Request%20sent%20to%20seller%20for%20%27metal%27%21"));
    }

    #[test]
    fn test_or_flash_masks_internal_errors() {
        let result: Result<(), AppError> = Err(AppError::Internal("disk full".to_string()));
        let redirect = result.or_flash("/login").unwrap_err();

        assert_eq!(redirect.location(), "/login");
        assert!(!redirect.message().unwrap().contains("disk"));
    }

    #[test]
    fn test_session_cookie_flags() {
        let cookie = session_cookie("tok", 3600, true);
        assert!(cookie.starts_with("session=tok;"));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=3600"));
        assert!(cookie.ends_with("; Secure"));
        assert!(!session_cookie("tok", 3600, false).contains("Secure"));
    }
}
