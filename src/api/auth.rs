use axum::{
    extract::State,
    http::HeaderMap,
    response::Response,
    Form,
};
use serde::{Deserialize, Serialize};

use crate::api::extract::Authenticated;
use crate::api::flash::{
    expired_cookie, read_cookie, session_cookie, view, Flash, FlashRedirect, OrFlash,
    SESSION_COOKIE,
};
use crate::api::state::AppState;
use crate::services::{accounts, Registration};

#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub waste_types: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Describes the form a page expects to be posted back
#[derive(Debug, Serialize)]
pub struct FormView {
    pub action: &'static str,
    pub fields: &'static [&'static str],
}

/// GET /
pub async fn index(user: Option<Authenticated>) -> FlashRedirect {
    match user {
        Some(_) => FlashRedirect::to("/dashboard"),
        None => FlashRedirect::to("/login"),
    }
}

/// GET /register
pub async fn register_page(flash: Flash) -> Response {
    view(
        "register",
        flash,
        None,
        FormView {
            action: "/register",
            fields: &["username", "email", "password", "role", "waste_types"],
        },
    )
}

/// POST /register
pub async fn register(
    State(state): State<AppState>,
    Form(form): Form<RegisterForm>,
) -> Result<FlashRedirect, FlashRedirect> {
    accounts::register(
        &state.db,
        Registration {
            username: form.username,
            email: form.email,
            password: form.password,
            role: form.role,
            waste_types: form.waste_types,
        },
    )
    .await
    .or_flash("/register")?;

    Ok(FlashRedirect::to("/login").with_message("Registration successful! Please login."))
}

/// GET /login
pub async fn login_page(flash: Flash) -> Response {
    view(
        "login",
        flash,
        None,
        FormView {
            action: "/login",
            fields: &["username", "password"],
        },
    )
}

/// POST /login
pub async fn login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<FlashRedirect, FlashRedirect> {
    let expiry_hours = state.config.session_expiry_hours;

    let logged_in = accounts::login(&state.db, &form.username, &form.password, expiry_hours)
        .await
        .or_flash("/login")?;

    let cookie = session_cookie(
        &logged_in.session.token,
        state.config.session_max_age_secs(),
        state.config.secure_cookies,
    );

    Ok(FlashRedirect::to("/dashboard").with_cookie(cookie))
}

/// GET /logout
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<FlashRedirect, FlashRedirect> {
    if let Some(token) = read_cookie(&headers, SESSION_COOKIE) {
        accounts::logout(&state.db, &token).await.or_flash("/login")?;
    }

    Ok(FlashRedirect::to("/login").with_cookie(expired_cookie(SESSION_COOKIE)))
}
