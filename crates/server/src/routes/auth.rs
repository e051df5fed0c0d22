//! Account signup and login handlers for both principal namespaces.
//!
//! `/admin/*` and `/user/*` mirror each other exactly; the only difference
//! is which table and which signing secret the auth service is handed.

use axum::{
    Router,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::IntoResponse,
    routing::post,
};
use serde_json::json;

use crate::db::principals::PrincipalTable;
use crate::error::Result;
use crate::middleware::Json;
use crate::services::auth::{AuthService, LoginRequest, SignupRequest, TokenContext};
use crate::state::AppState;

/// Build the accounts router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/signup", post(admin_signup))
        .route("/admin/login", post(admin_login))
        .route("/user/signup", post(customer_signup))
        .route("/user/login", post(customer_login))
}

/// Register a new administrator.
///
/// # Errors
///
/// Returns 400 on validation failure, 409 if the email is taken.
pub async fn admin_signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse> {
    let service = AuthService::new(state.pool(), PrincipalTable::Admins, state.admin_tokens());
    let admin = service.register(&body).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Admin user signup successful",
            "adminUser": admin,
        })),
    ))
}

/// Authenticate an administrator and issue the admin credential.
///
/// # Errors
///
/// Returns 400 on malformed input, 404 for an unknown email, 401 for a
/// wrong password.
pub async fn admin_login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let service = AuthService::new(state.pool(), PrincipalTable::Admins, state.admin_tokens());
    let (_admin, token) = service.login(&body).await?;

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, credential_cookie(state.admin_tokens(), &token))],
        Json(json!({
            "message": "Admin login successful",
            "adminToken": token,
        })),
    ))
}

/// Register a new customer.
///
/// # Errors
///
/// Returns 400 on validation failure, 409 if the email is taken.
pub async fn customer_signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse> {
    let service = AuthService::new(
        state.pool(),
        PrincipalTable::Customers,
        state.customer_tokens(),
    );
    let user = service.register(&body).await?;

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "User signup successful",
            "user": user,
        })),
    ))
}

/// Authenticate a customer and issue the customer credential.
///
/// # Errors
///
/// Returns 400 on malformed input, 404 for an unknown email, 401 for a
/// wrong password.
pub async fn customer_login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let service = AuthService::new(
        state.pool(),
        PrincipalTable::Customers,
        state.customer_tokens(),
    );
    let (_user, token) = service.login(&body).await?;

    Ok((
        StatusCode::OK,
        [(SET_COOKIE, credential_cookie(state.customer_tokens(), &token))],
        Json(json!({
            "message": "User login successful",
            "userToken": token,
        })),
    ))
}

/// Build the role's credential cookie: http-only, same-site, with a max-age
/// matching the signed token's own expiry.
fn credential_cookie(tokens: &TokenContext, token: &str) -> String {
    format!(
        "{}={token}; Max-Age={}; Path=/; HttpOnly; SameSite=Strict",
        tokens.cookie_name(),
        tokens.validity().as_secs()
    )
}
