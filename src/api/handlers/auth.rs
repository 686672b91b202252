//! Handlers for registration, login and the current-user endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::ApiResponse;
use crate::api::dto::auth::{AccountResponse, AuthResponse, CredentialsRequest};
use crate::api::middleware::auth::AuthenticatedCaller;
use crate::error::AppError;
use crate::state::AppState;

/// Registers a new account and returns it with a session token.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Request Body
///
/// ```json
/// { "login": "seller_01", "password": "secret123" }
/// ```
///
/// # Response Codes
///
/// - **201 Created**: `{data: {user, token}, message}`
/// - **400 Bad Request**: Malformed body, invalid login or weak password
/// - **409 Conflict**: Login already taken
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<AuthResponse>>), AppError> {
    let Json(req) = payload?;

    let session = state
        .account_service
        .register(&req.login, &req.password)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::with_message(
            session.into(),
            "User registered successfully",
        )),
    ))
}

/// Authenticates by login and password.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Response Codes
///
/// - **200 OK**: `{data: {user, token}, message}`
/// - **400 Bad Request**: Malformed body
/// - **401 Unauthorized**: Unknown login or wrong password (indistinguishable)
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<AuthResponse>>, AppError> {
    let Json(req) = payload?;

    let session = state
        .account_service
        .login(&req.login, &req.password)
        .await?;

    Ok(Json(ApiResponse::with_message(
        session.into(),
        "Login successful",
    )))
}

/// Returns the account behind the bearer token.
///
/// # Endpoint
///
/// `GET /api/auth/me` (bearer required)
pub async fn me_handler(
    State(state): State<AppState>,
    AuthenticatedCaller(caller): AuthenticatedCaller,
) -> Result<Json<ApiResponse<AccountResponse>>, AppError> {
    let account = state.account_service.get_by_id(caller.id).await?;

    Ok(Json(ApiResponse::data(account.into())))
}
