//! Caller identity resolution from bearer tokens.
//!
//! [`layer`] runs on every request and records the outcome in request
//! extensions. Handlers then pick the extractor matching their access level:
//!
//! - [`Caller`] - optional identity; an invalid token reads as anonymous
//! - [`AuthenticatedCaller`] - identity required, `401` otherwise

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;
use std::convert::Infallible;

use crate::domain::entities::CallerIdentity;
use crate::error::AppError;
use crate::state::AppState;

/// Outcome of bearer resolution stored in request extensions.
#[derive(Debug, Clone)]
enum CallerState {
    Anonymous,
    Authenticated(CallerIdentity),
    Rejected(&'static str),
}

/// Resolves the caller identity from the `Authorization` header.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// Never rejects by itself: protected handlers decide via [`AuthenticatedCaller`].
///
/// # Example
///
/// ```rust,ignore
/// let app = Router::new()
///     .route("/api/listings", get(list_listings_handler))
///     .layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(State(st): State<AppState>, req: Request, next: Next) -> Response {
    let (mut parts, body) = req.into_parts();

    let caller = if parts.headers.contains_key(AUTHORIZATION) {
        match AuthBearer::from_request_parts(&mut parts, &()).await {
            Ok(AuthBearer(token)) => match st.credentials.verify_token(&token) {
                Ok(claims) => CallerState::Authenticated(CallerIdentity {
                    id: claims.user_id,
                    login: claims.login,
                }),
                Err(_) => CallerState::Rejected("Invalid token"),
            },
            Err(_) => CallerState::Rejected("Bearer token required"),
        }
    } else {
        CallerState::Anonymous
    };

    parts.extensions.insert(caller);
    let req = Request::from_parts(parts, body);

    next.run(req).await
}

/// Optional caller identity for public endpoints.
#[derive(Debug, Clone)]
pub struct Caller(pub Option<CallerIdentity>);

impl Caller {
    pub fn id(&self) -> Option<i64> {
        self.0.as_ref().map(|c| c.id)
    }
}

impl<S: Send + Sync> FromRequestParts<S> for Caller {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let identity = match parts.extensions.get::<CallerState>() {
            Some(CallerState::Authenticated(identity)) => Some(identity.clone()),
            _ => None,
        };

        Ok(Caller(identity))
    }
}

/// Caller identity required by protected endpoints.
///
/// # Errors
///
/// Rejects with `401 Unauthorized` if:
/// - Authorization header is missing
/// - The scheme is not `Bearer`
/// - The token is malformed, forged or expired
#[derive(Debug, Clone)]
pub struct AuthenticatedCaller(pub CallerIdentity);

impl<S: Send + Sync> FromRequestParts<S> for AuthenticatedCaller {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        match parts.extensions.get::<CallerState>() {
            Some(CallerState::Authenticated(identity)) => Ok(AuthenticatedCaller(identity.clone())),
            Some(CallerState::Rejected(reason)) => {
                tracing::warn!(reason, "Rejected bearer credential");
                Err(AppError::unauthorized(*reason))
            }
            Some(CallerState::Anonymous) | None => {
                Err(AppError::unauthorized("Authorization header required"))
            }
        }
    }
}
