//! Bearer token extractors implementing the authorization guard.
//!
//! Every request re-executes the full machine independently:
//! `NoToken -> TokenPresent -> {Valid, Invalid}`, then
//! `Valid -> {Authorized, Forbidden(role), Forbidden(inactive)}`. Nothing is
//! carried between requests, so services scale and fail independently; the
//! trade-off is that a token cannot be revoked before its natural expiry.
//!
//! # Example
//!
//! ```ignore
//! use ims_auth::{Authenticated, Role};
//!
//! async fn doctor_only(Authenticated(principal): Authenticated) -> Result<String, AuthError> {
//!     principal.require_role(&[Role::Doctor])?;
//!     Ok(format!("hello {}", principal.subject().unwrap_or("admin")))
//! }
//! ```

use std::sync::Arc;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};

use crate::error::AuthError;
use crate::principal::Principal;
use crate::token::TokenService;

/// State required by the bearer extractors.
///
/// Include it in your application state and expose it via `FromRef`.
#[derive(Clone)]
pub struct AuthState {
    /// Shared token validation service.
    pub tokens: Arc<TokenService>,
}

impl AuthState {
    /// Creates auth state around a token service.
    #[must_use]
    pub fn new(tokens: Arc<TokenService>) -> Self {
        Self { tokens }
    }
}

/// Extracts the bearer token string from the `Authorization` header.
fn bearer_token(parts: &Parts) -> Result<&str, AuthError> {
    let header = parts
        .headers
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AuthError::unauthorized("Missing Authorization header"))?;

    header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| AuthError::unauthorized("Malformed Authorization header"))
}

/// Derives the principal for this request, without the active check.
fn authenticate(parts: &Parts, state: &AuthState) -> Result<Principal, AuthError> {
    let token = bearer_token(parts)?;
    let claims = state.tokens.validate(token)?;
    Principal::from_claims(&claims)
}

/// Extractor that authenticates the caller and rejects inactive accounts.
///
/// This is the guard form used by nearly every endpoint. Rejections map to
/// 401 (missing/invalid/expired token) or 403 (deactivated account) before
/// any business logic runs.
pub struct Authenticated(pub Principal);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let principal = authenticate(parts, &auth_state)?;
        principal.require_active()?;
        Ok(Self(principal))
    }
}

/// Extractor that authenticates the caller but allows inactive accounts.
///
/// Used only by self-profile endpoints so a deactivated user can still see
/// why they are locked out.
pub struct AuthenticatedAllowInactive(pub Principal);

impl<S> FromRequestParts<S> for AuthenticatedAllowInactive
where
    S: Send + Sync,
    AuthState: FromRef<S>,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_state = AuthState::from_ref(state);
        let principal = authenticate(parts, &auth_state)?;
        Ok(Self(principal))
    }
}
