//! HTTP surface of the auth service: login and self-profile.
//!
//! Routes are registered under the same `/api/v1/auth` prefix the gateway
//! forwards, since the gateway never strips prefixes.

use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{FromRef, State},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};

use ims_notify::{EntityType, WorkflowNotifier};

use crate::error::AuthError;
use crate::extract::{AuthState, AuthenticatedAllowInactive};
use crate::issuer::TokenIssuer;
use crate::principal::Principal;
use crate::role::Role;
use crate::store::{AccountRecord, AccountStore};
use crate::token::TokenService;

/// State for the auth service HTTP handlers.
#[derive(Clone)]
pub struct AuthApiState {
    /// Token issuer used by login.
    pub issuer: Arc<TokenIssuer>,
    /// Account lookup for the profile endpoint.
    pub store: Arc<dyn AccountStore>,
    /// Token validation service for the extractors.
    pub tokens: Arc<TokenService>,
    /// Workflow notifier; `None` disables audit callbacks.
    pub notifier: Option<WorkflowNotifier>,
}

impl FromRef<AuthApiState> for AuthState {
    fn from_ref(state: &AuthApiState) -> Self {
        AuthState::new(state.tokens.clone())
    }
}

/// Builds the auth service router.
pub fn router(state: AuthApiState) -> Router {
    Router::new()
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/auth/me", get(me))
        .with_state(state)
}

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    /// Login name.
    pub username: String,
    /// Plaintext password.
    pub password: String,
}

/// Caller-visible account summary.
#[derive(Debug, Serialize)]
pub struct UserInfo {
    /// Business identifier; `null` for admin.
    pub user_id: Option<String>,
    /// Login name.
    pub username: String,
    /// Contact email, if any.
    pub email: Option<String>,
    /// Display name.
    pub name: String,
    /// Role of the account.
    pub role: Role,
    /// Whether the account is active.
    pub is_active: bool,
    /// Whether this is the admin sentinel.
    pub is_admin: bool,
}

impl UserInfo {
    fn admin(username: &str) -> Self {
        Self {
            user_id: None,
            username: username.to_string(),
            email: None,
            name: "Admin".to_string(),
            role: Role::Admin,
            is_active: true,
            is_admin: true,
        }
    }

    fn from_account(account: &AccountRecord) -> Self {
        Self {
            user_id: Some(account.user_id.clone()),
            username: account.username.clone(),
            email: account.email.clone(),
            name: account.name.clone(),
            role: account.role,
            is_active: account.is_active,
            is_admin: false,
        }
    }
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    /// The signed access token.
    pub access_token: String,
    /// Always `"bearer"`.
    pub token_type: String,
    /// Summary of the authenticated account.
    pub user: UserInfo,
}

/// `POST /api/v1/auth/login` — validates credentials and issues a token.
async fn login(
    State(state): State<AuthApiState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AuthError> {
    let issued = state
        .issuer
        .issue(&request.username, &request.password)
        .await?;

    let user = match (&issued.principal, &issued.account) {
        (Principal::Admin, _) => UserInfo::admin(&request.username),
        (Principal::Regular { .. }, Some(account)) => UserInfo::from_account(account),
        (Principal::Regular { subject, .. }, None) => {
            return Err(AuthError::internal(format!(
                "issued token for {subject} without account record"
            )));
        }
    };

    // Audit the login once the outcome is decided. `notify` hands delivery
    // to a detached task, so it cannot delay or fail the response even
    // though it is invoked before the response is sent. Admin logins are
    // not recorded because the admin has no business identifier.
    if let (Some(notifier), Some(user_id)) = (&state.notifier, issued.principal.subject()) {
        notifier.notify(user_id, "User Login", EntityType::User, Some(user_id));
    }

    Ok(Json(LoginResponse {
        access_token: issued.access_token,
        token_type: "bearer".to_string(),
        user,
    }))
}

/// `GET /api/v1/auth/me` — returns the caller's own profile.
///
/// Inactive principals are allowed here so a deactivated user can still see
/// their locked-out account.
async fn me(
    State(state): State<AuthApiState>,
    AuthenticatedAllowInactive(principal): AuthenticatedAllowInactive,
) -> Result<Json<UserInfo>, AuthError> {
    match &principal {
        Principal::Admin => Ok(Json(UserInfo::admin("admin"))),
        Principal::Regular { subject, .. } => {
            let account = state
                .store
                .find_by_id(subject)
                .await?
                .ok_or_else(|| AuthError::unauthorized("User not found"))?;
            Ok(Json(UserInfo::from_account(&account)))
        }
    }
}
