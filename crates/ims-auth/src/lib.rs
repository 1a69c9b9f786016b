//! Authentication and authorization core shared by every IMS service.
//!
//! Trust is established once at login and re-verified independently, without
//! shared memory, on every subsequent request across process boundaries: each
//! service validates the same bearer token against the same shared secret and
//! enforces role-based access control before any business logic runs.
//!
//! The pieces:
//!
//! - [`token::TokenService`] — mints and validates HS256 tokens.
//! - [`issuer::TokenIssuer`] — exchanges verified credentials for a token.
//! - [`principal::Principal`] — the per-request authorization context,
//!   either the `Admin` sentinel or a regular account.
//! - [`extract`] — axum extractors implementing the guard.
//! - [`http`] — the login/profile HTTP surface of the auth service.

pub mod claims;
pub mod error;
pub mod extract;
pub mod http;
pub mod issuer;
pub mod password;
pub mod principal;
pub mod role;
pub mod store;
pub mod token;

pub use claims::AccessTokenClaims;
pub use error::AuthError;
pub use extract::{AuthState, Authenticated, AuthenticatedAllowInactive};
pub use issuer::{AdminCredentials, IssuedToken, TokenIssuer};
pub use principal::Principal;
pub use role::Role;
pub use store::{AccountRecord, AccountStore, MemoryAccountStore};
pub use token::TokenService;
