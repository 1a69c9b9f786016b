//! Token minting and validation against the shared secret.
//!
//! Validation is a pure computation: no I/O, no cross-request state. Every
//! service holds an identical [`TokenService`] built from the same
//! configuration, which is what lets authorization be re-verified
//! independently in each process.

use std::time::Duration;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use crate::claims::AccessTokenClaims;
use crate::error::AuthError;
use crate::role::Role;

/// Mints and validates HS256 access tokens.
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    ttl: Duration,
}

impl TokenService {
    /// Creates a token service from the shared secret.
    #[must_use]
    pub fn new(secret: &str, issuer: impl Into<String>, ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            issuer: issuer.into(),
            ttl,
        }
    }

    /// Returns the issuer stamped into minted tokens.
    #[must_use]
    pub fn issuer(&self) -> &str {
        &self.issuer
    }

    /// Returns the configured token lifetime.
    #[must_use]
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Mints a token for the admin principal.
    pub fn mint_admin(&self) -> Result<String, AuthError> {
        self.sign(&AccessTokenClaims::admin(&self.issuer, self.ttl))
    }

    /// Mints a token for a regular account.
    pub fn mint_for_account(
        &self,
        subject: &str,
        role: Role,
        is_active: bool,
    ) -> Result<String, AuthError> {
        self.sign(&AccessTokenClaims::for_account(
            subject,
            role,
            is_active,
            &self.issuer,
            self.ttl,
        ))
    }

    fn sign(&self, claims: &AccessTokenClaims) -> Result<String, AuthError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AuthError::internal(format!("failed to sign token: {e}")))
    }

    /// Decodes and verifies a token string.
    ///
    /// Checks, in order: signature, expiry (zero leeway), issuer. An `iss`
    /// claim, when present, must equal the configured issuer even though the
    /// signature already verified, so tokens minted by a different trust
    /// domain with the same secret format are rejected. An absent `iss` is
    /// tolerated. All failures collapse into [`AuthError::InvalidToken`].
    pub fn validate(&self, token: &str) -> Result<AccessTokenClaims, AuthError> {
        if token.is_empty() {
            return Err(AuthError::InvalidToken);
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp"]);

        let data = decode::<AccessTokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token validation failed");
                AuthError::InvalidToken
            })?;
        let claims = data.claims;

        if let Some(iss) = claims.iss.as_deref()
            && iss != self.issuer
        {
            tracing::debug!(issuer = %iss, "Token issuer mismatch");
            return Err(AuthError::InvalidToken);
        }

        // sub is absent iff the role is admin.
        if claims.sub.is_none() && claims.role != Role::Admin {
            tracing::debug!("Token has no subject but a non-admin role");
            return Err(AuthError::InvalidToken);
        }

        Ok(claims)
    }
}
