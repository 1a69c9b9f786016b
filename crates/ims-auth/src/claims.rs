//! Token claims.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::role::Role;

/// Claims carried in an IMS access token.
///
/// `sub` is the account's business identifier (e.g. `PAT-000012`) and is
/// absent exactly when `role` is [`Role::Admin`]: the admin principal has no
/// backing database row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessTokenClaims {
    /// Business identifier of the account; absent for admin tokens.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,

    /// Role of the caller.
    pub role: Role,

    /// Whether the account was active when the token was minted.
    pub is_active: bool,

    /// Issued at (Unix timestamp).
    pub iat: i64,

    /// Expiration time (Unix timestamp).
    pub exp: i64,

    /// Issuer. Optional for backward compatibility with tokens minted
    /// before the claim was introduced.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iss: Option<String>,
}

impl AccessTokenClaims {
    /// Builds claims for the configured admin principal.
    #[must_use]
    pub fn admin(issuer: impl Into<String>, ttl: Duration) -> Self {
        Self::build(None, Role::Admin, true, issuer, ttl)
    }

    /// Builds claims for a regular account.
    #[must_use]
    pub fn for_account(
        subject: impl Into<String>,
        role: Role,
        is_active: bool,
        issuer: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        Self::build(Some(subject.into()), role, is_active, issuer, ttl)
    }

    fn build(
        sub: Option<String>,
        role: Role,
        is_active: bool,
        issuer: impl Into<String>,
        ttl: Duration,
    ) -> Self {
        let now = OffsetDateTime::now_utc().unix_timestamp();
        Self {
            sub,
            role,
            is_active,
            iat: now,
            exp: now + ttl.as_secs() as i64,
            iss: Some(issuer.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_claims_have_no_subject() {
        let claims = AccessTokenClaims::admin("ims-auth-service", Duration::from_secs(60));
        assert!(claims.sub.is_none());
        assert_eq!(claims.role, Role::Admin);
        assert!(claims.is_active);
        assert_eq!(claims.exp - claims.iat, 60);
    }

    #[test]
    fn account_claims_carry_business_id() {
        let claims = AccessTokenClaims::for_account(
            "PAT-000012",
            Role::Patient,
            true,
            "ims-auth-service",
            Duration::from_secs(1800),
        );
        assert_eq!(claims.sub.as_deref(), Some("PAT-000012"));
        assert_eq!(claims.iss.as_deref(), Some("ims-auth-service"));
    }

    #[test]
    fn absent_sub_is_omitted_from_wire_format() {
        let claims = AccessTokenClaims::admin("ims-auth-service", Duration::from_secs(60));
        let value = serde_json::to_value(&claims).unwrap();
        assert!(value.get("sub").is_none());
        assert_eq!(value["role"], "admin");
    }

    #[test]
    fn issuerless_claims_deserialize() {
        let claims: AccessTokenClaims = serde_json::from_value(serde_json::json!({
            "sub": "DOC-000003",
            "role": "doctor",
            "is_active": true,
            "iat": 1_700_000_000,
            "exp": 1_700_001_800
        }))
        .unwrap();
        assert!(claims.iss.is_none());
    }
}
