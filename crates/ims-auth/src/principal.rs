//! The per-request authorization context.

use crate::claims::AccessTokenClaims;
use crate::error::AuthError;
use crate::role::Role;

/// The resolved identity of one request.
///
/// Either the `Admin` sentinel (full access, no business identifier) or a
/// regular account resolved purely from token claims. Derived fresh for
/// every request and never cached or shared across requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Principal {
    /// The statically configured admin; has no backing database row.
    Admin,
    /// A regular account identified by its business identifier.
    Regular {
        /// Business identifier, e.g. `PAT-000012`.
        subject: String,
        /// Role claim of the account.
        role: Role,
        /// Whether the account was active when the token was minted.
        is_active: bool,
    },
}

impl Principal {
    /// Derives a principal from validated claims.
    ///
    /// The validator already guarantees `sub` is present for non-admin
    /// roles; an admin claim with a subject is treated as a regular account
    /// holding the admin role.
    pub fn from_claims(claims: &AccessTokenClaims) -> Result<Self, AuthError> {
        match &claims.sub {
            None if claims.role == Role::Admin => Ok(Self::Admin),
            None => Err(AuthError::InvalidToken),
            Some(subject) => Ok(Self::Regular {
                subject: subject.clone(),
                role: claims.role,
                is_active: claims.is_active,
            }),
        }
    }

    /// Business identifier of the caller; `None` for the admin sentinel.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        match self {
            Self::Admin => None,
            Self::Regular { subject, .. } => Some(subject),
        }
    }

    /// Role of the caller.
    #[must_use]
    pub fn role(&self) -> Role {
        match self {
            Self::Admin => Role::Admin,
            Self::Regular { role, .. } => *role,
        }
    }

    /// Whether the caller's account is active. The admin sentinel is
    /// always active.
    #[must_use]
    pub fn is_active(&self) -> bool {
        match self {
            Self::Admin => true,
            Self::Regular { is_active, .. } => *is_active,
        }
    }

    /// Returns `true` for the admin sentinel.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }

    /// Rejects deactivated accounts with `Forbidden(inactive)`.
    pub fn require_active(&self) -> Result<&Self, AuthError> {
        if self.is_active() {
            Ok(self)
        } else {
            Err(AuthError::InactiveAccount)
        }
    }

    /// Rejects callers whose role is not in the allowed set.
    pub fn require_role(&self, allowed: &[Role]) -> Result<&Self, AuthError> {
        if allowed.contains(&self.role()) {
            Ok(self)
        } else {
            tracing::debug!(role = %self.role(), "Role not in allowed set");
            Err(AuthError::Forbidden)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    fn patient() -> Principal {
        Principal::Regular {
            subject: "PAT-000012".to_string(),
            role: Role::Patient,
            is_active: true,
        }
    }

    #[test]
    fn admin_claims_derive_sentinel() {
        let claims = AccessTokenClaims::admin("ims-auth-service", Duration::from_secs(60));
        let principal = Principal::from_claims(&claims).unwrap();
        assert_eq!(principal, Principal::Admin);
        assert!(principal.is_admin());
        assert!(principal.subject().is_none());
        assert!(principal.is_active());
    }

    #[test]
    fn account_claims_derive_regular() {
        let claims = AccessTokenClaims::for_account(
            "PAT-000012",
            Role::Patient,
            false,
            "ims-auth-service",
            Duration::from_secs(60),
        );
        let principal = Principal::from_claims(&claims).unwrap();
        assert_eq!(principal.subject(), Some("PAT-000012"));
        assert_eq!(principal.role(), Role::Patient);
        assert!(!principal.is_active());
    }

    #[test]
    fn admin_passes_only_admin_role_set() {
        let admin = Principal::Admin;
        assert!(admin.require_role(&[Role::Admin]).is_ok());
        assert!(admin.require_role(&[Role::Admin, Role::Doctor]).is_ok());
        assert!(admin.require_role(&[Role::Doctor]).is_err());
        assert!(admin.require_role(&[Role::Patient, Role::Cashier]).is_err());
    }

    #[test]
    fn role_gate_rejects_disallowed_role() {
        let p = patient();
        assert!(p.require_role(&[Role::Patient, Role::Doctor]).is_ok());
        assert!(matches!(
            p.require_role(&[Role::Doctor]),
            Err(AuthError::Forbidden)
        ));
    }

    #[test]
    fn inactive_account_fails_active_check() {
        let inactive = Principal::Regular {
            subject: "USR-000009".to_string(),
            role: Role::Cashier,
            is_active: false,
        };
        assert!(matches!(
            inactive.require_active(),
            Err(AuthError::InactiveAccount)
        ));
        assert!(patient().require_active().is_ok());
    }
}
