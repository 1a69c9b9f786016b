//! Token issuance from verified credentials.

use std::sync::Arc;

use crate::error::AuthError;
use crate::password::verify_password;
use crate::principal::Principal;
use crate::store::{AccountRecord, AccountStore};
use crate::token::TokenService;

/// The statically configured admin credential pair.
///
/// Checked before any store lookup; the admin principal exists only in
/// configuration.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    /// Admin login name.
    pub username: String,
    /// Admin password.
    pub password: String,
}

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct IssuedToken {
    /// The signed, time-bounded access token.
    pub access_token: String,
    /// The principal the token represents.
    pub principal: Principal,
    /// The backing account record; `None` for the admin principal.
    pub account: Option<AccountRecord>,
}

/// Exchanges credentials for signed access tokens.
///
/// A pure function of stored credentials: no session state is kept and
/// nothing is written anywhere.
pub struct TokenIssuer {
    tokens: Arc<TokenService>,
    store: Arc<dyn AccountStore>,
    admin: AdminCredentials,
}

impl TokenIssuer {
    /// Creates a token issuer.
    #[must_use]
    pub fn new(
        tokens: Arc<TokenService>,
        store: Arc<dyn AccountStore>,
        admin: AdminCredentials,
    ) -> Self {
        Self {
            tokens,
            store,
            admin,
        }
    }

    /// Verifies credentials and mints a token.
    ///
    /// Unknown usernames and wrong passwords both fail with the same
    /// [`AuthError::InvalidCredentials`].
    pub async fn issue(&self, username: &str, password: &str) -> Result<IssuedToken, AuthError> {
        if username == self.admin.username && password == self.admin.password {
            let access_token = self.tokens.mint_admin()?;
            tracing::info!("Admin login");
            return Ok(IssuedToken {
                access_token,
                principal: Principal::Admin,
                account: None,
            });
        }

        let account = self
            .store
            .find_by_username(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !verify_password(password, &account.password_hash) {
            return Err(AuthError::InvalidCredentials);
        }

        let access_token =
            self.tokens
                .mint_for_account(&account.user_id, account.role, account.is_active)?;
        tracing::info!(user_id = %account.user_id, role = %account.role, "User login");

        Ok(IssuedToken {
            access_token,
            principal: Principal::Regular {
                subject: account.user_id.clone(),
                role: account.role,
                is_active: account.is_active,
            },
            account: Some(account),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use crate::password::hash_password;
    use crate::role::Role;
    use crate::store::MemoryAccountStore;

    use super::*;

    async fn issuer_with_patient() -> TokenIssuer {
        let tokens = Arc::new(TokenService::new(
            "test-secret",
            "ims-auth-service",
            Duration::from_secs(1800),
        ));
        let store = MemoryAccountStore::new();
        store
            .insert(AccountRecord {
                user_id: "PAT-000012".to_string(),
                username: "alice".to_string(),
                password_hash: hash_password("correct horse").unwrap(),
                name: "Alice".to_string(),
                email: None,
                role: Role::Patient,
                is_active: true,
            })
            .await;
        TokenIssuer::new(
            tokens,
            Arc::new(store),
            AdminCredentials {
                username: "admin".to_string(),
                password: "admin#123".to_string(),
            },
        )
    }

    #[tokio::test]
    async fn admin_pair_issues_admin_token() {
        let issuer = issuer_with_patient().await;
        let issued = issuer.issue("admin", "admin#123").await.unwrap();
        assert_eq!(issued.principal, Principal::Admin);
        assert!(issued.account.is_none());
    }

    #[tokio::test]
    async fn valid_credentials_issue_account_token() {
        let issuer = issuer_with_patient().await;
        let issued = issuer.issue("alice", "correct horse").await.unwrap();
        assert_eq!(issued.principal.subject(), Some("PAT-000012"));
        assert_eq!(issued.principal.role(), Role::Patient);
        assert_eq!(issued.account.unwrap().username, "alice");
    }

    #[tokio::test]
    async fn unknown_user_and_wrong_password_fail_identically() {
        let issuer = issuer_with_patient().await;

        let unknown = issuer.issue("mallory", "whatever").await.unwrap_err();
        let wrong = issuer.issue("alice", "wrong password").await.unwrap_err();

        assert!(matches!(unknown, AuthError::InvalidCredentials));
        assert!(matches!(wrong, AuthError::InvalidCredentials));
        assert_eq!(unknown.to_string(), wrong.to_string());
    }

    #[tokio::test]
    async fn admin_password_is_not_valid_for_accounts() {
        let issuer = issuer_with_patient().await;
        assert!(issuer.issue("alice", "admin#123").await.is_err());
    }
}
