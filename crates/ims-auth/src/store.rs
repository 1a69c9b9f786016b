//! Account lookup abstraction.
//!
//! The authorization core never talks to a database directly; services
//! plug their persistence behind [`AccountStore`]. The in-memory
//! implementation backs tests and local development.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::error::AuthError;
use crate::role::Role;

/// A stored account as seen by the authorization core.
#[derive(Debug, Clone)]
pub struct AccountRecord {
    /// Business identifier, e.g. `PAT-000012`.
    pub user_id: String,
    /// Login name.
    pub username: String,
    /// PHC password hash string.
    pub password_hash: String,
    /// Display name.
    pub name: String,
    /// Contact email, if any.
    pub email: Option<String>,
    /// Assigned role.
    pub role: Role,
    /// Whether the account may act.
    pub is_active: bool,
}

/// Read-only account lookup used by the token issuer and profile endpoints.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Finds an account by login name.
    async fn find_by_username(&self, username: &str) -> Result<Option<AccountRecord>, AuthError>;

    /// Finds an account by business identifier.
    async fn find_by_id(&self, user_id: &str) -> Result<Option<AccountRecord>, AuthError>;
}

/// In-memory account store for tests and local development.
#[derive(Default)]
pub struct MemoryAccountStore {
    accounts: RwLock<HashMap<String, AccountRecord>>,
}

impl MemoryAccountStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an account, keyed by username.
    pub async fn insert(&self, account: AccountRecord) {
        self.accounts
            .write()
            .await
            .insert(account.username.clone(), account);
    }
}

#[async_trait]
impl AccountStore for MemoryAccountStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<AccountRecord>, AuthError> {
        Ok(self.accounts.read().await.get(username).cloned())
    }

    async fn find_by_id(&self, user_id: &str) -> Result<Option<AccountRecord>, AuthError> {
        Ok(self
            .accounts
            .read()
            .await
            .values()
            .find(|a| a.user_id == user_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> AccountRecord {
        AccountRecord {
            user_id: "PAT-000012".to_string(),
            username: "alice".to_string(),
            password_hash: "$argon2id$placeholder".to_string(),
            name: "Alice".to_string(),
            email: Some("alice@example.com".to_string()),
            role: Role::Patient,
            is_active: true,
        }
    }

    #[tokio::test]
    async fn lookup_by_username_and_id() {
        let store = MemoryAccountStore::new();
        store.insert(record()).await;

        let by_name = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_name.user_id, "PAT-000012");

        let by_id = store.find_by_id("PAT-000012").await.unwrap().unwrap();
        assert_eq!(by_id.username, "alice");

        assert!(store.find_by_username("bob").await.unwrap().is_none());
        assert!(store.find_by_id("PAT-999999").await.unwrap().is_none());
    }
}
