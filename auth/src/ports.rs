use async_trait::async_trait;

use crate::account::Account;

/// Account lookup backed by the external account store.
#[async_trait]
pub trait CredentialLookup: Send + Sync + 'static {
    /// Retrieve an account, including its stored password hash, by username.
    ///
    /// # Returns
    /// Optional account (None if no account has this username)
    ///
    /// # Errors
    /// Store failures, opaque to this crate
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<Account>>;
}
