use std::sync::Arc;

use crate::account::Account;
use crate::password::PasswordHasher;
use crate::ports::CredentialLookup;

/// Checks username/password pairs against the account store.
///
/// The result is an `Option`: an unknown username, an account
/// without a local password, a wrong password and an internal error all look
/// the same to the caller. The specific cause is only logged.
pub struct Authenticator<L>
where
    L: CredentialLookup,
{
    lookup: Arc<L>,
    password_hasher: PasswordHasher,
    decoy_hash: String,
}

impl<L> Authenticator<L>
where
    L: CredentialLookup,
{
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `lookup` - Account store
    /// * `password_hasher` - Hasher; its parameters shape the timing decoy
    pub fn new(lookup: Arc<L>, password_hasher: PasswordHasher) -> Self {
        let decoy_hash = password_hasher.decoy_hash();
        Self {
            lookup,
            password_hasher,
            decoy_hash,
        }
    }

    /// Authenticate a username/password pair.
    ///
    /// # Returns
    /// The account on success, None on any failure
    pub async fn authenticate(&self, username: &str, password: &str) -> Option<Account> {
        let account = match self.lookup.find_by_username(username).await {
            Ok(Some(account)) => account,
            Ok(None) => {
                tracing::warn!(username, "Authentication failed: unknown username");
                self.burn_verification(password).await;
                return None;
            }
            Err(e) => {
                tracing::error!(
                    username,
                    error = %e,
                    "Authentication failed: account lookup error"
                );
                return None;
            }
        };

        let Some(stored_hash) = account.password.as_deref() else {
            tracing::warn!(username, "Authentication failed: account has no local password");
            self.burn_verification(password).await;
            return None;
        };

        match self
            .password_hasher
            .verify_blocking(password, stored_hash)
            .await
        {
            Ok(true) => {
                tracing::debug!(username, "Authentication succeeded");
                Some(account)
            }
            Ok(false) => {
                tracing::warn!(username, "Authentication failed: incorrect password");
                None
            }
            Err(e) => {
                tracing::error!(
                    username,
                    error = %e,
                    "Authentication failed: password verification error"
                );
                None
            }
        }
    }

    /// Spend one verification so a miss costs as much as a wrong password.
    async fn burn_verification(&self, password: &str) {
        if let Err(e) = self
            .password_hasher
            .verify_blocking(password, &self.decoy_hash)
            .await
        {
            tracing::debug!(error = %e, "Decoy verification failed");
        }
    }
}
