use std::sync::Arc;

use crate::account::Account;
use crate::authenticator::Authenticator;
use crate::config::Config;
use crate::jwt::TokenError;
use crate::jwt::TokenIssuer;
use crate::jwt::TokenValidator;
use crate::keys::generate_key;
use crate::keys::KeyError;
use crate::keys::SigningKey;
use crate::password::PasswordError;
use crate::password::PasswordHasher;
use crate::ports::CredentialLookup;

/// Startup and operation errors at the service boundary.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Key error: {0}")]
    Key(#[from] KeyError),

    #[error("Password error: {0}")]
    Password(#[from] PasswordError),

    #[error("Token error: {0}")]
    Token(#[from] TokenError),
}

/// Credential and session-token operations used by the CLI and REST layers.
///
/// Holds no mutable state; share it behind an `Arc`.
pub struct AuthService<L>
where
    L: CredentialLookup,
{
    password_hasher: PasswordHasher,
    authenticator: Authenticator<L>,
    token_issuer: TokenIssuer,
    token_validator: TokenValidator,
}

impl<L> AuthService<L>
where
    L: CredentialLookup,
{
    /// Create a new auth service with injected dependencies.
    ///
    /// # Arguments
    /// * `lookup` - Account store used by `authenticate`
    /// * `signing_key` - Validated HS512 key
    /// * `password_hasher` - Hasher for new passwords
    pub fn new(lookup: Arc<L>, signing_key: &SigningKey, password_hasher: PasswordHasher) -> Self {
        Self {
            authenticator: Authenticator::new(lookup, password_hasher.clone()),
            password_hasher,
            token_issuer: TokenIssuer::from_key(signing_key),
            token_validator: TokenValidator::from_key(signing_key),
        }
    }

    /// Build from loaded configuration, rejecting a bad signing key or bad
    /// hash parameters up front.
    pub fn from_config(config: &Config, lookup: Arc<L>) -> Result<Self, AuthError> {
        let signing_key = config.signing_key()?;
        let password_hasher = PasswordHasher::with_params(config.password)?;

        tracing::info!(
            memory_cost_kib = config.password.memory_cost_kib,
            iterations = config.password.iterations,
            parallelism = config.password.parallelism,
            "Auth service configured"
        );

        Ok(Self::new(lookup, &signing_key, password_hasher))
    }

    /// Load configuration from the environment and build the service.
    pub fn load(lookup: Arc<L>) -> Result<Self, AuthError> {
        let config = Config::load()?;
        Self::from_config(&config, lookup)
    }

    pub async fn hash_password(&self, password: &str) -> Result<String, PasswordError> {
        self.password_hasher.hash_blocking(password).await
    }

    pub async fn verify_password(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        self.password_hasher.verify_blocking(password, hash).await
    }

    /// Generate hex key material; see [`generate_key`].
    pub fn generate_signing_key(&self, bit_length: u32) -> Result<String, KeyError> {
        generate_key(bit_length)
    }

    /// Check a username/password pair; None on any failure.
    pub async fn authenticate(&self, username: &str, password: &str) -> Option<Account> {
        self.authenticator.authenticate(username, password).await
    }

    /// Issue a token for an account, with its username as subject.
    pub fn issue_token(&self, account: &Account) -> Result<String, TokenError> {
        self.token_issuer.issue(account, &account.username)
    }

    /// Validate a token and return the account snapshot taken at issuance.
    pub fn validate_token(&self, token: &str) -> Result<Account, TokenError> {
        self.token_validator.validate(token)
    }
}
