use std::sync::Arc;

use jsonwebtoken::encode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use serde::Serialize;

use super::claims::TokenClaims;
use super::errors::TokenError;
use crate::keys::validate_signing_key;
use crate::keys::SigningKey;

/// Signs bearer tokens with HS512.
pub struct TokenIssuer {
    secret: Arc<[u8]>,
}

impl TokenIssuer {
    /// Create a new issuer from raw key bytes.
    ///
    /// The key is checked on every signing call, not here.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            secret: Arc::from(secret),
        }
    }

    /// Create a issuer sharing an already validated key.
    pub fn from_key(key: &SigningKey) -> Self {
        Self {
            secret: key.shared_bytes(),
        }
    }

    /// Issue a token embedding an account snapshot.
    ///
    /// # Arguments
    /// * `account` - Snapshot serialized into the `account` claim
    /// * `subject` - Value of the `sub` claim (the username)
    ///
    /// # Returns
    /// Compact JWT valid for `TOKEN_LIFETIME_HOURS`
    ///
    /// # Errors
    /// * `Key` - Signing key is not 512 bits
    /// * `EncodingFailed` - Serialization or signing failed
    pub fn issue<T: Serialize>(&self, account: &T, subject: &str) -> Result<String, TokenError> {
        self.sign(&TokenClaims::new(account, subject))
    }

    /// Sign an explicit claim set.
    pub fn sign<A: Serialize>(&self, claims: &TokenClaims<A>) -> Result<String, TokenError> {
        validate_signing_key(&self.secret)?;

        let header = Header::new(Algorithm::HS512);
        encode(&header, claims, &EncodingKey::from_secret(&self.secret))
            .map_err(|e| TokenError::EncodingFailed(e.to_string()))
    }
}
