use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::errors::TokenError;

/// Fixed issuer, also the only accepted audience.
pub const ISSUER: &str = "SwitchCraft";

/// Token lifetime from issuance.
pub const TOKEN_LIFETIME_HOURS: i64 = 24;

/// Name of the custom claim carrying the account snapshot.
pub const ACCOUNT_CLAIM: &str = "account";

/// Claim set carried by every token.
///
/// `A` is the embedded account snapshot; issuance borrows it, validation reads
/// it back as a generic JSON value first.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokenClaims<A> {
    pub iss: String,
    pub aud: Vec<String>,
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
    pub account: A,
}

impl<A> TokenClaims<A> {
    /// Claims issued now, expiring after `TOKEN_LIFETIME_HOURS`.
    pub fn new(account: A, subject: impl ToString) -> Self {
        Self::issued_at(account, subject, Utc::now())
    }

    /// Claims issued at a given instant.
    pub fn issued_at(account: A, subject: impl ToString, issued_at: DateTime<Utc>) -> Self {
        let expiration = issued_at + Duration::hours(TOKEN_LIFETIME_HOURS);

        Self {
            iss: ISSUER.to_string(),
            aud: vec![ISSUER.to_string()],
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expiration.timestamp(),
            account,
        }
    }

    /// Set issuer.
    pub fn with_issuer(mut self, iss: impl ToString) -> Self {
        self.iss = iss.to_string();
        self
    }

    /// Set audience.
    pub fn with_audience(mut self, aud: Vec<String>) -> Self {
        self.aud = aud;
        self
    }

    /// Set expiration (Unix timestamp).
    pub fn with_expiration(mut self, exp: i64) -> Self {
        self.exp = exp;
        self
    }
}

/// Convert the generic `account` claim into a typed snapshot.
///
/// # Errors
/// * `MalformedClaim` - Claim missing, not an object, or of the wrong shape
pub fn decode_account<T: DeserializeOwned>(claim: Option<Value>) -> Result<T, TokenError> {
    match claim {
        Some(Value::Object(fields)) => serde_json::from_value(Value::Object(fields))
            .map_err(|e| TokenError::MalformedClaim(e.to_string())),
        Some(other) => Err(TokenError::MalformedClaim(format!(
            "expected an object, found {other}"
        ))),
        None => Err(TokenError::MalformedClaim(format!(
            "missing '{ACCOUNT_CLAIM}' claim"
        ))),
    }
}
