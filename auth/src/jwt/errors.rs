use jsonwebtoken::errors::Error as JsonWebTokenError;
use jsonwebtoken::errors::ErrorKind;
use thiserror::Error;

use crate::keys::KeyError;

/// Error type for token operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("Signing key error: {0}")]
    Key(#[from] KeyError),

    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Unsupported token algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is expired")]
    TokenExpired,

    #[error("Token issuer is invalid")]
    InvalidIssuer,

    #[error("Token audience is invalid")]
    InvalidAudience,

    #[error("Token is malformed: {0}")]
    MalformedToken(String),

    #[error("Account claim is malformed: {0}")]
    MalformedClaim(String),
}

impl TokenError {
    /// Map a decoding failure from `jsonwebtoken` onto a terminal outcome.
    pub(crate) fn from_decode(err: JsonWebTokenError) -> Self {
        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::TokenExpired,
            ErrorKind::InvalidSignature => TokenError::InvalidSignature,
            ErrorKind::InvalidAlgorithm => TokenError::UnsupportedAlgorithm(err.to_string()),
            ErrorKind::InvalidIssuer => TokenError::InvalidIssuer,
            ErrorKind::MissingRequiredClaim(claim) if claim == "iss" => TokenError::InvalidIssuer,
            ErrorKind::InvalidAudience => TokenError::InvalidAudience,
            _ => TokenError::MalformedToken(err.to_string()),
        }
    }
}
