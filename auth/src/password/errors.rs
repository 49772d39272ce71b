use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Incorrect hash format")]
    InvalidHashFormat,

    #[error("Incompatible argon2 version: expected {expected}, found {found}")]
    IncompatibleVersion { expected: u32, found: u32 },

    #[error("Malformed hash parameters: {0}")]
    MalformedParameters(String),

    #[error("Malformed hash encoding: {0}")]
    MalformedEncoding(String),

    #[error("Random source failure: {0}")]
    RandomSource(String),

    #[error("Key derivation failed: {0}")]
    DerivationFailed(String),

    #[error("Password worker failed: {0}")]
    WorkerFailed(String),
}
