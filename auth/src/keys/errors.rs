use thiserror::Error;

/// Error type for key material operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("Invalid key length: {0} bits (must be >= 256 and divisible by 8)")]
    InvalidKeyLength(u32),

    #[error("Invalid signing key length: expected 512 bits, got {bits}")]
    InvalidSigningKeyLength { bits: usize },

    #[error("Invalid hex key encoding: {0}")]
    InvalidHex(String),

    #[error("Random source failure: {0}")]
    RandomSource(String),
}
