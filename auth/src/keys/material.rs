use std::fmt;
use std::sync::Arc;

use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;

use super::errors::KeyError;

/// Minimum bit length accepted by [`generate_key`].
pub const MIN_GENERATED_KEY_BITS: u32 = 256;

/// Exact signing key size for HS512 tokens, in bytes.
pub const SIGNING_KEY_LEN: usize = 64;

/// Generate random key material encoded as lowercase hex.
///
/// This is a general-purpose generator; only 512-bit keys are usable for
/// token signing.
///
/// # Arguments
/// * `bit_length` - Key size in bits, at least 256 and divisible by 8
///
/// # Errors
/// * `InvalidKeyLength` - Bit length too small or not byte aligned
/// * `RandomSource` - The OS random source failed
pub fn generate_key(bit_length: u32) -> Result<String, KeyError> {
    if bit_length < MIN_GENERATED_KEY_BITS || bit_length % 8 != 0 {
        return Err(KeyError::InvalidKeyLength(bit_length));
    }

    let bytes = random_bytes((bit_length / 8) as usize)?;
    Ok(hex::encode(bytes))
}

/// Reject any signing key that is not exactly 512 bits.
pub fn validate_signing_key(key: &[u8]) -> Result<(), KeyError> {
    if key.len() != SIGNING_KEY_LEN {
        return Err(KeyError::InvalidSigningKeyLength {
            bits: key.len() * 8,
        });
    }
    Ok(())
}

fn random_bytes(len: usize) -> Result<Vec<u8>, KeyError> {
    let mut bytes = vec![0u8; len];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| KeyError::RandomSource(e.to_string()))?;
    Ok(bytes)
}

/// Validated 512-bit HMAC signing key.
///
/// Loaded once at startup and shared read-only. `Debug` never prints the bytes.
#[derive(Clone, PartialEq, Eq)]
pub struct SigningKey(Arc<[u8]>);

impl SigningKey {
    /// Wrap raw key bytes.
    ///
    /// # Errors
    /// * `InvalidSigningKeyLength` - Key is not exactly 64 bytes
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, KeyError> {
        validate_signing_key(bytes)?;
        Ok(Self(Arc::from(bytes)))
    }

    /// Decode a hex encoded key, as supplied through configuration.
    ///
    /// # Errors
    /// * `InvalidHex` - Not valid hexadecimal
    /// * `InvalidSigningKeyLength` - Decoded key is not exactly 64 bytes
    pub fn from_hex(encoded: &str) -> Result<Self, KeyError> {
        let bytes = hex::decode(encoded.trim()).map_err(|e| KeyError::InvalidHex(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Generate a fresh random signing key.
    pub fn generate() -> Result<Self, KeyError> {
        let bytes = random_bytes(SIGNING_KEY_LEN)?;
        Self::from_bytes(&bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Handle to the shared key buffer, without copying it.
    pub(crate) fn shared_bytes(&self) -> Arc<[u8]> {
        Arc::clone(&self.0)
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SigningKey(<{} bits redacted>)", self.0.len() * 8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_key_lengths() {
        assert_eq!(generate_key(255), Err(KeyError::InvalidKeyLength(255)));
        assert_eq!(generate_key(257), Err(KeyError::InvalidKeyLength(257)));
        assert_eq!(generate_key(0), Err(KeyError::InvalidKeyLength(0)));

        let key = generate_key(256).expect("Failed to generate key");
        assert_eq!(key.len(), 64);
        assert!(key
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));

        let key = generate_key(512).expect("Failed to generate key");
        assert_eq!(hex::decode(key).expect("Invalid hex").len(), 64);
    }

    #[test]
    fn test_generated_keys_differ() {
        let first = generate_key(256).expect("Failed to generate key");
        let second = generate_key(256).expect("Failed to generate key");
        assert_ne!(first, second);
    }

    #[test]
    fn test_validate_signing_key() {
        assert!(validate_signing_key(&[0u8; 64]).is_ok());
        assert_eq!(
            validate_signing_key(&[0u8; 32]),
            Err(KeyError::InvalidSigningKeyLength { bits: 256 })
        );
        assert_eq!(
            validate_signing_key(&[0u8; 65]),
            Err(KeyError::InvalidSigningKeyLength { bits: 520 })
        );
        assert!(validate_signing_key(&[]).is_err());
    }

    #[test]
    fn test_signing_key_from_hex() {
        let encoded = generate_key(512).expect("Failed to generate key");
        let key = SigningKey::from_hex(&format!("{encoded}\n")).expect("Failed to decode key");
        assert_eq!(hex::encode(key.as_bytes()), encoded);

        let short = generate_key(256).expect("Failed to generate key");
        assert_eq!(
            SigningKey::from_hex(&short),
            Err(KeyError::InvalidSigningKeyLength { bits: 256 })
        );
        assert!(matches!(
            SigningKey::from_hex("not-hex"),
            Err(KeyError::InvalidHex(_))
        ));
    }

    #[test]
    fn test_signing_key_debug_is_redacted() {
        let key = SigningKey::from_bytes(&[0x7f; 64]).expect("Failed to build key");
        let debug = format!("{key:?}");
        assert_eq!(debug, "SigningKey(<512 bits redacted>)");
        assert!(!debug.contains("7f"));
    }

    #[test]
    fn test_generate_signing_key() {
        let key = SigningKey::generate().expect("Failed to generate key");
        assert_eq!(key.as_bytes().len(), SIGNING_KEY_LEN);
    }
}
