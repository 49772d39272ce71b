use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::rand_core::RngCore;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Version;
use subtle::ConstantTimeEq;

use super::encoding::EncodedHash;
use super::encoding::ARGON2_VERSION;
use super::errors::PasswordError;
use super::params::HashParameters;

/// Argon2id password hasher.
///
/// Hashing uses the parameters this hasher was built with. Verification uses
/// the parameters embedded in the hash being checked.
///
/// Both operations are expensive. On an async runtime prefer
/// [`PasswordHasher::hash_blocking`] and [`PasswordHasher::verify_blocking`].
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    params: HashParameters,
}

impl PasswordHasher {
    /// Create a hasher with the default parameters.
    pub fn new() -> Self {
        Self {
            params: HashParameters::DEFAULT,
        }
    }

    /// Create a hasher with custom parameters.
    ///
    /// # Errors
    /// * `MalformedParameters` - argon2 does not accept the parameters
    pub fn with_params(params: HashParameters) -> Result<Self, PasswordError> {
        params.validate()?;
        Ok(Self { params })
    }

    pub fn params(&self) -> &HashParameters {
        &self.params
    }

    /// Hash a plaintext password with a fresh random salt.
    ///
    /// # Returns
    /// Encoded hash, `$argon2id$v=19$m=..,t=..,p=..$<salt>$<key>`
    ///
    /// # Errors
    /// * `RandomSource` - The OS random source failed
    /// * `DerivationFailed` - argon2 rejected the derivation
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        let mut salt = vec![0u8; self.params.salt_length as usize];
        OsRng
            .try_fill_bytes(&mut salt)
            .map_err(|e| PasswordError::RandomSource(e.to_string()))?;

        let key = derive_key(password, &salt, &self.params)?;

        let encoded = EncodedHash {
            version: ARGON2_VERSION,
            params: self.params,
            salt,
            key,
        };
        Ok(encoded.to_string())
    }

    /// Verify a plaintext password against an encoded hash.
    ///
    /// The derived key is compared in constant time.
    ///
    /// # Returns
    /// True if the password matches, false otherwise
    ///
    /// # Errors
    /// * Any `EncodedHash::parse` error for a malformed hash
    /// * `MalformedParameters` / `DerivationFailed` - Embedded parameters are unusable
    pub fn verify(&self, password: &str, encoded: &str) -> Result<bool, PasswordError> {
        let decoded = EncodedHash::parse(encoded)?;
        let derived = derive_key(password, &decoded.salt, &decoded.params)?;

        Ok(derived.as_slice().ct_eq(decoded.key.as_slice()).into())
    }

    /// Hash on the blocking thread pool.
    pub async fn hash_blocking(&self, password: &str) -> Result<String, PasswordError> {
        let hasher = self.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| PasswordError::WorkerFailed(e.to_string()))?
    }

    /// Verify on the blocking thread pool.
    pub async fn verify_blocking(
        &self,
        password: &str,
        encoded: &str,
    ) -> Result<bool, PasswordError> {
        let hasher = self.clone();
        let password = password.to_owned();
        let encoded = encoded.to_owned();

        tokio::task::spawn_blocking(move || hasher.verify(&password, &encoded))
            .await
            .map_err(|e| PasswordError::WorkerFailed(e.to_string()))?
    }

    /// Encoded hash with this hasher's parameters and all-zero salt and key.
    ///
    /// Verifying against it costs the same as a real verification and never
    /// matches in practice.
    pub(crate) fn decoy_hash(&self) -> String {
        EncodedHash {
            version: ARGON2_VERSION,
            params: self.params,
            salt: vec![0u8; self.params.salt_length as usize],
            key: vec![0u8; self.params.key_length as usize],
        }
        .to_string()
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new()
    }
}

fn derive_key(
    password: &str,
    salt: &[u8],
    params: &HashParameters,
) -> Result<Vec<u8>, PasswordError> {
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params.argon2_params()?);

    let mut key = vec![0u8; params.key_length as usize];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .map_err(|e| PasswordError::DerivationFailed(e.to_string()))?;

    Ok(key)
}
