use argon2::Params;
use serde::Deserialize;
use serde::Serialize;

use super::errors::PasswordError;

/// Argon2id cost parameters.
///
/// Every encoded hash carries the parameters that produced it, so changing
/// these values only affects hashes created afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HashParameters {
    /// Memory cost in KiB
    pub memory_cost_kib: u32,

    /// Number of passes over memory
    pub iterations: u32,

    /// Degree of parallelism (lanes)
    pub parallelism: u8,

    /// Salt length in bytes
    pub salt_length: u32,

    /// Derived key length in bytes
    pub key_length: u32,
}

impl HashParameters {
    /// Minimum salt length accepted by argon2.
    pub const MIN_SALT_LENGTH: u32 = 8;

    /// Largest memory cost accepted from configuration or an encoded hash (1 GiB).
    pub const MAX_MEMORY_COST_KIB: u32 = 1024 * 1024;

    /// Largest number of passes accepted.
    pub const MAX_ITERATIONS: u32 = 64;

    /// Largest salt accepted, in bytes.
    pub const MAX_SALT_LENGTH: u32 = 64;

    /// Largest derived key accepted, in bytes.
    pub const MAX_KEY_LENGTH: u32 = 128;

    pub const DEFAULT: Self = Self {
        memory_cost_kib: 64 * 1024,
        iterations: 6,
        parallelism: 4,
        salt_length: 16,
        key_length: 32,
    };

    /// Check that argon2 accepts these parameters.
    ///
    /// # Errors
    /// * `MalformedParameters` - Costs, salt length, or key length out of range
    pub fn validate(&self) -> Result<(), PasswordError> {
        if self.salt_length < Self::MIN_SALT_LENGTH {
            return Err(PasswordError::MalformedParameters(format!(
                "salt length must be at least {} bytes, got {}",
                Self::MIN_SALT_LENGTH,
                self.salt_length
            )));
        }
        self.check_ceilings()?;
        self.argon2_params().map(|_| ())
    }

    /// Reject costs above the fixed ceilings before any memory is committed.
    ///
    /// Unlike [`HashParameters::validate`] this has no salt floor, so stored
    /// hashes with short salts still parse.
    ///
    /// # Errors
    /// * `MalformedParameters` - A cost or length exceeds its ceiling
    pub fn check_ceilings(&self) -> Result<(), PasswordError> {
        let limits = [
            ("memory cost", self.memory_cost_kib, Self::MAX_MEMORY_COST_KIB),
            ("iterations", self.iterations, Self::MAX_ITERATIONS),
            ("salt length", self.salt_length, Self::MAX_SALT_LENGTH),
            ("key length", self.key_length, Self::MAX_KEY_LENGTH),
        ];

        for (name, value, max) in limits {
            if value > max {
                return Err(PasswordError::MalformedParameters(format!(
                    "{name} {value} exceeds maximum {max}"
                )));
            }
        }
        Ok(())
    }

    pub(crate) fn argon2_params(&self) -> Result<Params, PasswordError> {
        Params::new(
            self.memory_cost_kib,
            self.iterations,
            u32::from(self.parallelism),
            Some(self.key_length as usize),
        )
        .map_err(|e| PasswordError::MalformedParameters(e.to_string()))
    }
}

impl Default for HashParameters {
    fn default() -> Self {
        Self::DEFAULT
    }
}
