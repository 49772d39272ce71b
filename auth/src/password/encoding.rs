use std::fmt;
use std::str::FromStr;

use argon2::Version;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use base64::Engine;

use super::errors::PasswordError;
use super::params::HashParameters;

/// Algorithm identifier carried in the second segment.
pub const ALGORITHM_ID: &str = "argon2id";

/// Argon2 version written into (and required from) every encoded hash.
pub const ARGON2_VERSION: u32 = Version::V0x13 as u32;

/// Decoded form of `$argon2id$v=19$m=<kib>,t=<iterations>,p=<lanes>$<salt>$<key>`.
///
/// Salt and key are stored as unpadded standard base64. Their lengths are not
/// encoded separately; they come from the decoded byte lengths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedHash {
    pub version: u32,
    pub params: HashParameters,
    pub salt: Vec<u8>,
    pub key: Vec<u8>,
}

impl EncodedHash {
    /// Parse an encoded hash string.
    ///
    /// # Errors
    /// * `InvalidHashFormat` - Not exactly six `$` segments, or not an argon2id hash
    /// * `IncompatibleVersion` - Version differs from `ARGON2_VERSION`
    /// * `MalformedParameters` - Version or cost segment cannot be parsed, or a
    ///   cost exceeds the `HashParameters` ceilings
    /// * `MalformedEncoding` - Salt or key is not canonical unpadded base64
    pub fn parse(encoded: &str) -> Result<Self, PasswordError> {
        let segments: Vec<&str> = encoded.split('$').collect();
        let &[prefix, algorithm, version, costs, salt, key] = segments.as_slice() else {
            return Err(PasswordError::InvalidHashFormat);
        };

        if !prefix.is_empty() || algorithm != ALGORITHM_ID {
            return Err(PasswordError::InvalidHashFormat);
        }

        let version: u32 = parse_field(Some(version), "v")?;
        if version != ARGON2_VERSION {
            return Err(PasswordError::IncompatibleVersion {
                expected: ARGON2_VERSION,
                found: version,
            });
        }

        let mut fields = costs.split(',');
        let memory_cost_kib = parse_field(fields.next(), "m")?;
        let iterations = parse_field(fields.next(), "t")?;
        let parallelism = parse_field(fields.next(), "p")?;
        if fields.next().is_some() {
            return Err(PasswordError::MalformedParameters(format!(
                "unexpected cost fields: {costs}"
            )));
        }

        let salt = decode_segment(salt)?;
        let key = decode_segment(key)?;

        let params = HashParameters {
            memory_cost_kib,
            iterations,
            parallelism,
            salt_length: byte_length(&salt)?,
            key_length: byte_length(&key)?,
        };
        params.check_ceilings()?;

        Ok(Self {
            version,
            params,
            salt,
            key,
        })
    }
}

impl FromStr for EncodedHash {
    type Err = PasswordError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for EncodedHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "${}$v={}$m={},t={},p={}${}${}",
            ALGORITHM_ID,
            self.version,
            self.params.memory_cost_kib,
            self.params.iterations,
            self.params.parallelism,
            STANDARD_NO_PAD.encode(&self.salt),
            STANDARD_NO_PAD.encode(&self.key),
        )
    }
}

fn parse_field<T: FromStr>(field: Option<&str>, name: &str) -> Result<T, PasswordError> {
    field
        .and_then(|f| f.strip_prefix(name))
        .and_then(|f| f.strip_prefix('='))
        .and_then(|value| value.parse().ok())
        .ok_or_else(|| {
            PasswordError::MalformedParameters(format!(
                "invalid '{}' field: {}",
                name,
                field.unwrap_or("<missing>")
            ))
        })
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, PasswordError> {
    STANDARD_NO_PAD
        .decode(segment)
        .map_err(|e| PasswordError::MalformedEncoding(e.to_string()))
}

fn byte_length(bytes: &[u8]) -> Result<u32, PasswordError> {
    u32::try_from(bytes.len())
        .map_err(|_| PasswordError::MalformedParameters("segment too long".to_string()))
}
