use std::sync::Arc;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use jsonwebtoken::decode;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::Validation;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Map;
use serde_json::Value;

use super::claims::decode_account;
use super::claims::ACCOUNT_CLAIM;
use super::claims::ISSUER;
use super::errors::TokenError;
use crate::keys::validate_signing_key;
use crate::keys::SigningKey;

const ACCEPTED_ALGORITHM: &str = "HS512";

#[derive(Deserialize)]
struct RawHeader {
    alg: String,
}

/// Verifies bearer tokens and reconstructs the embedded account snapshot.
///
/// Only HS512 is accepted; `exp`, `iss`, `aud` and `sub` are required and
/// no clock leeway is granted.
pub struct TokenValidator {
    secret: Arc<[u8]>,
}

impl TokenValidator {
    /// Create a new validator from raw key bytes.
    ///
    /// The key is checked on every validation call, not here.
    pub fn new(secret: &[u8]) -> Self {
        Self {
            secret: Arc::from(secret),
        }
    }

    /// Create a validator sharing an already validated key.
    pub fn from_key(key: &SigningKey) -> Self {
        Self {
            secret: key.shared_bytes(),
        }
    }

    /// Validate a token and return the account snapshot it carries.
    ///
    /// # Errors
    /// * `Key` - Signing key is not 512 bits
    /// * `UnsupportedAlgorithm` - Header names anything but HS512 (including `none`)
    /// * `InvalidSignature` - Signature does not match the key
    /// * `TokenExpired` - `exp` is in the past
    /// * `InvalidIssuer` / `InvalidAudience` - Issuer or audience is not `ISSUER`
    /// * `MalformedToken` - Token cannot be parsed or misses required claims
    /// * `MalformedClaim` - `account` claim does not match `T`
    pub fn validate<T: DeserializeOwned>(&self, token: &str) -> Result<T, TokenError> {
        validate_signing_key(&self.secret)?;

        let result = self.verified_claims(token).and_then(|mut claims| {
            if claims.get("iss").and_then(Value::as_str) != Some(ISSUER) {
                return Err(TokenError::InvalidIssuer);
            }
            decode_account(claims.remove(ACCOUNT_CLAIM))
        });

        if let Err(e) = &result {
            tracing::debug!(error = %e, "Token rejected");
        }
        result
    }

    fn verified_claims(&self, token: &str) -> Result<Map<String, Value>, TokenError> {
        ensure_accepted_algorithm(token)?;

        let mut validation = Validation::new(Algorithm::HS512);
        validation.leeway = 0;
        validation.set_audience(&[ISSUER]);
        validation.set_required_spec_claims(&["exp", "iss", "aud", "sub"]);

        let token_data = decode::<Map<String, Value>>(
            token,
            &DecodingKey::from_secret(&self.secret),
            &validation,
        )
        .map_err(TokenError::from_decode)?;

        Ok(token_data.claims)
    }
}

/// Inspect the raw header so that algorithms `jsonwebtoken` cannot represent,
/// such as `none`, are still reported as unsupported.
fn ensure_accepted_algorithm(token: &str) -> Result<(), TokenError> {
    let encoded = token
        .split('.')
        .next()
        .filter(|segment| !segment.is_empty())
        .ok_or_else(|| TokenError::MalformedToken("missing header".to_string()))?;

    let bytes = URL_SAFE_NO_PAD
        .decode(encoded)
        .map_err(|e| TokenError::MalformedToken(format!("header encoding: {e}")))?;
    let header: RawHeader = serde_json::from_slice(&bytes)
        .map_err(|e| TokenError::MalformedToken(format!("header: {e}")))?;

    if header.alg != ACCEPTED_ALGORITHM {
        return Err(TokenError::UnsupportedAlgorithm(header.alg));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde::Serialize;

    use super::*;
    use crate::jwt::claims::TokenClaims;
    use crate::jwt::issuer::TokenIssuer;

    #[derive(Debug, Serialize, Deserialize, PartialEq)]
    struct Snapshot {
        username: String,
    }

    fn alice() -> Snapshot {
        Snapshot {
            username: "alice".to_string(),
        }
    }

    #[test]
    fn test_issue_and_validate() {
        let key = [0u8; 64];
        let token = TokenIssuer::new(&key)
            .issue(&alice(), "alice")
            .expect("Failed to issue token");

        let decoded: Snapshot = TokenValidator::new(&key)
            .validate(&token)
            .expect("Failed to validate token");
        assert_eq!(decoded, alice());
    }

    #[test]
    fn test_from_key_shares_key_buffer() {
        let key = SigningKey::generate().expect("Failed to generate key");
        let validator = TokenValidator::from_key(&key);
        assert!(Arc::ptr_eq(&validator.secret, &key.shared_bytes()));

        let token = TokenIssuer::from_key(&key)
            .issue(&alice(), "alice")
            .expect("Failed to issue token");
        let decoded: Snapshot = validator.validate(&token).expect("Failed to validate token");
        assert_eq!(decoded, alice());
    }

    #[test]
    fn test_validate_with_wrong_key() {
        let token = TokenIssuer::new(&[0u8; 64])
            .issue(&alice(), "alice")
            .expect("Failed to issue token");

        let result = TokenValidator::new(&[1u8; 64]).validate::<Snapshot>(&token);
        assert_eq!(result, Err(TokenError::InvalidSignature));
    }

    #[test]
    fn test_validate_invalid_token() {
        let validator = TokenValidator::new(&[0u8; 64]);

        assert!(matches!(
            validator.validate::<Snapshot>("invalid.token.here"),
            Err(TokenError::MalformedToken(_))
        ));
        assert!(matches!(
            validator.validate::<Snapshot>(""),
            Err(TokenError::MalformedToken(_))
        ));
    }

    #[test]
    fn test_validate_rejects_short_key_before_parsing() {
        let result = TokenValidator::new(&[0u8; 63]).validate::<Snapshot>("invalid.token.here");
        assert!(matches!(result, Err(TokenError::Key(_))));
    }

    #[test]
    fn test_validate_spoofed_issuer() {
        let key = [0u8; 64];
        let claims = TokenClaims::new(alice(), "alice").with_issuer("Mallory");
        let token = TokenIssuer::new(&key).sign(&claims).expect("Failed to sign");

        let result = TokenValidator::new(&key).validate::<Snapshot>(&token);
        assert_eq!(result, Err(TokenError::InvalidIssuer));
    }

    #[test]
    fn test_header_algorithm_check() {
        let none = format!("{}.e30.", URL_SAFE_NO_PAD.encode(br#"{"alg":"none","typ":"JWT"}"#));
        assert_eq!(
            ensure_accepted_algorithm(&none),
            Err(TokenError::UnsupportedAlgorithm("none".to_string()))
        );

        let hs512 = format!("{}.e30.sig", URL_SAFE_NO_PAD.encode(br#"{"alg":"HS512"}"#));
        assert!(ensure_accepted_algorithm(&hs512).is_ok());
    }
}
