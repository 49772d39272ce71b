//! Credential and session-token core
//!
//! Provides the security-sensitive pieces of account authentication:
//! - Password hashing (Argon2id, self-describing encoded hashes)
//! - Signing key generation and validation
//! - JWT issuance and validation (HS512 only)
//! - Username/password authentication against an account store
//!
//! Persistence, routing and account management live elsewhere; the account
//! store is reached only through the [`CredentialLookup`] port.
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use switchcraft_auth::{HashParameters, PasswordHasher};
//!
//! let hasher = PasswordHasher::with_params(HashParameters {
//!     memory_cost_kib: 64,
//!     iterations: 1,
//!     parallelism: 1,
//!     ..HashParameters::DEFAULT
//! })
//! .unwrap();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hash.starts_with("$argon2id$v=19$m=64,t=1,p=1$"));
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Tokens
//! ```
//! use serde_json::json;
//! use switchcraft_auth::{SigningKey, TokenIssuer, TokenValidator};
//!
//! let key = SigningKey::generate().unwrap();
//! let token = TokenIssuer::from_key(&key)
//!     .issue(&json!({"username": "alice"}), "alice")
//!     .unwrap();
//! let account: serde_json::Value = TokenValidator::from_key(&key).validate(&token).unwrap();
//! assert_eq!(account["username"], "alice");
//! ```
//!
//! ## Signing Keys
//! ```
//! use switchcraft_auth::{generate_key, SigningKey};
//!
//! let encoded = generate_key(512).unwrap();
//! let key = SigningKey::from_hex(&encoded).unwrap();
//! assert_eq!(key.as_bytes().len(), 64);
//! assert!(generate_key(255).is_err());
//! ```

pub mod account;
pub mod authenticator;
pub mod config;
pub mod jwt;
pub mod keys;
pub mod password;
pub mod ports;
pub mod service;

// Re-export commonly used items
pub use account::Account;
pub use authenticator::Authenticator;
pub use jwt::TokenClaims;
pub use jwt::TokenError;
pub use jwt::TokenIssuer;
pub use jwt::TokenValidator;
pub use keys::generate_key;
pub use keys::validate_signing_key;
pub use keys::KeyError;
pub use keys::SigningKey;
pub use password::EncodedHash;
pub use password::HashParameters;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use ports::CredentialLookup;
pub use service::AuthError;
pub use service::AuthService;
