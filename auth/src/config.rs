use std::env;
use std::fmt;

use config::Config as ConfigBuilder;
use config::ConfigError;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::keys::KeyError;
use crate::keys::SigningKey;
use crate::password::HashParameters;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub jwt: JwtConfig,
    #[serde(default)]
    pub password: HashParameters,
}

#[derive(Deserialize, Clone)]
pub struct JwtConfig {
    /// Hex encoded 512-bit signing key
    pub signing_key: String,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("signing_key", &"<redacted>")
            .finish()
    }
}

impl Config {
    /// Load configuration from files with environment variable overrides
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables (JWT__SIGNING_KEY, PASSWORD__ITERATIONS, etc.)
    /// 2. Environment-specific config file (config/{environment}.toml)
    /// 3. Default config file (config/default.toml)
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let configuration = ConfigBuilder::builder()
            // Start with default configuration
            .add_source(File::with_name("config/default").required(false))
            // Layer on environment-specific configuration
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // Layer on unprefixed environment variables (with __ as separator)
            // Example: JWT__SIGNING_KEY=<hex> overrides jwt.signing_key
            .add_source(Environment::default().separator("__"))
            .build()?;

        Self::from_settings(configuration)
    }

    /// Deserialize from an already assembled set of sources.
    pub fn from_settings(settings: ConfigBuilder) -> Result<Self, ConfigError> {
        settings.try_deserialize()
    }

    /// Decode and validate the signing key.
    ///
    /// # Errors
    /// * `InvalidHex` - Key is not hexadecimal
    /// * `InvalidSigningKeyLength` - Key is not exactly 512 bits
    pub fn signing_key(&self) -> Result<SigningKey, KeyError> {
        SigningKey::from_hex(&self.jwt.signing_key)
    }
}
