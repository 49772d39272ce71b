pub mod argon2;
pub mod encoding;
pub mod errors;
pub mod params;

pub use self::argon2::PasswordHasher;
pub use encoding::EncodedHash;
pub use encoding::ALGORITHM_ID;
pub use encoding::ARGON2_VERSION;
pub use errors::PasswordError;
pub use params::HashParameters;
