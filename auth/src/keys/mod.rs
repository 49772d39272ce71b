pub mod errors;
pub mod material;

pub use errors::KeyError;
pub use material::generate_key;
pub use material::validate_signing_key;
pub use material::SigningKey;
pub use material::MIN_GENERATED_KEY_BITS;
pub use material::SIGNING_KEY_LEN;
