pub mod claims;
pub mod errors;
pub mod issuer;
pub mod validator;

pub use claims::TokenClaims;
pub use claims::ACCOUNT_CLAIM;
pub use claims::ISSUER;
pub use claims::TOKEN_LIFETIME_HOURS;
pub use errors::TokenError;
pub use issuer::TokenIssuer;
pub use validator::TokenValidator;
