pub mod claims;
pub mod jwks;
pub mod jwt;

pub use claims::SupabaseClaims;
pub use jwks::{JwksCache, KeyProvider};
pub use jwt::validate_jwt;
