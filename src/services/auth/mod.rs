pub mod access_jwt;
pub mod factory;
pub mod identity;
#[cfg(test)]
pub mod testing;

pub use access_jwt::{AccessJwtError, JwtVerifier, TokenVerifier};
pub use factory::build_identity_extractor;
pub use identity::IdentityExtractor;
