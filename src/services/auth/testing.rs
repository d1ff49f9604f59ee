//! Deterministic token verifier for tests: `token-for-<name>` decodes to subject `<name>`.

use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;

use crate::services::auth::access_jwt::AccessTokenClaims;
use crate::services::auth::{AccessJwtError, IdentityExtractor, TokenVerifier};

const PREFIX: &str = "token-for-";

pub struct FakeVerifier;

impl TokenVerifier for FakeVerifier {
    fn verify(&self, token: &str) -> Result<AccessTokenClaims, AccessJwtError> {
        let sub = token
            .strip_prefix(PREFIX)
            .ok_or_else(|| AccessJwtError::Jwt(ErrorKind::InvalidToken.into()))?;

        Ok(AccessTokenClaims {
            sub: sub.to_string(),
        })
    }
}

pub fn token_for(username: &str) -> String {
    format!("{PREFIX}{username}")
}

pub fn fake_identity() -> IdentityExtractor {
    IdentityExtractor::new(Arc::new(FakeVerifier))
}
