/*
 * Responsibility
 * - bearer token → 作者 (Username) の解決
 * - 暗号的な検証は TokenVerifier に委譲する (decode-or-fail)
 */
use std::sync::Arc;

use crate::domain::Username;
use crate::services::auth::{AccessJwtError, TokenVerifier};

#[derive(Clone)]
pub struct IdentityExtractor {
    verifier: Arc<dyn TokenVerifier>,
}

impl IdentityExtractor {
    pub fn new(verifier: Arc<dyn TokenVerifier>) -> Self {
        Self { verifier }
    }

    /// Returns the token subject. A missing or blank token is an error.
    pub fn extract_username(&self, token: Option<&str>) -> Result<Username, AccessJwtError> {
        let token = token
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .ok_or(AccessJwtError::MissingToken)?;

        let claims = self.verifier.verify(token)?;
        Ok(Username::new(claims.sub))
    }
}
