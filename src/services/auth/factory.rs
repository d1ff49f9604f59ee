/// Factory: build the identity extractor from application `Config`.
use std::sync::Arc;

use crate::config::Config;
use crate::services::auth::{AccessJwtError, IdentityExtractor, JwtVerifier};

pub fn build_identity_extractor(config: &Config) -> Result<IdentityExtractor, AccessJwtError> {
    let verifier = JwtVerifier::new(
        &config.access_token_key,
        config.auth_issuer.as_deref(),
        config.auth_audience.as_deref(),
        config.access_token_leeway_seconds,
    )?;

    Ok(IdentityExtractor::new(Arc::new(verifier)))
}
