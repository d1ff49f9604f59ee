use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use std::{error::Error as StdError, fmt};

use crate::config::AccessTokenKey;

// Errors returned by access-token verification + strict claim validation.
#[derive(Debug)]
pub enum AccessJwtError {
    Jwt(jsonwebtoken::errors::Error),
    MissingToken,
    EmptyClaim(&'static str),
}

impl fmt::Display for AccessJwtError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jwt(e) => write!(f, "jwt verification failed: {}", e),
            Self::MissingToken => write!(f, "missing bearer token"),
            Self::EmptyClaim(name) => write!(f, "empty '{}' claim", name),
        }
    }
}

impl StdError for AccessJwtError {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        match self {
            Self::Jwt(e) => Some(e),
            _ => None,
        }
    }
}

impl From<jsonwebtoken::errors::Error> for AccessJwtError {
    fn from(e: jsonwebtoken::errors::Error) -> Self {
        Self::Jwt(e)
    }
}

/// Access token (JWT) claims.
///
/// NOTE:
/// - `sub` is the author identity and the only claim read here.
/// - `exp` is required and checked by `Validation` on the raw claims;
///   `iss`/`aud` only when the deployment configures them.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessTokenClaims {
    pub sub: String,
}

/// Token-verification capability.
///
/// Injected into the identity extractor so tests can swap in a deterministic double.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str) -> Result<AccessTokenClaims, AccessJwtError>;
}

/// JWT verifier backed by `jsonwebtoken`.
///
/// - EdDSA (Ed25519 public key PEM) or HS256 (base64 shared secret).
/// - Key material is intentionally not printable via Debug.
#[derive(Clone)]
pub struct JwtVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl fmt::Debug for JwtVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print key material
        f.debug_struct("JwtVerifier")
            .field("validation", &self.validation)
            .finish()
    }
}

impl JwtVerifier {
    pub fn new(
        key: &AccessTokenKey,
        issuer: Option<&str>,
        audience: Option<&str>,
        leeway_seconds: u64,
    ) -> Result<Self, AccessJwtError> {
        let (decoding_key, algorithm) = match key {
            AccessTokenKey::Ed25519PublicPem(pem) => {
                (DecodingKey::from_ed_pem(pem.as_bytes())?, Algorithm::EdDSA)
            }
            AccessTokenKey::HmacSecret(secret) => {
                (DecodingKey::from_base64_secret(secret)?, Algorithm::HS256)
            }
        };

        let mut validation = Validation::new(algorithm);
        if let Some(issuer) = issuer {
            validation.set_issuer(&[issuer]);
        }
        match audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }
        validation.leeway = leeway_seconds;

        Ok(Self {
            decoding_key,
            validation,
        })
    }
}

impl TokenVerifier for JwtVerifier {
    /// `jsonwebtoken::Validation` checks signature, `exp` and (when configured) `iss`/`aud`.
    /// On top of that `sub` must be present and non-blank.
    fn verify(&self, token: &str) -> Result<AccessTokenClaims, AccessJwtError> {
        let data =
            jsonwebtoken::decode::<AccessTokenClaims>(token, &self.decoding_key, &self.validation)?;
        let claims = data.claims;

        if claims.sub.trim().is_empty() {
            return Err(AccessJwtError::EmptyClaim("sub"));
        }

        Ok(claims)
    }
}
