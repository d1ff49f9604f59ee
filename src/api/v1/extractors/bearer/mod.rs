/*
 * Responsibility
 * - Authorization: Bearer <token> から token 文字列だけを取り出す
 * - ここでは検証しない (検証と作者の解決は BoardService → IdentityExtractor)
 * - ヘッダが無い・形式が違う場合は None (拒否はしない。401 にするかはユースケース次第)
 */
use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::{header, request::Parts};

const BEARER_PREFIX: &str = "Bearer ";

#[derive(Debug, Clone, Default)]
pub struct BearerToken(pub Option<String>);

impl BearerToken {
    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }
}

impl<S> FromRequestParts<S> for BearerToken
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.strip_prefix(BEARER_PREFIX))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        Ok(Self(token))
    }
}
