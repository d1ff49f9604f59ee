/*
 * Responsibility
 * - axum::Json の薄いラッパー
 * - body の parse 失敗 (欠けたフィールド、不正な JSON、Content-Type 違い) を
 *   axum 既定の 422 text ではなく AppError (400 VALIDATION_ERROR, JSON body) で返す
 */
use axum::Json;
use axum::extract::{FromRequest, Request, rejection::JsonRejection};

use crate::error::AppError;

#[derive(Debug, Clone, Copy, Default)]
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
