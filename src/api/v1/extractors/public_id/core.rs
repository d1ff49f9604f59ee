/*
 * Responsibility
 * - Path の String を公開 ID 型として受け、復号して内部 ID (i64) に変換する
 * - 失敗時は AppError (400 INVALID_PUBLIC_ID) へ変換
 * - 具体リソース名 (Board など) はここに置かない (types.rs)
 */
use std::marker::PhantomData;

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;

use crate::error::AppError;
use crate::state::AppState;

#[derive(Clone, Copy)]
pub struct PublicId<T> {
    pub id: i64,
    _marker: PhantomData<T>,
}

impl<T> PublicId<T> {
    fn new(id: i64) -> Self {
        Self {
            id,
            _marker: PhantomData,
        }
    }
}

impl<T> FromRequestParts<AppState> for PublicId<T>
where
    T: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let Path(public_id) = Path::<String>::from_request_parts(parts, state)
            .await
            .map_err(|_| AppError::bad_request("INVALID_PUBLIC_ID", "invalid id"))?;
        let id = state.id_codec.decode(&public_id)?;
        Ok(Self::new(id))
    }
}

impl<T> std::fmt::Debug for PublicId<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PublicId").field("id", &self.id).finish()
    }
}
