/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - BoardError / IdCodecError / validation error を統一的に変換
 */
use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::board_service::BoardError;
use crate::services::id_codec::IdCodecError;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("not found: {resource}")]
    NotFound { resource: &'static str },
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden: {0}")]
    Forbidden(&'static str),
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match self {
            AppError::BadRequest { code, message } => (StatusCode::BAD_REQUEST, code, message),
            AppError::NotFound { resource } => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{resource} not found"),
            ),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "unauthorized".into(),
            ),
            AppError::Forbidden(reason) => (StatusCode::FORBIDDEN, "FORBIDDEN", reason.into()),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_SERVER_ERROR",
                "internal server error".into(),
            ),
        };

        let body = ErrorResponse {
            error: ErrorBody { code, message },
        };

        (status, Json(body)).into_response()
    }
}

impl From<BoardError> for AppError {
    fn from(e: BoardError) -> Self {
        match e {
            BoardError::NotFound => AppError::not_found("post"),
            BoardError::Forbidden => AppError::Forbidden("not the author"),
            BoardError::InvalidToken(_) => AppError::Unauthorized,
            BoardError::Repo(err) => {
                tracing::error!(error = ?err, "board storage failure");
                AppError::Internal
            }
        }
    }
}

impl From<IdCodecError> for AppError {
    fn from(e: IdCodecError) -> Self {
        if e.is_client_error() {
            // Client supplied a malformed public id (e.g. /boards/{id})
            AppError::bad_request("INVALID_PUBLIC_ID", "invalid id")
        } else {
            // Server-side config / programming error
            tracing::error!(error = %e, "id codec failure");
            AppError::Internal
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(e: JsonRejection) -> Self {
        tracing::debug!(error = %e, "request body rejected");
        AppError::bad_request("VALIDATION_ERROR", e.body_text())
    }
}
