/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / JSON error body)
 * - config / session / auth の下位エラーを統一的に変換
 */
use axum::{
    Json,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: &'static str,
    pub message: String,
}

/// Coarse error taxonomy, independent of the HTTP mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Unauthorized,
    InactivePrincipal,
    InvalidCredentials,
    NotFound,
    ResourceUnavailable,
    BadRequest,
    Teapot,
    Internal,
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("{message}")]
    Unauthorized { message: &'static str },
    #[error("Inactive user")]
    InactivePrincipal,
    #[error("Incorrect username or password")]
    InvalidCredentials,
    #[error("{message}")]
    NotFound { message: String },
    #[error("resource unavailable")]
    ResourceUnavailable,
    #[error("{code}: {message}")]
    BadRequest { code: &'static str, message: String },
    #[error("{message}")]
    Teapot { message: String },
    #[error("internal server error")]
    Internal,
}

impl AppError {
    pub fn unauthorized(message: &'static str) -> Self {
        Self::Unauthorized { message }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn bad_request(code: &'static str, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
        }
    }

    pub fn teapot(message: impl Into<String>) -> Self {
        Self::Teapot {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Unauthorized { .. } => ErrorKind::Unauthorized,
            AppError::InactivePrincipal => ErrorKind::InactivePrincipal,
            AppError::InvalidCredentials => ErrorKind::InvalidCredentials,
            AppError::NotFound { .. } => ErrorKind::NotFound,
            AppError::ResourceUnavailable => ErrorKind::ResourceUnavailable,
            AppError::BadRequest { .. } => ErrorKind::BadRequest,
            AppError::Teapot { .. } => ErrorKind::Teapot,
            AppError::Internal => ErrorKind::Internal,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.kind() {
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::InactivePrincipal
            | ErrorKind::InvalidCredentials
            | ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::ResourceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Teapot => StatusCode::IM_A_TEAPOT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::Unauthorized { .. } => "UNAUTHORIZED",
            AppError::InactivePrincipal => "INACTIVE_USER",
            AppError::InvalidCredentials => "INVALID_CREDENTIALS",
            AppError::NotFound { .. } => "NOT_FOUND",
            AppError::ResourceUnavailable => "RESOURCE_UNAVAILABLE",
            AppError::BadRequest { code, .. } => code,
            AppError::Teapot { .. } => "TEAPOT",
            AppError::Internal => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let challenge = matches!(self, AppError::Unauthorized { .. });

        let body = ErrorResponse {
            error: ErrorBody {
                code: self.code(),
                message: self.to_string(),
            },
        };

        let mut res = (status, Json(body)).into_response();
        if challenge {
            // Bearer scheme hint for 401 (RFC 6750)
            res.headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Bearer"));
        }
        res
    }
}
