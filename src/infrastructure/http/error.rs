//! HTTP Error Handling - Responder 错误侧
//!
//! DomainError kind 到传输层状态码的确定性映射：
//! NotFound→404, Conflict→409, Invalid→400, Internal→500。
//! 错误信封固定为 `{"error": {"kind": <string>, "message": <string>}}`。
//! Internal 的消息在发送前替换为通用文案，原始 cause 只进日志。

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::application::error::DomainError;

/// Internal 错误对外的统一文案
const GENERIC_INTERNAL_MESSAGE: &str = "internal server error";

/// 错误信封
#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

/// 错误信封主体
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub kind: &'static str,
    pub message: String,
}

impl ErrorEnvelope {
    pub fn new(kind: &'static str, message: impl Into<String>) -> Self {
        Self {
            error: ErrorBody {
                kind,
                message: message.into(),
            },
        }
    }
}

/// API 错误
///
/// 变体与 DomainError 的四种 kind 一一对应。
#[derive(Debug)]
pub enum ApiError {
    NotFound(String),
    Conflict(String),
    Invalid(String),
    Internal {
        message: String,
        cause: Option<String>,
    },
}

impl ApiError {
    /// kind 的稳定字符串表示
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NotFound",
            Self::Conflict(_) => "Conflict",
            Self::Invalid(_) => "Invalid",
            Self::Internal { .. } => "Internal",
        }
    }

    /// kind → 状态码（纯函数，对每个 kind 恒定）
    pub fn status(&self) -> StatusCode {
        status_for_kind(self.kind())
    }
}

/// kind 字符串到状态码的映射
pub fn status_for_kind(kind: &str) -> StatusCode {
    match kind {
        "NotFound" => StatusCode::NOT_FOUND,
        "Conflict" => StatusCode::CONFLICT,
        "Invalid" => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let envelope = match &self {
            ApiError::NotFound(msg) => {
                tracing::warn!(error = %msg, "Resource not found");
                ErrorEnvelope::new("NotFound", msg.clone())
            }
            ApiError::Conflict(msg) => {
                tracing::warn!(error = %msg, "Resource conflict");
                ErrorEnvelope::new("Conflict", msg.clone())
            }
            ApiError::Invalid(msg) => {
                tracing::warn!(error = %msg, "Invalid request");
                ErrorEnvelope::new("Invalid", msg.clone())
            }
            ApiError::Internal { message, cause } => {
                tracing::error!(
                    error = %message,
                    cause = cause.as_deref().unwrap_or("-"),
                    "Internal server error"
                );
                // 内部细节不出进程
                ErrorEnvelope::new("Internal", GENERIC_INTERNAL_MESSAGE)
            }
        };

        (status, Json(envelope)).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::NotFound(msg) => ApiError::NotFound(msg),
            DomainError::Conflict(msg) => ApiError::Conflict(msg),
            DomainError::Invalid(msg) => ApiError::Invalid(msg),
            DomainError::Internal { message, cause } => ApiError::Internal { message, cause },
        }
    }
}
