//! 应用层错误定义
//!
//! 统一的领域错误类型。跨层边界的错误必须是四种 kind 之一：
//! NotFound / Conflict / Invalid / Internal。底层错误（sqlx、IO 等）
//! 在产生它的层内完成分类和包装，原始 cause 仅用于日志诊断，
//! 不会原样返回给进程外的调用方。

use thiserror::Error;

use crate::application::ports::RepositoryError;
use crate::domain::UserError;

/// 领域错误
///
/// 上层要么原样透传，要么用 [`DomainError::with_context`] 追加上下文，
/// 但不改变 kind。
#[derive(Debug, Error)]
pub enum DomainError {
    /// 资源不存在
    #[error("{0}")]
    NotFound(String),

    /// 唯一性冲突
    #[error("{0}")]
    Conflict(String),

    /// 输入校验失败
    #[error("{0}")]
    Invalid(String),

    /// 内部故障（cause 只进日志，不出进程）
    #[error("{message}")]
    Internal {
        message: String,
        cause: Option<String>,
    },
}

impl DomainError {
    /// 创建 NotFound 错误
    pub fn not_found(resource: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound(format!("{} not found: {}", resource, id))
    }

    /// 创建 Conflict 错误
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// 创建校验错误
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }

    /// 创建内部错误
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            cause: None,
        }
    }

    /// 创建带原始 cause 的内部错误
    pub fn internal_with_cause(message: impl Into<String>, cause: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            cause: Some(cause.into()),
        }
    }

    /// kind 的稳定字符串表示（响应信封中的 `error.kind`）
    pub fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "NotFound",
            Self::Conflict(_) => "Conflict",
            Self::Invalid(_) => "Invalid",
            Self::Internal { .. } => "Internal",
        }
    }

    /// 追加上下文前缀，kind 和 cause 保持不变
    pub fn with_context(self, context: &str) -> Self {
        match self {
            Self::NotFound(msg) => Self::NotFound(format!("{}: {}", context, msg)),
            Self::Conflict(msg) => Self::Conflict(format!("{}: {}", context, msg)),
            Self::Invalid(msg) => Self::Invalid(format!("{}: {}", context, msg)),
            Self::Internal { message, cause } => Self::Internal {
                message: format!("{}: {}", context, message),
                cause,
            },
        }
    }
}

impl From<RepositoryError> for DomainError {
    /// Repository 错误按 kind 一一对应；未分类的存储故障一律归入 Internal
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound(msg) => Self::NotFound(msg),
            RepositoryError::Conflict(msg) => Self::Conflict(msg),
            RepositoryError::Timeout(msg) => {
                Self::internal_with_cause("deadline exceeded", msg)
            }
            RepositoryError::Database(msg) => {
                Self::internal_with_cause("storage failure", msg)
            }
            RepositoryError::Serialization(msg) => {
                Self::internal_with_cause("storage failure", msg)
            }
        }
    }
}

impl From<UserError> for DomainError {
    /// 领域校验错误都是 Invalid
    fn from(err: UserError) -> Self {
        Self::Invalid(err.to_string())
    }
}
