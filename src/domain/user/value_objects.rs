//! User Context - Value Objects

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::UserError;

/// 用户唯一标识
///
/// 不透明字符串 ID。调用方可以自带 ID（重试时幂等），
/// 未提供时由服务端生成 UUID v4 字符串。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct UserId(String);

impl UserId {
    /// 校验并包装调用方提供的 ID
    pub fn new(id: impl Into<String>) -> Result<Self, UserError> {
        let id = id.into();
        if id.is_empty() {
            return Err(UserError::InvalidId("id cannot be empty".to_string()));
        }
        if id.len() > 64 {
            return Err(UserError::InvalidId(
                "id cannot exceed 64 characters".to_string(),
            ));
        }
        Ok(Self(id))
    }

    /// 生成服务端 ID
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 用户邮箱（唯一键）
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// 校验邮箱格式
    ///
    /// 只做形状校验：非空、含 `@`（非首尾）、长度不超过 254
    pub fn new(email: impl Into<String>) -> Result<Self, UserError> {
        let email = email.into().trim().to_lowercase();
        if email.is_empty() {
            return Err(UserError::InvalidEmail("email cannot be empty".to_string()));
        }
        if email.len() > 254 {
            return Err(UserError::InvalidEmail(
                "email cannot exceed 254 characters".to_string(),
            ));
        }
        match email.find('@') {
            Some(pos) if pos > 0 && pos < email.len() - 1 => Ok(Self(email)),
            _ => Err(UserError::InvalidEmail(format!(
                "'{}' is not a valid email address",
                email
            ))),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 用户显示名称
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserName(String);

impl UserName {
    pub fn new(name: impl Into<String>) -> Result<Self, UserError> {
        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(UserError::InvalidName("name cannot be empty".to_string()));
        }
        if trimmed.chars().count() > 100 {
            return Err(UserError::InvalidName(
                "name cannot exceed 100 characters".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for UserName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
