//! Repository Ports - 出站端口
//!
//! 定义数据持久化的抽象接口
//! 具体实现在 infrastructure 层（SQLite / 内存）

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::application::context::RequestContext;
use crate::domain::User;

/// Repository 错误
///
/// Repository 层内完成分类：未分类的底层故障归入 Database，
/// 超过 deadline 的操作归入 Timeout。
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("deadline exceeded in {0}")]
    Timeout(String),

    #[error("database error: {0}")]
    Database(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// 用户实体（用于持久化）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserRecord {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_str().to_string(),
            email: user.email().as_str().to_string(),
            name: user.name().as_str().to_string(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// User Repository Port
///
/// 所有操作显式接收 [`RequestContext`] 并遵守其 deadline；
/// 到期的操作以 `Timeout` 中止，不允许无限期阻塞。
/// ID 由调用方提供时，操作在重试下幂等。
#[async_trait]
pub trait UserRepositoryPort: Send + Sync {
    /// 创建用户；email 或 id 冲突时返回 Conflict
    async fn create(
        &self,
        ctx: &RequestContext,
        user: &UserRecord,
    ) -> Result<UserRecord, RepositoryError>;

    /// 根据 ID 查找用户；不存在时返回 NotFound
    async fn find_by_id(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<UserRecord, RepositoryError>;

    /// 获取所有用户
    async fn find_all(&self, ctx: &RequestContext) -> Result<Vec<UserRecord>, RepositoryError>;

    /// 更新用户；不存在时返回 NotFound，email 冲突时返回 Conflict
    ///
    /// `created_at` 不可变更，返回的记录携带存储中的原值。
    async fn update(
        &self,
        ctx: &RequestContext,
        user: &UserRecord,
    ) -> Result<UserRecord, RepositoryError>;

    /// 删除用户；不存在时返回 NotFound
    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), RepositoryError>;
}
