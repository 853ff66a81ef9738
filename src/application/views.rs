//! 应用层视图模型
//!
//! Service 操作的返回值。只是仓储记录的瞬时内存拷贝，
//! 上层不得长期持有。

use chrono::{DateTime, Utc};

use crate::application::ports::UserRecord;

/// 用户视图
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserView {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRecord> for UserView {
    fn from(record: UserRecord) -> Self {
        Self {
            id: record.id,
            email: record.email,
            name: record.name,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
