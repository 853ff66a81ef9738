//! User Queries - 读操作

/// 获取单个用户
#[derive(Debug, Clone)]
pub struct GetUser {
    pub id: String,
}

/// 列出所有用户
#[derive(Debug, Clone, Default)]
pub struct ListUsers;
