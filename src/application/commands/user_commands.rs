//! User Commands - 写操作

/// 创建用户
///
/// `id` 为 None 时由服务端生成 UUID v4 字符串。
/// 注意：服务端生成 ID 会使 create 在重试下不幂等（已知限制，见 DESIGN.md）；
/// 需要幂等重试的调用方应自带 ID。
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: Option<String>,
    pub email: String,
    pub name: String,
}

/// 更新用户
#[derive(Debug, Clone)]
pub struct UpdateUser {
    pub id: String,
    pub email: String,
    pub name: String,
}

/// 删除用户
#[derive(Debug, Clone)]
pub struct DeleteUser {
    pub id: String,
}
