//! User Context - Aggregate

use chrono::{DateTime, Utc};

use super::{Email, UserError, UserId, UserName};

/// 用户聚合
///
/// 仅在校验/构造期间短暂存在；持久化表示是
/// `application::ports` 中的 `UserRecord`，由 Repository 层独占。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    id: UserId,
    email: Email,
    name: UserName,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl User {
    /// 创建新用户
    ///
    /// `id` 为 None 时由服务端生成（注意：服务端生成 ID 时
    /// 重试 create 不再幂等，见 DESIGN.md）
    pub fn new(
        id: Option<&str>,
        email: &str,
        name: &str,
        now: DateTime<Utc>,
    ) -> Result<Self, UserError> {
        let id = match id {
            Some(raw) => UserId::new(raw)?,
            None => UserId::generate(),
        };
        Ok(Self {
            id,
            email: Email::new(email)?,
            name: UserName::new(name)?,
            created_at: now,
            updated_at: now,
        })
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn name(&self) -> &UserName {
        &self.name
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// 修改邮箱
    pub fn change_email(&mut self, email: &str, now: DateTime<Utc>) -> Result<(), UserError> {
        self.email = Email::new(email)?;
        self.updated_at = now;
        Ok(())
    }

    /// 修改显示名称
    pub fn rename(&mut self, name: &str, now: DateTime<Utc>) -> Result<(), UserError> {
        self.name = UserName::new(name)?;
        self.updated_at = now;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_with_caller_id() {
        let now = Utc::now();
        let user = User::new(Some("42"), "alice@example.com", "Alice", now).unwrap();
        assert_eq!(user.id().as_str(), "42");
        assert_eq!(user.email().as_str(), "alice@example.com");
        assert_eq!(user.created_at(), user.updated_at());
    }

    #[test]
    fn test_new_user_generates_id() {
        let now = Utc::now();
        let user = User::new(None, "bob@example.com", "Bob", now).unwrap();
        assert!(!user.id().as_str().is_empty());
    }

    #[test]
    fn test_new_user_rejects_invalid_email() {
        let now = Utc::now();
        assert!(User::new(None, "not-an-email", "Bob", now).is_err());
    }

    #[test]
    fn test_change_email_bumps_updated_at() {
        let created = Utc::now();
        let mut user = User::new(None, "bob@example.com", "Bob", created).unwrap();
        let later = created + chrono::Duration::seconds(5);
        user.change_email("robert@example.com", later).unwrap();
        assert_eq!(user.email().as_str(), "robert@example.com");
        assert_eq!(user.updated_at(), later);
        assert_eq!(user.created_at(), created);
    }
}
