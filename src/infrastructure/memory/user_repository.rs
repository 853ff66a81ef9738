//! In-Memory User Repository Implementation
//!
//! 测试和无数据库环境下的仓储适配器。
//! email 唯一性以 email 索引分片锁为线性化点：
//! 并发创建同一 email 时恰好一个成功，其余 Conflict。

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::application::context::RequestContext;
use crate::application::ports::{RepositoryError, UserRecord, UserRepositoryPort};

/// 内存用户仓储
pub struct InMemoryUserRepository {
    users: DashMap<String, UserRecord>,
    email_index: DashMap<String, String>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            email_index: DashMap::new(),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// deadline 到期检查（内存操作不会阻塞，只需一次检查）
fn check_deadline(ctx: &RequestContext, op: &'static str) -> Result<(), RepositoryError> {
    if ctx.is_expired() {
        return Err(RepositoryError::Timeout(op.to_string()));
    }
    Ok(())
}

#[async_trait]
impl UserRepositoryPort for InMemoryUserRepository {
    async fn create(
        &self,
        ctx: &RequestContext,
        user: &UserRecord,
    ) -> Result<UserRecord, RepositoryError> {
        check_deadline(ctx, "create")?;

        match self.email_index.entry(user.email.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::Conflict(format!(
                "email already registered: {}",
                user.email
            ))),
            Entry::Vacant(slot) => {
                if self.users.contains_key(&user.id) {
                    return Err(RepositoryError::Conflict(format!(
                        "user already exists: {}",
                        user.id
                    )));
                }
                slot.insert(user.id.clone());
                self.users.insert(user.id.clone(), user.clone());
                tracing::debug!(user_id = %user.id, "User stored in memory");
                Ok(user.clone())
            }
        }
    }

    async fn find_by_id(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<UserRecord, RepositoryError> {
        check_deadline(ctx, "find_by_id")?;

        self.users
            .get(id)
            .map(|user| user.clone())
            .ok_or_else(|| RepositoryError::NotFound(format!("User not found: {}", id)))
    }

    async fn find_all(&self, ctx: &RequestContext) -> Result<Vec<UserRecord>, RepositoryError> {
        check_deadline(ctx, "find_all")?;

        let mut users: Vec<UserRecord> =
            self.users.iter().map(|entry| entry.value().clone()).collect();
        users.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(users)
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        user: &UserRecord,
    ) -> Result<UserRecord, RepositoryError> {
        check_deadline(ctx, "update")?;

        // 先读后写，避免跨两张表持有分片锁（与 create 的加锁顺序一致）
        let current = self
            .users
            .get(&user.id)
            .map(|stored| stored.clone())
            .ok_or_else(|| RepositoryError::NotFound(format!("User not found: {}", user.id)))?;

        let email_changed = current.email != user.email;
        if email_changed {
            match self.email_index.entry(user.email.clone()) {
                Entry::Occupied(_) => {
                    return Err(RepositoryError::Conflict(format!(
                        "email already registered: {}",
                        user.email
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(user.id.clone());
                }
            }
            self.email_index.remove(&current.email);
        }

        let Some(mut stored) = self.users.get_mut(&user.id) else {
            // 目标在读与写之间被并发删除：回收刚插入的索引项，
            // 否则该 email 被永久占用
            if email_changed {
                self.email_index
                    .remove_if(&user.email, |_, owner| owner == &user.id);
            }
            return Err(RepositoryError::NotFound(format!(
                "User not found: {}",
                user.id
            )));
        };
        stored.email = user.email.clone();
        stored.name = user.name.clone();
        stored.updated_at = user.updated_at;
        Ok(stored.clone())
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), RepositoryError> {
        check_deadline(ctx, "delete")?;

        let (_, removed) = self
            .users
            .remove(id)
            .ok_or_else(|| RepositoryError::NotFound(format!("User not found: {}", id)))?;
        self.email_index.remove(&removed.email);
        Ok(())
    }
}
