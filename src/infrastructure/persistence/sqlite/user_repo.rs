//! SQLite User Repository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use std::future::Future;

use super::DbPool;
use crate::application::context::RequestContext;
use crate::application::ports::{RepositoryError, UserRecord, UserRepositoryPort};

/// SQLite User Repository
pub struct SqliteUserRepository {
    pool: DbPool,
}

impl SqliteUserRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct UserRow {
    id: String,
    email: String,
    name: String,
    created_at: String,
    updated_at: String,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = RepositoryError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(UserRecord {
            id: row.id,
            email: row.email,
            name: row.name,
            created_at: DateTime::parse_from_rfc3339(&row.created_at)
                .map_err(|e| RepositoryError::Serialization(e.to_string()))?
                .with_timezone(&Utc),
            updated_at: DateTime::parse_from_rfc3339(&row.updated_at)
                .map_err(|e| RepositoryError::Serialization(e.to_string()))?
                .with_timezone(&Utc),
        })
    }
}

/// 在 ctx 的 deadline 内运行数据库操作
///
/// deadline 到期的操作以 Timeout 中止，绝不无限期阻塞。
async fn with_deadline<T, F>(
    ctx: &RequestContext,
    op: &'static str,
    fut: F,
) -> Result<T, RepositoryError>
where
    F: Future<Output = Result<T, RepositoryError>>,
{
    match ctx.remaining() {
        None => fut.await,
        Some(remaining) if remaining.is_zero() => Err(RepositoryError::Timeout(op.to_string())),
        Some(remaining) => tokio::time::timeout(remaining, fut)
            .await
            .unwrap_or_else(|_| Err(RepositoryError::Timeout(op.to_string()))),
    }
}

/// sqlx 错误分类：唯一约束冲突 → Conflict，其余 → Database
fn classify_write_error(e: sqlx::Error, user: &UserRecord) -> RepositoryError {
    if let sqlx::Error::Database(db) = &e {
        if db.is_unique_violation() {
            return if db.message().contains("users.email") {
                RepositoryError::Conflict(format!("email already registered: {}", user.email))
            } else {
                RepositoryError::Conflict(format!("user already exists: {}", user.id))
            };
        }
    }
    RepositoryError::Database(e.to_string())
}

#[async_trait]
impl UserRepositoryPort for SqliteUserRepository {
    async fn create(
        &self,
        ctx: &RequestContext,
        user: &UserRecord,
    ) -> Result<UserRecord, RepositoryError> {
        with_deadline(ctx, "create", async {
            sqlx::query(
                r#"
                INSERT INTO users (id, email, name, created_at, updated_at)
                VALUES (?, ?, ?, ?, ?)
                "#,
            )
            .bind(&user.id)
            .bind(&user.email)
            .bind(&user.name)
            .bind(user.created_at.to_rfc3339())
            .bind(user.updated_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| classify_write_error(e, user))?;

            Ok(user.clone())
        })
        .await
    }

    async fn find_by_id(
        &self,
        ctx: &RequestContext,
        id: &str,
    ) -> Result<UserRecord, RepositoryError> {
        with_deadline(ctx, "find_by_id", async {
            let row: Option<UserRow> = sqlx::query_as(
                "SELECT id, email, name, created_at, updated_at FROM users WHERE id = ?",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

            row.ok_or_else(|| RepositoryError::NotFound(format!("User not found: {}", id)))?
                .try_into()
        })
        .await
    }

    async fn find_all(&self, ctx: &RequestContext) -> Result<Vec<UserRecord>, RepositoryError> {
        with_deadline(ctx, "find_all", async {
            let rows: Vec<UserRow> = sqlx::query_as(
                "SELECT id, email, name, created_at, updated_at FROM users ORDER BY created_at DESC",
            )
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

            rows.into_iter().map(UserRecord::try_from).collect()
        })
        .await
    }

    async fn update(
        &self,
        ctx: &RequestContext,
        user: &UserRecord,
    ) -> Result<UserRecord, RepositoryError> {
        with_deadline(ctx, "update", async {
            // 更新与回读在同一事务内，写入后的行不会被并发删除/重建改写
            let mut tx = self
                .pool
                .begin()
                .await
                .map_err(|e| RepositoryError::Database(e.to_string()))?;

            let result = sqlx::query(
                r#"
                UPDATE users
                SET email = ?, name = ?, updated_at = ?
                WHERE id = ?
                "#,
            )
            .bind(&user.email)
            .bind(&user.name)
            .bind(user.updated_at.to_rfc3339())
            .bind(&user.id)
            .execute(&mut *tx)
            .await
            .map_err(|e| classify_write_error(e, user))?;

            if result.rows_affected() == 0 {
                return Err(RepositoryError::NotFound(format!(
                    "User not found: {}",
                    user.id
                )));
            }

            // 回读存储记录（created_at 保持原值）
            let row: Option<UserRow> = sqlx::query_as(
                "SELECT id, email, name, created_at, updated_at FROM users WHERE id = ?",
            )
            .bind(&user.id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| RepositoryError::Database(e.to_string()))?;

            let record: UserRecord = row
                .ok_or_else(|| RepositoryError::NotFound(format!("User not found: {}", user.id)))?
                .try_into()?;

            tx.commit()
                .await
                .map_err(|e| RepositoryError::Database(e.to_string()))?;

            Ok(record)
        })
        .await
    }

    async fn delete(&self, ctx: &RequestContext, id: &str) -> Result<(), RepositoryError> {
        with_deadline(ctx, "delete", async {
            let result = sqlx::query("DELETE FROM users WHERE id = ?")
                .bind(id)
                .execute(&self.pool)
                .await
                .map_err(|e| RepositoryError::Database(e.to_string()))?;

            if result.rows_affected() == 0 {
                return Err(RepositoryError::NotFound(format!("User not found: {}", id)));
            }

            Ok(())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::{create_pool, run_migrations, DatabaseConfig};
    use super::*;

    async fn test_repo() -> SqliteUserRepository {
        let pool = create_pool(&DatabaseConfig::in_memory()).await.unwrap();
        run_migrations(&pool).await.unwrap();
        SqliteUserRepository::new(pool)
    }

    fn record(id: &str, email: &str) -> UserRecord {
        let now = Utc::now();
        UserRecord {
            id: id.to_string(),
            email: email.to_string(),
            name: "Test".to_string(),
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_create_and_find_round_trip() {
        let repo = test_repo().await;
        let ctx = RequestContext::new();

        let created = repo.create(&ctx, &record("1", "a@example.com")).await.unwrap();
        let found = repo.find_by_id(&ctx, "1").await.unwrap();
        assert_eq!(found.id, created.id);
        assert_eq!(found.email, created.email);
        assert_eq!(found.name, created.name);
    }

    #[tokio::test]
    async fn test_find_missing_is_not_found() {
        let repo = test_repo().await;
        let ctx = RequestContext::new();

        let err = repo.find_by_id(&ctx, "42").await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let repo = test_repo().await;
        let ctx = RequestContext::new();

        repo.create(&ctx, &record("1", "a@example.com")).await.unwrap();
        let err = repo
            .create(&ctx, &record("2", "a@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_duplicate_id_conflicts() {
        let repo = test_repo().await;
        let ctx = RequestContext::new();

        repo.create(&ctx, &record("1", "a@example.com")).await.unwrap();
        let err = repo
            .create(&ctx, &record("1", "b@example.com"))
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_update_preserves_created_at() {
        let repo = test_repo().await;
        let ctx = RequestContext::new();

        let created = repo.create(&ctx, &record("1", "a@example.com")).await.unwrap();

        let mut changed = record("1", "b@example.com");
        changed.updated_at = Utc::now();
        let updated = repo.update(&ctx, &changed).await.unwrap();

        assert_eq!(updated.email, "b@example.com");
        assert_eq!(
            updated.created_at.to_rfc3339(),
            created.created_at.to_rfc3339()
        );
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let repo = test_repo().await;
        let ctx = RequestContext::new();

        let err = repo.update(&ctx, &record("42", "a@example.com")).await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_update_read_back_reflects_own_write() {
        use std::sync::Arc;

        let dir = tempfile::tempdir().unwrap();
        let pool = create_pool(&DatabaseConfig::new(dir.path().join("test.db")))
            .await
            .unwrap();
        run_migrations(&pool).await.unwrap();
        let repo = Arc::new(SqliteUserRepository::new(pool));
        let ctx = RequestContext::new();

        // 并发 删除+换 email 重建 不得改写一次成功更新的返回值
        for round in 0..100 {
            let id = round.to_string();
            repo.create(&ctx, &record(&id, &format!("u{}@example.com", round)))
                .await
                .unwrap();

            let updater = {
                let repo = repo.clone();
                let ctx = ctx.clone();
                let id = id.clone();
                tokio::spawn(async move { repo.update(&ctx, &record(&id, "updated@example.com")).await })
            };
            let replacer = {
                let repo = repo.clone();
                let ctx = ctx.clone();
                let id = id.clone();
                tokio::spawn(async move {
                    let _ = repo.delete(&ctx, &id).await;
                    let _ = repo.create(&ctx, &record(&id, "replaced@example.com")).await;
                })
            };

            if let Ok(updated) = updater.await.unwrap() {
                assert_eq!(updated.email, "updated@example.com");
            }
            replacer.await.unwrap();
            let _ = repo.delete(&ctx, &id).await;
        }
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let repo = test_repo().await;
        let ctx = RequestContext::new();

        let err = repo.delete(&ctx, "42").await.unwrap_err();
        assert!(matches!(err, RepositoryError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_expired_deadline_times_out() {
        let repo = test_repo().await;
        let ctx = RequestContext::with_timeout(std::time::Duration::ZERO);

        let err = repo.find_by_id(&ctx, "1").await.unwrap_err();
        assert!(matches!(err, RepositoryError::Timeout(_)));
    }
}
