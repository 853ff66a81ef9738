//! User Command Handlers
//!
//! Service 层写侧：先做输入校验（不合法的输入不会到达 Repository），
//! 再编排 Repository 调用。每次调用至多产生一次写副作用，
//! 不做隐式重试；重试策略属于调用方。

use chrono::Utc;
use std::sync::Arc;

use crate::application::commands::{CreateUser, DeleteUser, UpdateUser};
use crate::application::context::RequestContext;
use crate::application::error::DomainError;
use crate::application::ports::{UserRecord, UserRepositoryPort};
use crate::application::views::UserView;
use crate::domain::{Email, User, UserId, UserName};

// ============================================================================
// CreateUser
// ============================================================================

/// CreateUser Handler
pub struct CreateUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl CreateUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(
        &self,
        ctx: &RequestContext,
        command: CreateUser,
    ) -> Result<UserView, DomainError> {
        let user = User::new(
            command.id.as_deref(),
            &command.email,
            &command.name,
            Utc::now(),
        )?;

        let record = UserRecord::from(&user);
        let created = self
            .user_repo
            .create(ctx, &record)
            .await
            .map_err(|e| DomainError::from(e).with_context("user create failed"))?;

        tracing::info!(
            trace_id = %ctx.trace_id,
            user_id = %created.id,
            email = %created.email,
            "User created"
        );

        Ok(created.into())
    }
}

// ============================================================================
// UpdateUser
// ============================================================================

/// UpdateUser Handler
pub struct UpdateUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl UpdateUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(
        &self,
        ctx: &RequestContext,
        command: UpdateUser,
    ) -> Result<UserView, DomainError> {
        let id = UserId::new(command.id)?;
        let email = Email::new(command.email)?;
        let name = UserName::new(command.name)?;

        let now = Utc::now();
        let record = UserRecord {
            id: id.into_string(),
            email: email.as_str().to_string(),
            name: name.as_str().to_string(),
            // created_at 不可变更，Repository 返回存储中的原值
            created_at: now,
            updated_at: now,
        };

        let updated = self
            .user_repo
            .update(ctx, &record)
            .await
            .map_err(|e| DomainError::from(e).with_context("user update failed"))?;

        tracing::info!(
            trace_id = %ctx.trace_id,
            user_id = %updated.id,
            "User updated"
        );

        Ok(updated.into())
    }
}

// ============================================================================
// DeleteUser
// ============================================================================

/// DeleteUser Handler
pub struct DeleteUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl DeleteUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(
        &self,
        ctx: &RequestContext,
        command: DeleteUser,
    ) -> Result<(), DomainError> {
        let id = UserId::new(command.id)?;

        self.user_repo
            .delete(ctx, id.as_str())
            .await
            .map_err(|e| DomainError::from(e).with_context("user delete failed"))?;

        tracing::info!(
            trace_id = %ctx.trace_id,
            user_id = %id,
            "User deleted"
        );

        Ok(())
    }
}
