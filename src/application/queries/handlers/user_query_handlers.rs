//! User Query Handlers
//!
//! Service 层读侧。Repository 错误按 kind 一一映射，
//! 只追加上下文，不改变 kind。

use std::sync::Arc;

use crate::application::context::RequestContext;
use crate::application::error::DomainError;
use crate::application::ports::UserRepositoryPort;
use crate::application::queries::{GetUser, ListUsers};
use crate::application::views::UserView;
use crate::domain::UserId;

/// GetUser Handler
pub struct GetUserHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl GetUserHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(
        &self,
        ctx: &RequestContext,
        query: GetUser,
    ) -> Result<UserView, DomainError> {
        let id = UserId::new(query.id)?;

        let record = self
            .user_repo
            .find_by_id(ctx, id.as_str())
            .await
            .map_err(|e| DomainError::from(e).with_context("user lookup failed"))?;

        Ok(record.into())
    }
}

/// ListUsers Handler
pub struct ListUsersHandler {
    user_repo: Arc<dyn UserRepositoryPort>,
}

impl ListUsersHandler {
    pub fn new(user_repo: Arc<dyn UserRepositoryPort>) -> Self {
        Self { user_repo }
    }

    pub async fn handle(
        &self,
        ctx: &RequestContext,
        _query: ListUsers,
    ) -> Result<Vec<UserView>, DomainError> {
        let records = self
            .user_repo
            .find_all(ctx)
            .await
            .map_err(|e| DomainError::from(e).with_context("user list failed"))?;

        Ok(records.into_iter().map(UserView::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::commands::handlers::CreateUserHandler;
    use crate::application::commands::CreateUser;
    use crate::infrastructure::memory::InMemoryUserRepository;

    #[tokio::test]
    async fn test_get_missing_user_is_not_found() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let handler = GetUserHandler::new(repo);
        let ctx = RequestContext::new();

        let err = handler
            .handle(&ctx, GetUser { id: "42".to_string() })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "NotFound");
    }

    #[tokio::test]
    async fn test_get_invalid_id_is_invalid() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let handler = GetUserHandler::new(repo);
        let ctx = RequestContext::new();

        let err = handler
            .handle(&ctx, GetUser { id: String::new() })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "Invalid");
    }

    #[tokio::test]
    async fn test_list_returns_created_users() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let create = CreateUserHandler::new(repo.clone());
        let list = ListUsersHandler::new(repo);
        let ctx = RequestContext::new();

        for email in ["a@example.com", "b@example.com"] {
            create
                .handle(
                    &ctx,
                    CreateUser {
                        id: None,
                        email: email.to_string(),
                        name: "User".to_string(),
                    },
                )
                .await
                .unwrap();
        }

        let users = list.handle(&ctx, ListUsers).await.unwrap();
        assert_eq!(users.len(), 2);
    }

    #[tokio::test]
    async fn test_expired_deadline_is_internal_not_hang() {
        let repo = Arc::new(InMemoryUserRepository::new());
        let handler = GetUserHandler::new(repo);
        let ctx = RequestContext::with_timeout(std::time::Duration::ZERO);

        let err = handler
            .handle(&ctx, GetUser { id: "42".to_string() })
            .await
            .unwrap_err();
        assert_eq!(err.kind(), "Internal");
    }
}
