//! User HTTP Handlers
//!
//! Handler 只做三件事：解析传输输入为 Service 输入类型
//! （解析失败 → Invalid，不触达 Service）、调用 Service、
//! 把结果交给 Responder（成功信封或 DomainError 原样传递）。

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::application::views::UserView;
use crate::application::{CreateUser, DeleteUser, GetUser, ListUsers, RequestContext, UpdateUser};
use crate::infrastructure::http::dto::ApiResponse;
use crate::infrastructure::http::error::ApiError;
use crate::infrastructure::http::state::AppState;

// ============================================================================
// DTOs
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// 调用方可自带 ID（重试幂等）；缺省由服务端生成
    #[serde(default)]
    pub id: Option<String>,
    pub email: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateUserRequest {
    pub email: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct ListUsersParams {
    /// 提供 `?id=` 时返回单个用户
    #[serde(default)]
    pub id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub name: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<UserView> for UserResponse {
    fn from(view: UserView) -> Self {
        Self {
            id: view.id,
            email: view.email,
            name: view.name,
            created_at: view.created_at.to_rfc3339(),
            updated_at: view.updated_at.to_rfc3339(),
        }
    }
}

/// 删除用户响应
#[derive(Debug, Serialize)]
pub struct DeleteUserResponse {
    pub id: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// 列出用户；带 `?id=` 时返回单个用户
pub async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Query(params): Query<ListUsersParams>,
) -> Result<Response, ApiError> {
    match params.id {
        Some(id) => {
            let user = state.get_user_handler.handle(&ctx, GetUser { id }).await?;
            Ok(Json(ApiResponse::new(UserResponse::from(user))).into_response())
        }
        None => {
            let users = state.list_users_handler.handle(&ctx, ListUsers).await?;
            let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
            Ok(Json(ApiResponse::new(users)).into_response())
        }
    }
}

/// 获取单个用户
pub async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let user = state.get_user_handler.handle(&ctx, GetUser { id }).await?;
    Ok(Json(ApiResponse::new(user.into())))
}

/// 创建用户
pub async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    payload: Result<Json<CreateUserRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ApiResponse<UserResponse>>), ApiError> {
    // 请求体解析失败 → Invalid，不触达 Service
    let Json(payload) =
        payload.map_err(|e| ApiError::Invalid(format!("invalid request body: {}", e)))?;

    let user = state
        .create_user_handler
        .handle(
            &ctx,
            CreateUser {
                id: payload.id,
                email: payload.email,
                name: payload.name,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::new(user.into()))))
}

/// 更新用户
pub async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<UserResponse>>, ApiError> {
    let Json(payload) =
        payload.map_err(|e| ApiError::Invalid(format!("invalid request body: {}", e)))?;

    let user = state
        .update_user_handler
        .handle(
            &ctx,
            UpdateUser {
                id,
                email: payload.email,
                name: payload.name,
            },
        )
        .await?;

    Ok(Json(ApiResponse::new(user.into())))
}

/// 删除用户
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(ctx): Extension<RequestContext>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<DeleteUserResponse>>, ApiError> {
    state
        .delete_user_handler
        .handle(&ctx, DeleteUser { id: id.clone() })
        .await?;

    Ok(Json(ApiResponse::new(DeleteUserResponse { id })))
}
