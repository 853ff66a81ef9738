//! HTTP Routes
//!
//! API 路由定义
//!
//! API Endpoints:
//! - /ping           GET     健康检查
//! - /users          GET     列出用户；`?id=` 时返回单个用户
//! - /users          POST    创建用户
//! - /users/{id}     GET     获取用户
//! - /users/{id}     PUT     更新用户
//! - /users/{id}     DELETE  删除用户
//!
//! 未匹配的路由、以及路径匹配但方法不匹配的请求，
//! 都返回与 NotFound 信封同形的 404，不走框架默认的空响应。

use axum::{routing::get, Router};
use std::sync::Arc;

use super::error::ApiError;
use super::handlers;
use super::state::AppState;

/// 创建所有路由
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/ping", get(handlers::ping))
        .route(
            "/users",
            get(handlers::list_users).post(handlers::create_user),
        )
        .route(
            "/users/:id",
            get(handlers::get_user)
                .put(handlers::update_user)
                .delete(handlers::delete_user),
        )
        .fallback(route_not_found)
        .method_not_allowed_fallback(route_not_found)
}

/// 未匹配路由（含方法不匹配）：Received → Responded，404 信封
async fn route_not_found() -> ApiError {
    ApiError::NotFound("route not found".to_string())
}
