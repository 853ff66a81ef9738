//! HTTP Middleware
//!
//! 请求状态机：Received → Matched → Dispatched → Responded。
//! 中间件包裹 Dispatched 阶段：
//! 1. request context - 创建 RequestContext（trace id + deadline）并记录请求日志
//! 2. recovery - 把未捕获的 panic 转成 Internal 信封，保证 Responder 每请求恰好执行一次
//! 3. auth stub - 解析可选的 Bearer token（占位，不做鉴权）

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures_util::FutureExt;
use std::panic::AssertUnwindSafe;
use std::time::Duration;
use tracing::Instrument;

use super::error::ApiError;
use crate::application::context::RequestContext;

/// 请求上下文 + 日志中间件
///
/// 为每个请求创建带 deadline 的 [`RequestContext`]，放入 extensions
/// 供 Handler 显式取用；4xx/5xx 响应记录日志，日志以 trace_id 关联。
pub async fn request_context_middleware(
    timeout: Duration,
    mut request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let ctx = RequestContext::with_timeout(timeout);
    let trace_id = ctx.trace_id;
    request.extensions_mut().insert(ctx);

    let span = tracing::info_span!("request", trace_id = %trace_id);
    let response = next.run(request).instrument(span).await;

    let status = response.status();
    if status.is_server_error() {
        tracing::error!(
            trace_id = %trace_id,
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP server error"
        );
    } else if status.is_client_error() {
        tracing::warn!(
            trace_id = %trace_id,
            method = %method,
            uri = %uri,
            status = %status.as_u16(),
            "HTTP client error"
        );
    }

    response
}

/// Panic 恢复中间件
///
/// Handler 内任何未捕获的 panic 在此转成 500 Internal 信封，
/// panic 细节只进日志。
pub async fn recovery_middleware(request: Request, next: Next) -> Response {
    match AssertUnwindSafe(next.run(request)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            let detail = panic
                .downcast_ref::<String>()
                .map(String::as_str)
                .or_else(|| panic.downcast_ref::<&str>().copied())
                .unwrap_or("unknown panic")
                .to_string();

            ApiError::Internal {
                message: "request handler panicked".to_string(),
                cause: Some(detail),
            }
            .into_response()
        }
    }
}

/// 鉴权占位凭证
#[derive(Debug, Clone)]
pub struct AuthToken(pub Option<String>);

/// 鉴权占位中间件
///
/// 解析 `Authorization: Bearer <token>` 放入 extensions，从不拒绝请求。
/// 真实鉴权方案不在本服务范围内。
pub async fn auth_stub_middleware(mut request: Request, next: Next) -> Response {
    let token = request
        .headers()
        .get(http::header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string());

    request.extensions_mut().insert(AuthToken(token));
    next.run(request).await
}
