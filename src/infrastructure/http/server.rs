//! HTTP Server
//!
//! Axum HTTP 服务器启动和配置

use std::sync::Arc;
use std::time::Duration;

use axum::extract::Request;
use axum::middleware::{self, Next};
use axum::Router;
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use super::middleware::{auth_stub_middleware, recovery_middleware, request_context_middleware};
use super::routes::create_routes;
use super::state::AppState;

/// 服务器配置
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// 每请求 deadline（秒），写入 RequestContext
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            request_timeout_secs: 10,
        }
    }
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16, request_timeout_secs: u64) -> Self {
        Self {
            host: host.into(),
            port,
            request_timeout_secs,
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// 组装完整的请求管线
///
/// 中间件从外到内：trace → request context → recovery → auth stub → 路由。
/// recovery 在 context 之内，panic 信封也带 trace 日志；
/// Responder 对每个请求恰好执行一次。
pub fn build_app(state: Arc<AppState>, request_timeout: Duration) -> Router {
    // CORS 配置 - 允许所有来源的跨域请求
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers([AUTHORIZATION, CONTENT_TYPE])
        .max_age(Duration::from_secs(3600));

    create_routes()
        .layer(middleware::from_fn(auth_stub_middleware))
        .layer(middleware::from_fn(recovery_middleware))
        .layer(middleware::from_fn(move |request: Request, next: Next| {
            request_context_middleware(request_timeout, request, next)
        }))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// HTTP 服务器
pub struct HttpServer {
    config: ServerConfig,
    state: Arc<AppState>,
}

impl HttpServer {
    /// 创建新的 HTTP 服务器
    pub fn new(config: ServerConfig, state: AppState) -> Self {
        Self {
            config,
            state: Arc::new(state),
        }
    }

    /// 创建带默认配置的服务器
    pub fn with_default_config(state: AppState) -> Self {
        Self::new(ServerConfig::default(), state)
    }

    fn build_router(&self) -> Router {
        build_app(
            self.state.clone(),
            Duration::from_secs(self.config.request_timeout_secs),
        )
    }

    /// 启动服务器
    pub async fn run(self) -> Result<(), std::io::Error> {
        let router = self.build_router();
        let addr = self.config.addr();

        info!("Starting HTTP server on {}", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router).await?;

        Ok(())
    }

    /// 启动服务器（带优雅关闭）
    pub async fn run_with_shutdown<F>(self, shutdown_signal: F) -> Result<(), std::io::Error>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let router = self.build_router();
        let addr = self.config.addr();

        info!("Starting HTTP server on {} (with graceful shutdown)", addr);

        let listener = TcpListener::bind(&addr).await?;
        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::memory::InMemoryUserRepository;
    use axum::body::Body;
    use axum::http::{header, Request as HttpRequest, StatusCode};
    use tower::util::ServiceExt;

    fn test_app() -> Router {
        let repo = Arc::new(InMemoryUserRepository::new());
        let state = Arc::new(AppState::new(repo));
        build_app(state, Duration::from_secs(5))
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: &str) -> HttpRequest<Body> {
        HttpRequest::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    fn get_request(uri: &str) -> HttpRequest<Body> {
        HttpRequest::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_ping() {
        let app = test_app();
        let response = app.oneshot(get_request("/ping")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_missing_user_by_query_is_404_envelope() {
        let app = test_app();
        let response = app.oneshot(get_request("/users?id=42")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .unwrap()
                .to_str()
                .unwrap(),
            "application/json"
        );

        let body = body_json(response).await;
        assert_eq!(body["error"]["kind"], "NotFound");
        assert!(body["error"]["message"].is_string());
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/users",
                r#"{"id":"42","email":"alice@example.com","name":"Alice"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        let body = body_json(response).await;
        assert_eq!(body["data"]["id"], "42");
        assert_eq!(body["data"]["email"], "alice@example.com");

        let response = app.oneshot(get_request("/users/42")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["id"], "42");
        assert_eq!(body["data"]["name"], "Alice");
    }

    #[tokio::test]
    async fn test_duplicate_email_is_409_conflict() {
        let app = test_app();
        let payload = r#"{"email":"bob@example.com","name":"Bob"}"#;

        let response = app
            .clone()
            .oneshot(json_request("POST", "/users", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .oneshot(json_request("POST", "/users", payload))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
        let body = body_json(response).await;
        assert_eq!(body["error"]["kind"], "Conflict");
    }

    #[tokio::test]
    async fn test_malformed_json_is_400_invalid() {
        let app = test_app();

        let response = app
            .oneshot(json_request("POST", "/users", r#"{"email": "#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["kind"], "Invalid");
    }

    #[tokio::test]
    async fn test_invalid_email_is_400_invalid() {
        let app = test_app();

        let response = app
            .oneshot(json_request(
                "POST",
                "/users",
                r#"{"email":"not-an-email","name":"Eve"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["error"]["kind"], "Invalid");
    }

    #[tokio::test]
    async fn test_update_and_delete_flow() {
        let app = test_app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/users",
                r#"{"id":"7","email":"carol@example.com","name":"Carol"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let response = app
            .clone()
            .oneshot(json_request(
                "PUT",
                "/users/7",
                r#"{"email":"caroline@example.com","name":"Caroline"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["email"], "caroline@example.com");

        let response = app
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .method("DELETE")
                    .uri("/users/7")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"]["id"], "7");

        let response = app.oneshot(get_request("/users/7")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_missing_is_404() {
        let app = test_app();

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .method("DELETE")
                    .uri("/users/missing")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"]["kind"], "NotFound");
    }

    #[tokio::test]
    async fn test_list_users_returns_data_array() {
        let app = test_app();

        for (id, email) in [("1", "a@example.com"), ("2", "b@example.com")] {
            let payload =
                format!(r#"{{"id":"{}","email":"{}","name":"User"}}"#, id, email);
            let response = app
                .clone()
                .oneshot(json_request("POST", "/users", &payload))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::CREATED);
        }

        let response = app.oneshot(get_request("/users")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["data"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_method_mismatch_is_json_envelope() {
        let app = test_app();

        // 路径存在但方法不匹配：不得落到框架默认的空 405 响应
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .method("PATCH")
                    .uri("/users/42")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            response
                .headers()
                .get(header::CONTENT_TYPE)
                .unwrap()
                .to_str()
                .unwrap(),
            "application/json"
        );
        let body = body_json(response).await;
        assert_eq!(body["error"]["kind"], "NotFound");
        assert!(body["error"]["message"].is_string());
    }

    #[tokio::test]
    async fn test_unknown_route_is_404_envelope() {
        let app = test_app();

        let response = app.oneshot(get_request("/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        // 与 Responder 的 NotFound 信封同形
        assert_eq!(body["error"]["kind"], "NotFound");
        assert!(body["error"]["message"].is_string());
    }
}
