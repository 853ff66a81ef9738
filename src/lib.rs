//! Nexo - 用户目录 API 服务
//!
//! 架构设计: 分层 + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - User Context: 用户聚合与值对象（ID、Email、Name）
//!
//! 应用层 (application/):
//! - Ports: UserRepository 端口定义
//! - Commands: CQRS 命令处理器（创建/更新/删除）
//! - Queries: CQRS 查询处理器（单查/列表）
//! - Context: 每请求上下文（trace id + deadline）
//! - Error: 四种 kind 的领域错误
//!
//! 基础设施层 (infrastructure/):
//! - HTTP: RESTful API（路由、中间件、Responder）
//! - Memory: UserRepository 内存实现
//! - Persistence: SQLite 存储
//!
//! 请求沿 Router → Handler → Service → Repository 单向流动，
//! 结果沿同一路径反向回卷；跨层错误必须是
//! NotFound / Conflict / Invalid / Internal 之一。

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
