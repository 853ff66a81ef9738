//! Infrastructure Layer - 基础设施层
//!
//! - http: RESTful API（路由、中间件、Responder）
//! - memory: UserRepository 内存实现
//! - persistence: SQLite 存储

pub mod http;
pub mod memory;
pub mod persistence;
