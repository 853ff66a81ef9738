//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（UserRepository）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - context: 每请求上下文（trace id + deadline）
//! - error: 应用层错误定义（四种 kind）
//! - views: Service 返回的视图模型

pub mod commands;
pub mod context;
pub mod error;
pub mod ports;
pub mod queries;
pub mod views;

// Re-exports
pub use commands::{
    handlers::{CreateUserHandler, DeleteUserHandler, UpdateUserHandler},
    CreateUser, DeleteUser, UpdateUser,
};

pub use context::RequestContext;

pub use error::DomainError;

pub use ports::{RepositoryError, UserRecord, UserRepositoryPort};

pub use queries::{
    handlers::{GetUserHandler, ListUsersHandler},
    GetUser, ListUsers,
};

pub use views::UserView;
