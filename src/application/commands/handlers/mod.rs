//! 命令处理器

mod user_command_handlers;

pub use user_command_handlers::{CreateUserHandler, DeleteUserHandler, UpdateUserHandler};
