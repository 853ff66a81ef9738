//! 查询处理器

mod user_query_handlers;

pub use user_query_handlers::{GetUserHandler, ListUsersHandler};
