//! 应用层端口定义

mod repositories;

pub use repositories::{RepositoryError, UserRecord, UserRepositoryPort};
