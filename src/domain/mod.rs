//! 领域层
//!
//! Bounded Contexts:
//! - User Context: 用户目录上下文

pub mod user;

pub use user::{Email, User, UserError, UserId, UserName};
