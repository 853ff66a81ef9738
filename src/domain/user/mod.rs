//! User Context - 用户目录上下文

mod entity;
mod errors;
mod value_objects;

pub use entity::User;
pub use errors::UserError;
pub use value_objects::{Email, UserId, UserName};
