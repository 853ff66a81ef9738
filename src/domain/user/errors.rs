//! User Context - Errors

use thiserror::Error;

#[derive(Debug, Error)]
pub enum UserError {
    #[error("invalid user id: {0}")]
    InvalidId(String),

    #[error("invalid email: {0}")]
    InvalidEmail(String),

    #[error("invalid name: {0}")]
    InvalidName(String),
}
