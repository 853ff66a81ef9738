//! Data Transfer Objects
//!
//! 统一响应信封：成功为 `{"data": <payload>}`，
//! 错误信封见 `error.rs`。

use serde::Serialize;

/// 统一成功响应格式
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}
