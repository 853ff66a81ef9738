//! Request Context - 请求上下文
//!
//! 每次调用的短生命周期横切值（trace id、deadline），
//! 由中间件创建，沿 Handler → Service → Repository 显式传递，
//! 任何组件都不得在调用生命周期之外持有它。

use std::time::{Duration, Instant};

use uuid::Uuid;

/// 请求上下文
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// 链路追踪 ID，贯穿一次请求的所有日志
    pub trace_id: Uuid,
    /// 绝对截止时间；None 表示无限期（仅测试/内部调用使用）
    pub deadline: Option<Instant>,
}

impl RequestContext {
    /// 创建无 deadline 的上下文
    pub fn new() -> Self {
        Self {
            trace_id: Uuid::new_v4(),
            deadline: None,
        }
    }

    /// 创建带 deadline 的上下文（从现在起 `timeout` 之后到期）
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            trace_id: Uuid::new_v4(),
            deadline: Some(Instant::now() + timeout),
        }
    }

    /// 剩余时间
    ///
    /// - `None`: 无 deadline
    /// - `Some(ZERO)`: deadline 已到期
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// deadline 是否已到期
    pub fn is_expired(&self) -> bool {
        matches!(self.remaining(), Some(remaining) if remaining.is_zero())
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
