//! 可选的取消能力
//!
//! 不取消时链的行为完全不变；取消也不给轮询加任何超时

use std::future::Future;
use std::sync::Arc;
use tokio::sync::watch;

use crate::error::{AppError, AppResult};

/// 取消令牌，克隆后共享同一个取消状态
#[derive(Debug, Clone)]
pub struct CancelToken {
    tx: Arc<watch::Sender<bool>>,
}

impl CancelToken {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    pub fn cancel(&self) {
        self.tx.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.tx.borrow()
    }

    /// 等待直到被取消
    pub async fn cancelled(&self) {
        let mut rx = self.tx.subscribe();
        while !*rx.borrow_and_update() {
            // 发送端由 self 持有，changed() 不会因为关闭而返回错误
            if rx.changed().await.is_err() {
                return;
            }
        }
    }
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

/// 在取消令牌触发前运行 future，触发后返回 `AppError::Cancelled`
pub async fn with_cancel<T>(
    token: &CancelToken,
    future: impl Future<Output = AppResult<T>>,
) -> AppResult<T> {
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(AppError::Cancelled),
        result = future => result,
    }
}
