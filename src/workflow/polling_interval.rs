//! 轮询间隔
//!
//! 编排器持有的唯一可变共享状态。进行中的轮询每次等待前重新读取，
//! 写入对之后的等待可见即可，不需要锁

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct PollingInterval {
    nanos: Arc<AtomicU64>,
}

impl PollingInterval {
    pub fn new(interval: Duration) -> Self {
        Self {
            nanos: Arc::new(AtomicU64::new(to_nanos(interval))),
        }
    }

    pub fn get(&self) -> Duration {
        Duration::from_nanos(self.nanos.load(Ordering::Relaxed))
    }

    /// 0 表示在组合原语允许的范围内尽快轮询
    pub fn set(&self, interval: Duration) {
        self.nanos.store(to_nanos(interval), Ordering::Relaxed);
    }
}

impl Default for PollingInterval {
    fn default() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

fn to_nanos(interval: Duration) -> u64 {
    u64::try_from(interval.as_nanos()).unwrap_or(u64::MAX)
}
