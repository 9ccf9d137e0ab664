//! 任务组合原语
//!
//! 所有编排操作都由这几个组合子拼出来：
//! - `then`：先完成 A，再用 A 的结果启动 B；A 失败则 B 不会执行
//! - `delay_then`：等待至少 `delay` 之后再开始后续任务
//! - `for_each_sequential`：逐个执行，遇到第一个失败立即停止
//!
//! 同一条链上的各阶段严格串行，整条链只产生一个最终结果

use std::future::Future;
use std::time::Duration;

use crate::error::AppResult;

/// 顺序组合两个异步阶段
pub async fn then<A, B, F, Fut>(first: impl Future<Output = AppResult<A>>, next: F) -> AppResult<B>
where
    F: FnOnce(A) -> Fut,
    Fut: Future<Output = AppResult<B>>,
{
    let value = first.await?;
    next(value).await
}

/// 延迟之后再执行后续任务
///
/// 计时从本阶段开始时算起，而不是从整条链开始时算起。
/// `delay` 为 0 时不经过计时器，但仍让出一次执行权，
/// 否则立即完成的远程调用会让轮询在一次 poll 里无限循环
pub async fn delay_then<T, F, Fut>(delay: Duration, continuation: F) -> AppResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = AppResult<T>>,
{
    if delay.is_zero() {
        tokio::task::yield_now().await;
    } else {
        tokio::time::sleep(delay).await;
    }
    continuation().await
}

/// 对每个元素依次执行异步任务
///
/// 第 k 个失败时，前 k-1 个已经完成且不会回滚，返回第 k 个的错误
pub async fn for_each_sequential<I, F, Fut>(items: I, mut f: F) -> AppResult<usize>
where
    I: IntoIterator,
    F: FnMut(I::Item) -> Fut,
    Fut: Future<Output = AppResult<()>>,
{
    let mut completed = 0;
    for item in items {
        f(item).await?;
        completed += 1;
    }
    Ok(completed)
}
