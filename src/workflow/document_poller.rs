//! 文档轮询状态机 - 流程层
//!
//! 每一轮：
//! 1. `fetch_document(id)`
//! 2. 状态为终态（COMPLETED / ERROR）→ 以该快照结束
//! 3. 否则至少等待 `polling_interval`，回到 1
//!
//! `fetch_document` 调用本身失败时立即失败，不重试。
//! ERROR 是服务端给出的有效信息，按成功结果返回，调用方需要检查 `state`。
//! 没有次数上限也没有总超时

use std::sync::Arc;
use tracing::{debug, info};

use crate::clients::ApiClient;
use crate::error::AppResult;
use crate::models::{Document, DocumentState};
use crate::tasks::{delay_then, then};
use crate::workflow::PollingInterval;

/// 单次观察之后的决定
#[derive(Debug, Clone, PartialEq)]
pub enum PollDecision {
    /// 已到终态
    Resolved(Document),
    /// 仍在处理中，等待后继续
    Continue(DocumentState),
}

impl PollDecision {
    pub fn from_snapshot(document: Document) -> Self {
        if document.state.is_terminal() {
            PollDecision::Resolved(document)
        } else {
            PollDecision::Continue(document.state)
        }
    }
}

/// 文档轮询器
///
/// 每次调用 `poll` 都是一条独立的轮询链，同一个文档ID的并发轮询不做去重
pub struct DocumentPoller {
    client: Arc<dyn ApiClient>,
    interval: PollingInterval,
}

impl DocumentPoller {
    pub fn new(client: Arc<dyn ApiClient>, interval: PollingInterval) -> Self {
        Self { client, interval }
    }

    /// 轮询直到文档进入终态
    pub async fn poll(&self, document_id: &str) -> AppResult<Document> {
        let mut attempt = 1;
        let mut decision = self.observe(document_id, attempt).await?;

        loop {
            match decision {
                PollDecision::Resolved(document) => {
                    info!("✓ 轮询结束: {} (共 {} 次请求)", document, attempt);
                    return Ok(document);
                }
                PollDecision::Continue(state) => {
                    // 每次等待前重新读取，调用方可以随时调整节奏
                    let delay = self.interval.get();
                    debug!(
                        "文档 {} 状态 {}, {:?} 后进行第 {} 次请求",
                        document_id,
                        state,
                        delay,
                        attempt + 1
                    );
                    attempt += 1;
                    decision = delay_then(delay, || self.observe(document_id, attempt)).await?;
                }
            }
        }
    }

    async fn observe(&self, document_id: &str, attempt: usize) -> AppResult<PollDecision> {
        debug!("🔍 第 {} 次获取文档状态: {}", attempt, document_id);
        then(self.client.fetch_document(document_id), |document| async move {
            Ok(PollDecision::from_snapshot(document))
        })
        .await
    }
}
