//! 文档任务管理器 - 编排层
//!
//! 每个用户场景对应一个异步操作，由一个或多个远程调用串联而成。
//! 远程错误原样返回给调用方，本层不做重试

use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::clients::ApiClient;
use crate::config::Config;
use crate::error::{AppResult, UsageError};
use crate::models::{Document, ErrorReport, Extraction, ExtractionMap, Layout, PreviewSize};
use crate::tasks::{for_each_sequential, then, with_cancel, CancelToken};
use crate::workflow::{DocumentPoller, PollingInterval};

/// 文档任务管理器
pub struct DocumentTaskManager {
    client: Arc<dyn ApiClient>,
    polling_interval: PollingInterval,
}

impl DocumentTaskManager {
    /// 使用默认轮询间隔（1 秒）创建
    pub fn new(client: Arc<dyn ApiClient>) -> Self {
        Self {
            client,
            polling_interval: PollingInterval::default(),
        }
    }

    pub fn with_config(client: Arc<dyn ApiClient>, config: &Config) -> Self {
        Self {
            client,
            polling_interval: PollingInterval::new(config.polling_interval()),
        }
    }

    /// 两次状态请求之间的最小间隔
    pub fn polling_interval(&self) -> Duration {
        self.polling_interval.get()
    }

    /// 修改轮询间隔，对正在进行的轮询的下一次等待生效
    pub fn set_polling_interval(&self, interval: Duration) {
        self.polling_interval.set(interval);
    }

    fn poller(&self) -> DocumentPoller {
        DocumentPoller::new(self.client.clone(), self.polling_interval.clone())
    }

    /// 获取文档
    pub async fn get_document(&self, document_id: &str) -> AppResult<Document> {
        ensure_document_id(document_id)?;
        self.client.fetch_document(document_id).await
    }

    /// 上传图片创建文档
    ///
    /// 返回的文档大概率还在处理中，需要完整结果时请再调用 `poll_document`。
    /// 指定 `doc_type` 后服务端才会启用部分孵化中的 extractions
    pub async fn create_document(
        &self,
        filename: &str,
        image: Vec<u8>,
        doc_type: Option<&str>,
    ) -> AppResult<Document> {
        if filename.trim().is_empty() {
            return Err(UsageError::EmptyFilename.into());
        }

        info!(
            "📤 上传文档: {} ({} 字节, 类型: {})",
            filename,
            image.len(),
            doc_type.unwrap_or("未指定")
        );
        let document = self.client.create_document(filename, image, doc_type).await?;
        info!("✓ 文档已创建: {}", document);
        Ok(document)
    }

    /// 上传并等待处理完成
    pub async fn create_document_and_wait(
        &self,
        filename: &str,
        image: Vec<u8>,
        doc_type: Option<&str>,
    ) -> AppResult<Document> {
        then(self.create_document(filename, image, doc_type), |created| async move {
            self.poll_document(&created).await
        })
        .await
    }

    /// 把文档当前的所有 extraction 值作为反馈重新提交
    ///
    /// 逐个提交，某一个失败时整体失败；之前已提交的不会回滚
    pub async fn update_document(&self, document: &Document) -> AppResult<()> {
        info!(
            "📤 提交反馈: {} ({} 个 extractions)",
            document,
            document.extractions.len()
        );

        let submitted = for_each_sequential(document.extractions.values(), |extraction| {
            self.client.submit_feedback(&document.id, extraction)
        })
        .await
        .inspect_err(|e| warn!("⚠️ 反馈提交中断 {}: {}", document, e))?;

        info!("✓ 反馈提交完成: {} 个", submitted);
        Ok(())
    }

    /// 删除文档
    ///
    /// 删除后该文档的所有引用都已失效，再用它调用其他操作会得到 not-found
    pub async fn delete_document(&self, document: Document) -> AppResult<()> {
        info!("🗑️ 删除文档: {}", document);
        self.client.delete_document(&document.id).await
    }

    /// 轮询直到文档处理完成或出错
    ///
    /// 返回的是新获取的快照，传入的 `document` 不会被修改
    pub async fn poll_document(&self, document: &Document) -> AppResult<Document> {
        self.poll_document_with_id(&document.id).await
    }

    pub async fn poll_document_with_id(&self, document_id: &str) -> AppResult<Document> {
        ensure_document_id(document_id)?;
        self.poller().poll(document_id).await
    }

    /// 可取消的轮询；未取消时与 `poll_document_with_id` 完全相同
    pub async fn poll_document_with_cancel(
        &self,
        document_id: &str,
        token: &CancelToken,
    ) -> AppResult<Document> {
        with_cancel(token, self.poll_document_with_id(document_id)).await
    }

    /// 获取某一页的预览图
    ///
    /// `page` 从 1 开始（不是 0）；`size` 是最大尺寸
    pub async fn get_preview_for_page(
        &self,
        page: u32,
        document: &Document,
        size: PreviewSize,
    ) -> AppResult<Vec<u8>> {
        if !document.has_page(page) {
            return Err(UsageError::InvalidPage {
                page,
                page_count: document.page_count,
            }
            .into());
        }
        self.client.fetch_preview(&document.id, page, size).await
    }

    pub async fn get_extractions_for_document(
        &self,
        document: &Document,
    ) -> AppResult<ExtractionMap> {
        self.client.fetch_extractions(&document.id).await
    }

    /// 包括孵化中的 extractions
    pub async fn get_incubator_extractions_for_document(
        &self,
        document: &Document,
    ) -> AppResult<ExtractionMap> {
        self.client.fetch_incubator_extractions(&document.id).await
    }

    /// 为单个 extraction 提交反馈
    pub async fn update_extraction(
        &self,
        extraction: &Extraction,
        document: &Document,
    ) -> AppResult<()> {
        info!(
            "📤 提交反馈: {} {} = {}",
            document, extraction.name, extraction.value
        );
        self.client.submit_feedback(&document.id, extraction).await
    }

    pub async fn get_layout_for_document(&self, document: &Document) -> AppResult<Layout> {
        self.client.fetch_layout(&document.id).await
    }

    /// 为处理结果不理想的文档提交错误报告
    ///
    /// 返回的 errorId 可用于联系技术支持。文档所有者须同意将文档用于错误分析
    pub async fn error_report_for_document(
        &self,
        document: &Document,
        summary: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<ErrorReport> {
        let error_id = self
            .client
            .submit_error_report(&document.id, summary, description)
            .await?;
        info!("✓ 错误报告已提交: {} errorId={}", document, error_id);

        Ok(ErrorReport {
            document_id: document.id.clone(),
            summary: summary.map(str::to_string),
            description: description.map(str::to_string),
            error_id,
        })
    }
}

fn ensure_document_id(document_id: &str) -> AppResult<()> {
    if document_id.trim().is_empty() {
        return Err(UsageError::EmptyDocumentId.into());
    }
    Ok(())
}
