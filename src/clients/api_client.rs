//! 远程 API 能力
//!
//! 每个远程操作对应一个异步方法。编排层只依赖这个 trait，
//! 传输、鉴权、编码都由实现方负责

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{Document, Extraction, ExtractionMap, Layout, PreviewSize};

#[async_trait]
pub trait ApiClient: Send + Sync {
    /// 上传文档。不提供 `doc_type` 时，服务端部分专用处理不会启用
    async fn create_document(
        &self,
        filename: &str,
        content: Vec<u8>,
        doc_type: Option<&str>,
    ) -> AppResult<Document>;

    async fn fetch_document(&self, document_id: &str) -> AppResult<Document>;

    async fn fetch_extractions(&self, document_id: &str) -> AppResult<ExtractionMap>;

    /// 包括仍处于孵化阶段的 extractions
    async fn fetch_incubator_extractions(&self, document_id: &str) -> AppResult<ExtractionMap>;

    async fn submit_feedback(&self, document_id: &str, extraction: &Extraction) -> AppResult<()>;

    async fn delete_document(&self, document_id: &str) -> AppResult<()>;

    /// `page` 从 1 开始
    async fn fetch_preview(
        &self,
        document_id: &str,
        page: u32,
        size: PreviewSize,
    ) -> AppResult<Vec<u8>>;

    async fn fetch_layout(&self, document_id: &str) -> AppResult<Layout>;

    /// 返回服务端分配的 errorId
    async fn submit_error_report(
        &self,
        document_id: &str,
        summary: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<String>;
}
