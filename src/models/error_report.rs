use serde::{Deserialize, Serialize};

/// 错误报告
///
/// 只能通过 `DocumentTaskManager::error_report_for_document` 创建，
/// `error_id` 由服务端分配，可用于向技术支持引用该问题
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub document_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "errorId")]
    pub error_id: String,
}
