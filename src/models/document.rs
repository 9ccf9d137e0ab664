use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

use super::extraction::ExtractionMap;

/// 文档的远程处理状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DocumentState {
    Pending,
    Processing,
    #[serde(rename = "COMPLETED", alias = "COMPLETE")]
    Complete,
    Error,
}

impl DocumentState {
    /// 终态：轮询到此状态即停止
    pub fn is_terminal(self) -> bool {
        matches!(self, DocumentState::Complete | DocumentState::Error)
    }
}

impl Display for DocumentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DocumentState::Pending => "PENDING",
            DocumentState::Processing => "PROCESSING",
            DocumentState::Complete => "COMPLETED",
            DocumentState::Error => "ERROR",
        };
        f.write_str(name)
    }
}

/// 文档快照
///
/// 每次远程读取成功都会得到一个新的快照，编排层不会原地修改已有快照，
/// 也不会合并两个快照的字段
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    #[serde(rename = "name")]
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc_type: Option<String>,
    #[serde(rename = "progress")]
    pub state: DocumentState,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_count: Option<u32>,
    #[serde(
        default,
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub creation_date: Option<DateTime<Utc>>,
    /// 只有在获取过 extractions 之后才会有内容
    #[serde(default, skip_serializing_if = "ExtractionMap::is_empty")]
    pub extractions: ExtractionMap,
}

impl Document {
    pub fn new(id: impl Into<String>, filename: impl Into<String>, state: DocumentState) -> Self {
        Self {
            id: id.into(),
            filename: filename.into(),
            doc_type: None,
            state,
            page_count: None,
            creation_date: None,
            extractions: ExtractionMap::new(),
        }
    }

    /// 返回带有给定 extractions 的新快照
    pub fn with_extractions(self, extractions: ExtractionMap) -> Self {
        Self {
            extractions,
            ..self
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == DocumentState::Complete
    }

    /// 页码是否有效（从 1 开始；页数未知时只检查下界）
    pub fn has_page(&self, page: u32) -> bool {
        page >= 1 && self.page_count.map_or(true, |count| page <= count)
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[文档 {} ({}) 状态#{}]", self.id, self.filename, self.state)
    }
}
