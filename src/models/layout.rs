use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// 文档版面结构
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Layout {
    #[serde(default)]
    pub pages: Vec<PageLayout>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageLayout {
    pub number: u32,
    #[serde(default, alias = "sizeX")]
    pub width: f64,
    #[serde(default, alias = "sizeY")]
    pub height: f64,
    /// 文本区域结构由服务端定义，这里保留原始 JSON
    #[serde(default)]
    pub text_zones: Vec<JsonValue>,
}

/// 预览图尺寸
///
/// 这是最大尺寸，实际返回的图片可能略小
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreviewSize {
    /// 750x900
    Medium,
    /// 1280x1810
    Big,
}

impl PreviewSize {
    pub fn max_width(self) -> u32 {
        match self {
            PreviewSize::Medium => 750,
            PreviewSize::Big => 1280,
        }
    }

    pub fn max_height(self) -> u32 {
        match self {
            PreviewSize::Medium => 900,
            PreviewSize::Big => 1810,
        }
    }

    /// 接口路径中的尺寸片段，如 `750x900`
    pub fn as_path_segment(self) -> String {
        format!("{}x{}", self.max_width(), self.max_height())
    }
}
