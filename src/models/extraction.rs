use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// extraction 名称 → Extraction
pub type ExtractionMap = BTreeMap<String, Extraction>;

/// 远程处理得到的一个字段值（如金额、日期），可以通过反馈修正
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Extraction {
    /// 字段名（接口里是 map 的 key）
    #[serde(default)]
    pub name: String,
    /// 实体类型，如 amount / date / iban
    #[serde(default)]
    pub entity: String,
    pub value: String,
    /// 第一次被修改前的服务端值
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Extraction {
    pub fn new(
        name: impl Into<String>,
        entity: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            entity: entity.into(),
            value: value.into(),
            original_value: None,
            confidence: None,
        }
    }

    /// 修改值，保留服务端原始值以便比较
    pub fn set_value(&mut self, value: impl Into<String>) {
        if self.original_value.is_none() {
            self.original_value = Some(self.value.clone());
        }
        self.value = value.into();
    }

    /// 当前值是否与服务端原始值不同
    pub fn is_modified(&self) -> bool {
        self.original_value
            .as_deref()
            .is_some_and(|original| original != self.value)
    }
}
