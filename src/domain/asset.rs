// ==========================================
// 设备绩效指标引擎 - 设备领域模型
// ==========================================
// 职责: 设备主数据及其所属系统
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Asset - 设备
// ==========================================
// 未归属系统的设备不参与系统聚合,但计入全厂统计
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    pub asset_id: String,          // 设备ID
    pub asset_name: Option<String>, // 设备名称
    pub system_id: Option<String>, // 所属系统ID
}

impl Asset {
    pub fn new(asset_id: impl Into<String>, system_id: Option<&str>) -> Self {
        Self {
            asset_id: asset_id.into(),
            asset_name: None,
            system_id: system_id.map(|s| s.to_string()),
        }
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.asset_name = Some(name.to_string());
        self
    }
}
