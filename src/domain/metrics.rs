// ==========================================
// 设备绩效指标引擎 - 指标输出模型
// ==========================================
// 职责: 引擎输出的只读数据,供驾驶舱直接渲染
// 红线: 所有百分比均已限制在 [0, 100]
// ==========================================

use crate::domain::period::ResolvedPeriod;
use crate::domain::types::AlertReason;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// AssetMetrics - 单设备周期指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetMetrics {
    pub asset_id: String,
    pub system_id: Option<String>,
    pub utilization_pct: f64,  // 利用率
    pub availability_pct: f64, // 可用率
    pub reliability_pct: f64,  // 可靠度
    pub target: f64,           // 告警目标（透传给展示层）
}

impl AssetMetrics {
    /// 是否低于目标（可用率或可靠度任一低于即告警）
    pub fn is_below_target(&self, target: f64) -> bool {
        self.availability_pct < target || self.reliability_pct < target
    }
}

// ==========================================
// SystemMetrics - 系统聚合指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemMetrics {
    pub system_id: String,
    pub availability_pct: f64,
    pub reliability_pct: f64,
    pub asset_count: usize, // 参与聚合的设备数
}

// ==========================================
// FleetSummary - 全厂汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSummary {
    pub avg_utilization_pct: f64,
    pub avg_availability_pct: f64,
    pub avg_reliability_pct: f64,
    pub connected_asset_count: usize,
    pub total_asset_count: usize,
    pub alert_count: usize,
}

impl FleetSummary {
    pub fn empty(total_asset_count: usize) -> Self {
        Self {
            avg_utilization_pct: 0.0,
            avg_availability_pct: 0.0,
            avg_reliability_pct: 0.0,
            connected_asset_count: 0,
            total_asset_count,
            alert_count: 0,
        }
    }
}

// ==========================================
// AssetAlert - 设备告警明细
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetAlert {
    pub asset_id: String,
    pub system_id: Option<String>,
    pub availability_pct: f64,
    pub reliability_pct: f64,
    pub target: f64,
    pub reasons: Vec<AlertReason>,
}

// ==========================================
// TrendPoint - 月度趋势点
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub metrics: AssetMetrics,
}

// ==========================================
// MetricsDashboard - 驾驶舱整体输出
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsDashboard {
    pub period: ResolvedPeriod,
    pub target: f64,
    pub asset_metrics: Vec<AssetMetrics>,
    pub system_metrics: Vec<SystemMetrics>,
    pub fleet_summary: FleetSummary,
    pub alerts: Vec<AssetAlert>,
}
