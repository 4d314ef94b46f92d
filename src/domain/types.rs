// ==========================================
// 设备绩效指标引擎 - 领域类型定义
// ==========================================
// 职责: 指标引擎共用的枚举与常量
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

/// 每日小时数
pub const HOURS_PER_DAY: f64 = 24.0;

/// 默认告警目标（百分比）
pub const DEFAULT_TARGET_PCT: f64 = 95.0;

// ==========================================
// 统计周期类型 (Period Kind)
// ==========================================
// 序列化格式: 小写 (与配置表一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Year,  // 自然年
    Range, // 自定义起止日期
}

impl fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PeriodKind::Year => write!(f, "year"),
            PeriodKind::Range => write!(f, "range"),
        }
    }
}

impl PeriodKind {
    /// 从字符串解析（大小写不敏感）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "year" => Some(PeriodKind::Year),
            "range" => Some(PeriodKind::Range),
            _ => None,
        }
    }
}

// ==========================================
// 告警原因 (Alert Reason)
// ==========================================
// 一台设备可同时命中两个原因
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertReason {
    AvailabilityBelowTarget, // 可用率低于目标
    ReliabilityBelowTarget,  // 可靠度低于目标
}

impl fmt::Display for AlertReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AlertReason::AvailabilityBelowTarget => write!(f, "AVAILABILITY_BELOW_TARGET"),
            AlertReason::ReliabilityBelowTarget => write!(f, "RELIABILITY_BELOW_TARGET"),
        }
    }
}

/// 把百分比限制在 [0, 100]
///
/// NaN 视为 0，保证输出总在区间内
pub fn clamp_pct(value: f64) -> f64 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}
