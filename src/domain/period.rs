// ==========================================
// 设备绩效指标引擎 - 统计周期领域模型
// ==========================================
// 职责: 用户选择的统计窗口及其解析结果
// ==========================================

use crate::domain::types::HOURS_PER_DAY;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// PeriodSpec - 统计窗口选择
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PeriodSpec {
    /// 自然年: 1月1日 ~ 12月31日
    Year { year: i32 },
    /// 自定义起止日期（闭区间，要求 start <= end）
    Range { start: NaiveDate, end: NaiveDate },
}

// ==========================================
// ResolvedPeriod - 解析后的闭区间
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolvedPeriod {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub total_days: i64,
}

impl ResolvedPeriod {
    /// 周期总小时数 (total_days × 24)
    pub fn total_hours(&self) -> f64 {
        self.total_days as f64 * HOURS_PER_DAY
    }

    /// 日期是否落在 [start, end] 内
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}
