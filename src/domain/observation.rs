// ==========================================
// 设备绩效指标引擎 - 日运行记录领域模型
// ==========================================
// 职责: 单台设备单日的运行/停机小时数
// 红线: 待机小时只派生,不落库
// ==========================================

use crate::domain::types::HOURS_PER_DAY;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ObservationRecord - 日运行记录
// ==========================================
// 约束: 同一设备同一日期唯一
// 四类小时数之和不要求恰好等于 24
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObservationRecord {
    pub asset_id: String,              // 设备ID
    pub date: NaiveDate,               // 记录日期
    pub uptime_hours: f64,             // 运行小时
    pub unplanned_shutdown_hours: f64, // 非计划停机小时
    pub planned_shutdown_hours: f64,   // 计划停机小时
}

impl ObservationRecord {
    pub fn new(
        asset_id: impl Into<String>,
        date: NaiveDate,
        uptime_hours: f64,
        unplanned_shutdown_hours: f64,
        planned_shutdown_hours: f64,
    ) -> Self {
        Self {
            asset_id: asset_id.into(),
            date,
            uptime_hours,
            unplanned_shutdown_hours,
            planned_shutdown_hours,
        }
    }

    /// 已记录小时合计（运行 + 非计划停机 + 计划停机）
    pub fn accounted_hours(&self) -> f64 {
        self.uptime_hours + self.unplanned_shutdown_hours + self.planned_shutdown_hours
    }

    /// 待机小时
    ///
    /// `max(0, 24 - 已记录小时)`，超过 24 的部分按 0 吸收
    pub fn standby_hours(&self) -> f64 {
        (HOURS_PER_DAY - self.accounted_hours()).max(0.0)
    }

    /// 已记录小时是否超过一天
    pub fn is_over_24h(&self) -> bool {
        self.accounted_hours() > HOURS_PER_DAY
    }
}
