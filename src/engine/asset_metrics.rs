// ==========================================
// 设备绩效指标引擎 - 单设备指标计算器
// ==========================================
// 职责: 将一台设备在周期内的日运行记录归约为三项百分比
// 输入: 日运行记录 + 已解析周期 + 告警目标
// 输出: AssetMetrics (利用率 / 可用率 / 可靠度)
// ==========================================
// 红线: 待机小时逐条截断后再累加,不允许用总量倒推
// 红线: 任何有限输入都不报错,结果一律限制在 [0, 100]
// ==========================================

use crate::domain::metrics::AssetMetrics;
use crate::domain::observation::ObservationRecord;
use crate::domain::period::ResolvedPeriod;
use crate::domain::types::clamp_pct;
use tracing::{debug, trace};

// ==========================================
// HourTotals - 周期内小时累计
// ==========================================
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct HourTotals {
    pub uptime: f64,
    pub unplanned: f64,
    pub planned: f64,
    pub standby: f64,
    pub record_count: usize,
}

impl HourTotals {
    /// 按输入顺序累加（顺序固定,保证浮点结果可复现）
    pub fn accumulate(records: &[ObservationRecord]) -> Self {
        records.iter().fold(Self::default(), |mut acc, r| {
            acc.uptime += r.uptime_hours;
            acc.unplanned += r.unplanned_shutdown_hours;
            acc.planned += r.planned_shutdown_hours;
            acc.standby += r.standby_hours();
            acc.record_count += 1;
            acc
        })
    }
}

// ==========================================
// AssetMetricsCalculator - 单设备指标计算器
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct AssetMetricsCalculator;

impl AssetMetricsCalculator {
    pub fn new() -> Self {
        Self
    }

    /// 计算单设备周期指标
    ///
    /// # 前置条件
    /// `records` 已限定为该设备、且日期落在 [period.start, period.end] 内。
    /// 本方法不再按日期过滤,需要时先调用 [`Self::filter_to_period`]。
    ///
    /// # 公式 (H = total_days × 24)
    /// - 利用率 = 100 × Σ运行 / H
    /// - 可用率 = 100 × (Σ运行 + Σ待机) / H
    /// - 可靠度 = 100 × (H - Σ非计划 - Σ计划) / (H - Σ计划)，分母 <= 0 时为 0
    /// - H = 0 时三项均为 0
    pub fn compute(
        &self,
        asset_id: &str,
        system_id: Option<&str>,
        records: &[ObservationRecord],
        period: &ResolvedPeriod,
        target: f64,
    ) -> AssetMetrics {
        let totals = HourTotals::accumulate(records);
        let h = period.total_hours();

        let (utilization_pct, availability_pct, reliability_pct) = if h <= 0.0 {
            (0.0, 0.0, 0.0)
        } else {
            let utilization = 100.0 * totals.uptime / h;
            let availability = 100.0 * (totals.uptime + totals.standby) / h;
            let denominator = h - totals.planned;
            let reliability = if denominator <= 0.0 {
                0.0
            } else {
                100.0 * (h - totals.unplanned - totals.planned) / denominator
            };
            (
                clamp_pct(utilization),
                clamp_pct(availability),
                clamp_pct(reliability),
            )
        };

        trace!(
            asset_id,
            uptime = totals.uptime,
            unplanned = totals.unplanned,
            planned = totals.planned,
            standby = totals.standby,
            "小时累计"
        );
        debug!(
            asset_id,
            records = totals.record_count,
            total_days = period.total_days,
            utilization_pct,
            availability_pct,
            reliability_pct,
            "设备指标计算完成"
        );

        AssetMetrics {
            asset_id: asset_id.to_string(),
            system_id: system_id.map(|s| s.to_string()),
            utilization_pct,
            availability_pct,
            reliability_pct,
            target,
        }
    }

    /// 过滤掉不属于该设备或不在周期内的记录
    ///
    /// 保持输入顺序
    pub fn filter_to_period(
        &self,
        asset_id: &str,
        records: &[ObservationRecord],
        period: &ResolvedPeriod,
    ) -> Vec<ObservationRecord> {
        let kept: Vec<ObservationRecord> = records
            .iter()
            .filter(|r| r.asset_id == asset_id && period.contains(r.date))
            .cloned()
            .collect();

        if kept.len() != records.len() {
            debug!(
                asset_id,
                dropped = records.len() - kept.len(),
                "丢弃窗口外记录"
            );
        }
        kept
    }
}
