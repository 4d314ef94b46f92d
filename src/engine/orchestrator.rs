// ==========================================
// 设备绩效指标引擎 - 指标编排器
// ==========================================
// 职责: 串联周期解析 → 单设备计算 → 系统聚合 / 全厂汇总
// 输入: 周期选择 + 设备清单 + 按设备分组的日运行记录 + 告警目标
// 输出: MetricsDashboard / 月度趋势
// ==========================================
// 红线: 编排器不访问数据库,记录由调用方取好后传入
// ==========================================

use crate::domain::asset::Asset;
use crate::domain::metrics::{AssetMetrics, MetricsDashboard, TrendPoint};
use crate::domain::observation::ObservationRecord;
use crate::domain::period::{PeriodSpec, ResolvedPeriod};
use crate::engine::asset_metrics::AssetMetricsCalculator;
use crate::engine::error::EngineResult;
use crate::engine::fleet_summary::FleetSummaryEvaluator;
use crate::engine::period_resolver::PeriodResolver;
use crate::engine::system_aggregator::SystemAggregator;
use std::collections::{BTreeMap, HashSet};
use tracing::{info, warn};

// ==========================================
// MetricsOrchestrator - 指标编排器
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct MetricsOrchestrator {
    resolver: PeriodResolver,
    calculator: AssetMetricsCalculator,
    aggregator: SystemAggregator,
    evaluator: FleetSummaryEvaluator,
}

impl MetricsOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// 生成驾驶舱指标
    ///
    /// # 参数
    /// - `spec`: 统计窗口
    /// - `assets`: 设备清单（决定输出顺序及设备总数）
    /// - `records`: 按 asset_id 分组的日运行记录
    /// - `target`: 告警目标百分比
    /// - `filter_out_of_window`: 计算前是否剔除窗口外记录
    ///
    /// # 说明
    /// - 清单中没有记录的设备仍输出一行指标
    /// - 接入设备 = 窗口内至少有一条记录的设备
    /// - 不在清单中的记录忽略
    pub fn build_dashboard(
        &self,
        spec: &PeriodSpec,
        assets: &[Asset],
        records: &BTreeMap<String, Vec<ObservationRecord>>,
        target: f64,
        filter_out_of_window: bool,
    ) -> EngineResult<MetricsDashboard> {
        let period = self.resolver.resolve(spec)?;

        let known: HashSet<&str> = assets.iter().map(|a| a.asset_id.as_str()).collect();
        let orphan_ids: Vec<&String> = records
            .keys()
            .filter(|id| !known.contains(id.as_str()))
            .collect();
        if !orphan_ids.is_empty() {
            warn!(orphans = ?orphan_ids, "存在未登记设备的运行记录,已忽略");
        }

        let mut connected = HashSet::new();
        let mut asset_metrics = Vec::with_capacity(assets.len());
        for asset in assets {
            let raw = records
                .get(&asset.asset_id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            let metrics = self.compute_asset(
                asset,
                raw,
                &period,
                target,
                filter_out_of_window,
                &mut connected,
            );
            asset_metrics.push(metrics);
        }

        let system_metrics = self.aggregator.aggregate(&asset_metrics);
        let fleet_summary =
            self.evaluator
                .summarize(&asset_metrics, &connected, assets.len(), target);
        let alerts = self.evaluator.list_alerts(&asset_metrics, target);

        info!(
            start = %period.start,
            end = %period.end,
            assets = asset_metrics.len(),
            systems = system_metrics.len(),
            alerts = alerts.len(),
            "驾驶舱指标生成完成"
        );

        Ok(MetricsDashboard {
            period,
            target,
            asset_metrics,
            system_metrics,
            fleet_summary,
            alerts,
        })
    }

    /// 单设备月度趋势
    ///
    /// 周期按自然月切分,每段独立计算。
    /// 切分后必须按段过滤,因此这里总是剔除段外记录。
    pub fn build_trend(
        &self,
        spec: &PeriodSpec,
        asset: &Asset,
        records: &[ObservationRecord],
        target: f64,
    ) -> EngineResult<Vec<TrendPoint>> {
        let period = self.resolver.resolve(spec)?;
        let parts = self.resolver.split_by_month(&period)?;

        let points = parts
            .into_iter()
            .map(|part| {
                let in_part = self
                    .calculator
                    .filter_to_period(&asset.asset_id, records, &part);
                let metrics = self.calculator.compute(
                    &asset.asset_id,
                    asset.system_id.as_deref(),
                    &in_part,
                    &part,
                    target,
                );
                TrendPoint {
                    start: part.start,
                    end: part.end,
                    metrics,
                }
            })
            .collect();

        Ok(points)
    }

    fn compute_asset(
        &self,
        asset: &Asset,
        raw: &[ObservationRecord],
        period: &ResolvedPeriod,
        target: f64,
        filter_out_of_window: bool,
        connected: &mut HashSet<String>,
    ) -> AssetMetrics {
        let asset_id = asset.asset_id.as_str();
        let system_id = asset.system_id.as_deref();

        if filter_out_of_window {
            let in_window = self.calculator.filter_to_period(asset_id, raw, period);
            if !in_window.is_empty() {
                connected.insert(asset.asset_id.clone());
            }
            self.calculator
                .compute(asset_id, system_id, &in_window, period, target)
        } else {
            if !raw.is_empty() {
                connected.insert(asset.asset_id.clone());
            }
            self.calculator
                .compute(asset_id, system_id, raw, period, target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::EngineError;
    use approx::assert_abs_diff_eq;
    use chrono::NaiveDate;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn grouped(records: Vec<ObservationRecord>) -> BTreeMap<String, Vec<ObservationRecord>> {
        let mut map: BTreeMap<String, Vec<ObservationRecord>> = BTreeMap::new();
        for r in records {
            map.entry(r.asset_id.clone()).or_default().push(r);
        }
        map
    }

    #[test]
    fn test_build_dashboard_end_to_end() {
        let spec = PeriodSpec::Range {
            start: d(2024, 6, 1),
            end: d(2024, 6, 2),
        };
        let assets = vec![
            Asset::new("A", Some("S1")),
            Asset::new("B", Some("S1")),
            Asset::new("C", None),
        ];
        let records = grouped(vec![
            ObservationRecord::new("A", d(2024, 6, 1), 20.0, 2.0, 0.0),
            ObservationRecord::new("A", d(2024, 6, 2), 24.0, 0.0, 0.0),
            ObservationRecord::new("B", d(2024, 6, 1), 12.0, 0.0, 0.0),
            // 窗口外,应被剔除
            ObservationRecord::new("B", d(2024, 7, 1), 24.0, 0.0, 0.0),
        ]);

        let dash = MetricsOrchestrator::new()
            .build_dashboard(&spec, &assets, &records, 95.0, true)
            .unwrap();

        assert_eq!(dash.period.total_days, 2);
        assert_eq!(dash.asset_metrics.len(), 3);
        let a = &dash.asset_metrics[0];
        assert_abs_diff_eq!(a.utilization_pct, 100.0 * 44.0 / 48.0, epsilon = 1e-9);
        assert_abs_diff_eq!(a.availability_pct, 100.0 * 46.0 / 48.0, epsilon = 1e-9);

        // B: 第1天 12h 运行 + 12h 待机; 第2天无记录
        let b = &dash.asset_metrics[1];
        assert_abs_diff_eq!(b.utilization_pct, 25.0, epsilon = 1e-9);
        assert_abs_diff_eq!(b.availability_pct, 50.0, epsilon = 1e-9);

        assert_eq!(dash.system_metrics.len(), 1);
        assert_eq!(dash.system_metrics[0].asset_count, 2);

        assert_eq!(dash.fleet_summary.connected_asset_count, 2);
        assert_eq!(dash.fleet_summary.total_asset_count, 3);
        assert_eq!(dash.fleet_summary.alert_count, dash.alerts.len());
    }

    #[test]
    fn test_build_dashboard_without_filter_keeps_raw_records() {
        let spec = PeriodSpec::Range {
            start: d(2024, 6, 1),
            end: d(2024, 6, 1),
        };
        let assets = vec![Asset::new("A", None)];
        let records = grouped(vec![
            ObservationRecord::new("A", d(2024, 6, 1), 12.0, 0.0, 0.0),
            ObservationRecord::new("A", d(2024, 6, 2), 12.0, 0.0, 0.0),
        ]);

        let o = MetricsOrchestrator::new();
        let filtered = o.build_dashboard(&spec, &assets, &records, 95.0, true).unwrap();
        let raw = o.build_dashboard(&spec, &assets, &records, 95.0, false).unwrap();

        assert_abs_diff_eq!(filtered.asset_metrics[0].utilization_pct, 50.0, epsilon = 1e-9);
        assert_abs_diff_eq!(raw.asset_metrics[0].utilization_pct, 100.0, epsilon = 1e-9);
    }

    #[test]
    fn test_build_dashboard_invalid_period() {
        let spec = PeriodSpec::Range {
            start: d(2024, 6, 2),
            end: d(2024, 6, 1),
        };
        let err = MetricsOrchestrator::new()
            .build_dashboard(&spec, &[], &BTreeMap::new(), 95.0, true)
            .unwrap_err();
        assert!(matches!(err, EngineError::InvalidPeriod { .. }));
    }

    #[test]
    fn test_build_trend_monthly() {
        let spec = PeriodSpec::Range {
            start: d(2024, 1, 31),
            end: d(2024, 2, 1),
        };
        let asset = Asset::new("A", Some("S"));
        let records = vec![
            ObservationRecord::new("A", d(2024, 1, 31), 24.0, 0.0, 0.0),
            ObservationRecord::new("A", d(2024, 2, 1), 6.0, 0.0, 0.0),
        ];
        let trend = MetricsOrchestrator::new()
            .build_trend(&spec, &asset, &records, 95.0)
            .unwrap();

        assert_eq!(trend.len(), 2);
        assert_eq!(trend[0].metrics.utilization_pct, 100.0);
        assert_abs_diff_eq!(trend[1].metrics.utilization_pct, 25.0, epsilon = 1e-9);
        assert_eq!(trend[1].metrics.system_id.as_deref(), Some("S"));
    }
}
