// ==========================================
// 设备绩效指标引擎 - 全厂汇总与告警
// ==========================================
// 职责: 全厂平均指标、接入设备数、告警计数/明细
// 输入: AssetMetrics 列表 + 接入设备集合 + 告警目标
// 输出: FleetSummary / AssetAlert
// ==========================================

use crate::domain::metrics::{AssetAlert, AssetMetrics, FleetSummary};
use crate::domain::types::AlertReason;
use std::collections::HashSet;
use tracing::debug;

// ==========================================
// FleetSummaryEvaluator - 全厂汇总与告警评估
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct FleetSummaryEvaluator;

impl FleetSummaryEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// 生成全厂汇总
    ///
    /// - 三项均值为简单算术平均（不按设备重要度加权）
    /// - 列表为空时均值为 0
    /// - 告警: 可用率 < 目标 或 可靠度 < 目标
    pub fn summarize(
        &self,
        asset_metrics: &[AssetMetrics],
        connected: &HashSet<String>,
        total_asset_count: usize,
        target: f64,
    ) -> FleetSummary {
        let alert_count = asset_metrics
            .iter()
            .filter(|m| m.is_below_target(target))
            .count();

        let mut summary = FleetSummary::empty(total_asset_count);
        summary.connected_asset_count = connected.len();
        summary.alert_count = alert_count;

        if !asset_metrics.is_empty() {
            let n = asset_metrics.len() as f64;
            summary.avg_utilization_pct =
                asset_metrics.iter().map(|m| m.utilization_pct).sum::<f64>() / n;
            summary.avg_availability_pct =
                asset_metrics.iter().map(|m| m.availability_pct).sum::<f64>() / n;
            summary.avg_reliability_pct =
                asset_metrics.iter().map(|m| m.reliability_pct).sum::<f64>() / n;
        }

        debug!(
            assets = asset_metrics.len(),
            connected = summary.connected_asset_count,
            total = total_asset_count,
            alerts = alert_count,
            target,
            "全厂汇总完成"
        );
        summary
    }

    /// 告警明细
    ///
    /// 与 `summarize` 使用同一判定,条数等于 alert_count
    pub fn list_alerts(&self, asset_metrics: &[AssetMetrics], target: f64) -> Vec<AssetAlert> {
        asset_metrics
            .iter()
            .filter(|m| m.is_below_target(target))
            .map(|m| {
                let mut reasons = Vec::with_capacity(2);
                if m.availability_pct < target {
                    reasons.push(AlertReason::AvailabilityBelowTarget);
                }
                if m.reliability_pct < target {
                    reasons.push(AlertReason::ReliabilityBelowTarget);
                }
                AssetAlert {
                    asset_id: m.asset_id.clone(),
                    system_id: m.system_id.clone(),
                    availability_pct: m.availability_pct,
                    reliability_pct: m.reliability_pct,
                    target,
                    reasons,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn metrics(asset_id: &str, util: f64, avail: f64, rel: f64) -> AssetMetrics {
        AssetMetrics {
            asset_id: asset_id.to_string(),
            system_id: None,
            utilization_pct: util,
            availability_pct: avail,
            reliability_pct: rel,
            target: 95.0,
        }
    }

    #[test]
    fn test_summarize_averages_and_alerts() {
        let input = vec![
            metrics("A", 90.0, 99.0, 98.0), // 正常
            metrics("B", 60.0, 80.0, 97.0), // 可用率告警
            metrics("C", 30.0, 96.0, 50.0), // 可靠度告警
        ];
        let connected: HashSet<String> = ["A", "B"].iter().map(|s| s.to_string()).collect();

        let s = FleetSummaryEvaluator::new().summarize(&input, &connected, 5, 95.0);
        assert_abs_diff_eq!(s.avg_utilization_pct, 60.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.avg_availability_pct, 275.0 / 3.0, epsilon = 1e-9);
        assert_abs_diff_eq!(s.avg_reliability_pct, 245.0 / 3.0, epsilon = 1e-9);
        assert_eq!(s.connected_asset_count, 2);
        assert_eq!(s.total_asset_count, 5);
        assert_eq!(s.alert_count, 2);
    }

    #[test]
    fn test_summarize_empty() {
        let s = FleetSummaryEvaluator::new().summarize(&[], &HashSet::new(), 3, 95.0);
        assert_eq!(s, FleetSummary::empty(3));
    }

    #[test]
    fn test_target_equal_is_not_alert() {
        let input = vec![metrics("A", 0.0, 95.0, 95.0)];
        let s = FleetSummaryEvaluator::new().summarize(&input, &HashSet::new(), 1, 95.0);
        assert_eq!(s.alert_count, 0);
    }

    #[test]
    fn test_degenerate_targets() {
        let input = vec![metrics("A", 0.0, 100.0, 100.0), metrics("B", 0.0, 0.0, 0.0)];
        let e = FleetSummaryEvaluator::new();
        assert_eq!(e.summarize(&input, &HashSet::new(), 2, 150.0).alert_count, 2);
        assert_eq!(e.summarize(&input, &HashSet::new(), 2, -1.0).alert_count, 0);
    }

    #[test]
    fn test_list_alerts_matches_count() {
        let input = vec![
            metrics("A", 0.0, 80.0, 70.0),
            metrics("B", 0.0, 99.0, 99.0),
            metrics("C", 0.0, 99.0, 70.0),
        ];
        let e = FleetSummaryEvaluator::new();
        let alerts = e.list_alerts(&input, 95.0);
        let summary = e.summarize(&input, &HashSet::new(), 3, 95.0);

        assert_eq!(alerts.len(), summary.alert_count);
        assert_eq!(alerts[0].asset_id, "A");
        assert_eq!(
            alerts[0].reasons,
            vec![
                AlertReason::AvailabilityBelowTarget,
                AlertReason::ReliabilityBelowTarget
            ]
        );
        assert_eq!(alerts[1].reasons, vec![AlertReason::ReliabilityBelowTarget]);
    }

    proptest! {
        #[test]
        fn prop_alerts_agree_with_summary(
            pcts in prop::collection::vec((0.0f64..=100.0, 0.0f64..=100.0), 0..20),
            target in -10.0f64..110.0,
        ) {
            let input: Vec<AssetMetrics> = pcts
                .iter()
                .enumerate()
                .map(|(i, (a, r))| metrics(&format!("A{}", i), 0.0, *a, *r))
                .collect();
            let e = FleetSummaryEvaluator::new();
            let alerts = e.list_alerts(&input, target);
            let summary = e.summarize(&input, &HashSet::new(), input.len(), target);

            prop_assert_eq!(alerts.len(), summary.alert_count);
            prop_assert!(alerts.iter().all(|a| !a.reasons.is_empty()));
        }
    }
}
