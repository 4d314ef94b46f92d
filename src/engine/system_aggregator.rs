// ==========================================
// 设备绩效指标引擎 - 系统聚合器
// ==========================================
// 职责: 按系统分组,用冗余(并联)规则合成系统可用率/可靠度
// 输入: AssetMetrics 列表
// 输出: SystemMetrics 列表 (按 system_id 升序)
// ==========================================
// 规则: 系统 = 100 × (1 - Π(1 - p_i / 100))
//       单设备系统直接透传,不走乘积
// ==========================================

use crate::domain::metrics::{AssetMetrics, SystemMetrics};
use crate::domain::types::clamp_pct;
use std::collections::BTreeMap;
use tracing::debug;

// ==========================================
// SystemAggregator - 系统聚合器
// ==========================================
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemAggregator;

impl SystemAggregator {
    pub fn new() -> Self {
        Self
    }

    /// 聚合系统指标
    ///
    /// 无 system_id 的设备不出现在结果里。
    /// 组内按输入顺序连乘,保证浮点结果可复现。
    pub fn aggregate(&self, asset_metrics: &[AssetMetrics]) -> Vec<SystemMetrics> {
        let mut groups: BTreeMap<&str, Vec<&AssetMetrics>> = BTreeMap::new();
        for m in asset_metrics {
            if let Some(system_id) = m.system_id.as_deref() {
                groups.entry(system_id).or_default().push(m);
            }
        }

        groups
            .into_iter()
            .map(|(system_id, members)| {
                let (availability_pct, reliability_pct) = match members.as_slice() {
                    [only] => (only.availability_pct, only.reliability_pct),
                    _ => (
                        parallel_combine(members.iter().map(|m| m.availability_pct)),
                        parallel_combine(members.iter().map(|m| m.reliability_pct)),
                    ),
                };

                debug!(
                    system_id,
                    asset_count = members.len(),
                    availability_pct,
                    reliability_pct,
                    "系统指标聚合完成"
                );

                SystemMetrics {
                    system_id: system_id.to_string(),
                    availability_pct: clamp_pct(availability_pct),
                    reliability_pct: clamp_pct(reliability_pct),
                    asset_count: members.len(),
                }
            })
            .collect()
    }
}

/// 并联合成: 100 × (1 - Π(1 - p_i / 100))
pub fn parallel_combine(pcts: impl IntoIterator<Item = f64>) -> f64 {
    let unavailable: f64 = pcts
        .into_iter()
        .fold(1.0, |acc, p| acc * (1.0 - p / 100.0));
    100.0 * (1.0 - unavailable)
}
