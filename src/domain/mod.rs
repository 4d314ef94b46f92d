// ==========================================
// 设备绩效指标引擎 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod asset;
pub mod metrics;
pub mod observation;
pub mod period;
pub mod types;

// 重导出核心类型
pub use asset::Asset;
pub use metrics::{
    AssetAlert, AssetMetrics, FleetSummary, MetricsDashboard, SystemMetrics, TrendPoint,
};
pub use observation::ObservationRecord;
pub use period::{PeriodSpec, ResolvedPeriod};
pub use types::{AlertReason, PeriodKind};
